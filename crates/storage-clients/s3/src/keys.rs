use certstore_storage_interface::RecordKind;

/// Object keys for one deployment's records.
///
/// Every key sits under `prefix`, which is the CA host name optionally joined with an
/// operator supplied sub-path: `<prefix>/sites/<domain>` and `<prefix>/users/<email>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    prefix: String,
}

impl KeyLayout {
    pub fn new(namespace: &str, sub_path: Option<&str>) -> Self {
        Self { prefix: join_key(&[namespace, sub_path.unwrap_or_default()]) }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key(&self, kind: RecordKind, name: &str) -> String {
        join_key(&[&self.prefix, kind.key_segment(), name])
    }

    pub fn site_key(&self, domain: &str) -> String {
        self.key(RecordKind::Site, domain)
    }

    pub fn user_key(&self, email: &str) -> String {
        self.key(RecordKind::User, email)
    }
}

/// Joins non-empty `elements` with `/` and normalizes the result: repeated separators
/// collapse, `.` elements drop out, `..` removes the element before it and a trailing
/// separator is stripped. A leading `/` is kept. All-empty input gives `""`, while
/// elements that cancel out (`a/..`) give `.`.
pub fn join_key(elements: &[&str]) -> String {
    let joined = elements.iter().filter(|element| !element.is_empty()).copied().collect::<Vec<_>>().join("/");
    if joined.is_empty() {
        return String::new();
    }
    clean(&joined)
}

fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` cannot climb above the root
                _ if rooted => {}
                _ => segments.push(".."),
            },
            segment => segments.push(segment),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["example.com", "acme"], "example.com/acme")]
    #[case(&["example.com", ""], "example.com")]
    #[case(&["", "acme"], "acme")]
    #[case(&["", ""], "")]
    #[case(&["example.com", "/acme/"], "example.com/acme")]
    #[case(&["example.com", "acme//certs"], "example.com/acme/certs")]
    #[case(&["example.com", "./acme"], "example.com/acme")]
    #[case(&["example.com", "acme/../certs"], "example.com/certs")]
    #[case(&["a", "../../b"], "../b")]
    #[case(&["/acme", "sites"], "/acme/sites")]
    #[case(&["/", "..", "x"], "/x")]
    #[case(&["a", ".."], ".")]
    fn joins_like_paths(#[case] elements: &[&str], #[case] expected: &str) {
        assert_eq!(join_key(elements), expected);
    }

    #[test]
    fn site_key_with_sub_path() {
        let layout = KeyLayout::new("example.com", Some("acme"));

        assert_eq!(layout.prefix(), "example.com/acme");
        assert_eq!(layout.site_key("example.com"), "example.com/acme/sites/example.com");
    }

    #[test]
    fn user_key_without_sub_path() {
        let layout = KeyLayout::new("acme-v02.api.letsencrypt.org", None);

        assert_eq!(layout.user_key("admin@example.com"), "acme-v02.api.letsencrypt.org/users/admin@example.com");
    }

    #[test]
    fn sites_and_users_never_share_a_key() {
        let layout = KeyLayout::new("example.com", None);

        assert_ne!(layout.site_key("name"), layout.user_key("name"));
    }

    #[test]
    fn wildcard_domains_are_kept_verbatim() {
        let layout = KeyLayout::new("example.com", None);

        assert_eq!(layout.site_key("*.example.com"), "example.com/sites/*.example.com");
    }
}
