use certstore_storage_interface::StorageError;

// Environment variable names
pub const ENV_S3_BUCKET: &str = "CADDY_S3_BUCKET";
pub const ENV_S3_PREFIX: &str = "CADDY_S3_PREFIX";
pub const ENV_S3_REGION: &str = "CADDY_S3_REGION";

/// Settings for an S3 backed certificate storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3StorageConfig {
    /// Bucket name or ARN
    pub bucket: String,
    /// Sub-path appended to the namespace derived from the CA URL
    pub prefix: Option<String>,
    /// Overrides the region resolved by the AWS SDK
    pub region: Option<String>,
}

impl S3StorageConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self { bucket: bucket.into(), prefix: None, region: None }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let bucket = non_empty(ENV_S3_BUCKET).ok_or_else(|| {
            StorageError::Configuration(format!("{} environment variable is not set", ENV_S3_BUCKET))
        })?;

        Ok(Self { bucket, prefix: non_empty(ENV_S3_PREFIX), region: non_empty(ENV_S3_REGION) })
    }

    /// Bucket name and region to connect with. An explicit region wins over one embedded
    /// in a bucket ARN.
    pub fn bucket_location(&self) -> Result<BucketLocation, StorageError> {
        let mut location = BucketLocation::parse(&self.bucket);
        if location.name.is_empty() {
            return Err(StorageError::Configuration(format!("Invalid bucket identifier: {}", self.bucket)));
        }
        if self.region.is_some() {
            location.region = self.region.clone();
        }
        Ok(location)
    }
}

/// Bucket name and the region it was declared in, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLocation {
    pub name: String,
    pub region: Option<String>,
}

impl BucketLocation {
    /// Parse a bucket identifier (name or ARN) into bucket name and optional region
    pub fn parse(identifier: &str) -> Self {
        if identifier.starts_with("arn:aws:s3:") {
            let parts: Vec<&str> = identifier.splitn(6, ':').collect();

            if parts.len() == 6 {
                let region = if !parts[3].is_empty() { Some(parts[3].to_string()) } else { None };

                // arn:aws:s3:region:account-id:bucket/bucket-name or arn:aws:s3:::bucket-name
                let name = match parts[5].split_once('/') {
                    Some(("bucket", name)) if !name.is_empty() => name.to_string(),
                    _ => parts[5].to_string(),
                };

                return Self { name, region };
            }
        }

        Self { name: identifier.to_string(), region: None }
    }
}
