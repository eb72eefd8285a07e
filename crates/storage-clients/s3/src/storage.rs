use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use certstore_storage_interface::{CertificateStorage, RecordKind, SiteData, StorageError, StorageOperation, UserData};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::{Host, Url};

use crate::client::s3::AwsS3;
use crate::client::{ObjectStoreClient, ObjectStoreError, PutObjectOptions};
use crate::config::S3StorageConfig;
use crate::keys::KeyLayout;

/// Certificate storage kept in an S3 bucket.
///
/// Records are JSON documents stored at `<namespace>[/<prefix>]/sites/<domain>` and
/// `<namespace>[/<prefix>]/users/<email>`, where the namespace is the host name of the CA
/// directory URL. Every write asks for AES-256 server side encryption and overwrites
/// unconditionally. Nothing is cached and nothing is retried.
#[derive(Debug)]
pub struct S3Storage<C = AwsS3> {
    client: Arc<C>,
    keys: KeyLayout,
}

impl<C> Clone for S3Storage<C> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client), keys: self.keys.clone() }
    }
}

impl S3Storage<AwsS3> {
    /// Creates the storage for the CA at `ca_url`, reading the bucket, prefix and region
    /// from the environment.
    ///
    /// # Errors
    /// [`StorageError::Configuration`] if no bucket is configured.
    pub async fn new(ca_url: &Url) -> Result<Self, StorageError> {
        let config = S3StorageConfig::from_env()?;
        Self::from_config(ca_url, config).await
    }

    /// Creates the storage for the CA at `ca_url` from an explicit configuration.
    ///
    /// Credentials are resolved through the default AWS provider chain. The bucket is not
    /// contacted.
    pub async fn from_config(ca_url: &Url, config: S3StorageConfig) -> Result<Self, StorageError> {
        let location = config.bucket_location()?;

        let sdk_config = aws_config::from_env().load().await;

        let client = AwsS3::new(&sdk_config, location.name, location.region.as_deref());
        let keys = KeyLayout::new(&namespace(ca_url), config.prefix.as_deref());

        tracing::debug!(
            log_type = "CertStorage",
            bucket = client.bucket_name(),
            prefix = keys.prefix(),
            "S3 certificate storage configured"
        );

        Ok(Self::with_client(client, keys))
    }
}

impl<C: ObjectStoreClient> S3Storage<C> {
    pub fn with_client(client: C, keys: KeyLayout) -> Self {
        Self { client: Arc::new(client), keys }
    }

    pub fn keys(&self) -> &KeyLayout {
        &self.keys
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Loads and decodes the record of `kind` stored under `name`.
    pub async fn load<T: DeserializeOwned>(&self, kind: RecordKind, name: &str) -> Result<T, StorageError> {
        let key = self.keys.key(kind, name);
        let body = self
            .client
            .get_object(&key)
            .await
            .map_err(|e| storage_error(StorageOperation::Load, kind, name, e))?;

        serde_json::from_slice(&body)
            .map_err(|source| StorageError::Deserialization { kind, name: name.to_string(), source })
    }

    /// Encodes `data` and writes it under `name`, replacing any previous record.
    pub async fn store<T>(&self, kind: RecordKind, name: &str, data: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(data)
            .map_err(|source| StorageError::Serialization { kind, name: name.to_string(), source })?;

        let key = self.keys.key(kind, name);
        self.client
            .put_object(&key, Bytes::from(body), PutObjectOptions::encrypted_json())
            .await
            .map_err(|e| storage_error(StorageOperation::Store, kind, name, e))
    }

    /// Returns whether a record of `kind` exists under `name`.
    pub async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, StorageError> {
        let key = self.keys.key(kind, name);
        match self.client.head_object(&key).await {
            Ok(metadata) => {
                tracing::debug!(
                    log_type = "CertStorage",
                    key = %key,
                    content_length = ?metadata.content_length,
                    e_tag = ?metadata.e_tag,
                    content_type = ?metadata.content_type,
                    "Record found"
                );
                Ok(true)
            }
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(storage_error(StorageOperation::Exists, kind, name, e)),
        }
    }

    pub async fn delete(&self, kind: RecordKind, name: &str) -> Result<(), StorageError> {
        let key = self.keys.key(kind, name);
        match self.client.delete_object(&key).await {
            // already gone
            Err(e) if e.is_not_found() => Ok(()),
            result => result.map_err(|e| storage_error(StorageOperation::Delete, kind, name, e)),
        }
    }
}

/// Host name of the CA directory, without the brackets of an IPv6 literal. Empty when the
/// URL has no host.
pub(crate) fn namespace(ca_url: &Url) -> String {
    match ca_url.host() {
        Some(Host::Ipv6(addr)) => addr.to_string(),
        Some(host) => host.to_string(),
        None => String::new(),
    }
}

fn storage_error(operation: StorageOperation, kind: RecordKind, name: &str, error: ObjectStoreError) -> StorageError {
    if error.is_not_found() {
        return StorageError::NotFound { kind, name: name.to_string() };
    }
    StorageError::Transport { operation, kind, name: name.to_string(), source: Box::new(error) }
}

#[async_trait]
impl<C: ObjectStoreClient> CertificateStorage for S3Storage<C> {
    async fn site_exists(&self, domain: &str) -> Result<bool, StorageError> {
        self.exists(RecordKind::Site, domain).await
    }

    async fn load_site(&self, domain: &str) -> Result<SiteData, StorageError> {
        self.load(RecordKind::Site, domain).await
    }

    async fn store_site(&self, domain: &str, data: &SiteData) -> Result<(), StorageError> {
        self.store(RecordKind::Site, domain, data).await
    }

    async fn delete_site(&self, domain: &str) -> Result<(), StorageError> {
        self.delete(RecordKind::Site, domain).await
    }

    async fn load_user(&self, email: &str) -> Result<UserData, StorageError> {
        self.load(RecordKind::User, email).await
    }

    async fn store_user(&self, email: &str, data: &UserData) -> Result<(), StorageError> {
        self.store(RecordKind::User, email, data).await
    }

    /// S3 keeps no ordering of writes, so the most recent account is never known.
    fn most_recent_user_email(&self) -> String {
        String::new()
    }
}
