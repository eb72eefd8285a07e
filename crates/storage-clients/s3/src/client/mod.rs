pub mod error;
pub mod s3;

use async_trait::async_trait;
use aws_sdk_s3::types::ServerSideEncryption;
use bytes::Bytes;
pub use error::ObjectStoreError;
use mockall::automock;

/// Options applied to a single object write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutObjectOptions {
    /// Server side encryption requested for the stored object
    pub server_side_encryption: Option<ServerSideEncryption>,

    /// Content type recorded with the object
    pub content_type: Option<String>,
}

impl PutObjectOptions {
    /// AES-256 encrypted JSON document.
    pub fn encrypted_json() -> Self {
        Self {
            server_side_encryption: Some(ServerSideEncryption::Aes256),
            content_type: Some("application/json".to_string()),
        }
    }
}

/// Object metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectMetadata {
    /// Object size in bytes
    pub content_length: Option<i64>,

    /// ETag
    pub e_tag: Option<String>,

    /// Content type
    pub content_type: Option<String>,
}

/// Trait defining the object storage operations certificate storage is built on.
///
/// Every call addresses one object by key inside a bucket the client was configured with.
#[automock]
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Get the object stored under `key`.
    /// Returns [`ObjectStoreError::NotFound`] if there is none.
    async fn get_object(&self, key: &str) -> Result<Bytes, ObjectStoreError>;

    /// Write `body` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, body: Bytes, options: PutObjectOptions) -> Result<(), ObjectStoreError>;

    /// Fetch metadata only.
    /// Returns [`ObjectStoreError::NotFound`] if there is no object under `key`.
    async fn head_object(&self, key: &str) -> Result<ObjectMetadata, ObjectStoreError>;

    /// Delete the object under `key`. Deleting a missing object is not an error.
    async fn delete_object(&self, key: &str) -> Result<(), ObjectStoreError>;
}
