//! S3 backed certificate storage.
//!
//! [`S3Storage`] implements [`CertificateStorage`] on top of an [`ObjectStoreClient`],
//! mapping site and user records to JSON objects in a single bucket. Hosts pick it up
//! by calling [`register`] on their [`StorageProviderRegistry`] at startup.

pub mod client;
pub mod config;
pub mod keys;
pub mod storage;


use std::sync::Arc;

use certstore_storage_interface::{CertificateStorage, StorageProviderRegistry};
use url::Url;

pub use client::s3::AwsS3;
pub use client::{ObjectMetadata, ObjectStoreClient, ObjectStoreError, PutObjectOptions};
pub use config::{BucketLocation, S3StorageConfig};
pub use keys::KeyLayout;
pub use storage::S3Storage;

/// Name the S3 storage registers under.
pub const PROVIDER_NAME: &str = "s3";

/// Registers the S3 storage under [`PROVIDER_NAME`]. The storage reads its settings from
/// the environment each time it is constructed.
pub fn register(registry: &mut StorageProviderRegistry) {
    registry.register(PROVIDER_NAME, |ca_url: Url| async move {
        let storage = S3Storage::new(&ca_url).await?;
        Ok(Arc::new(storage) as Arc<dyn CertificateStorage>)
    });
}

/// Registers the S3 storage under [`PROVIDER_NAME`] with a fixed configuration.
pub fn register_with_config(registry: &mut StorageProviderRegistry, config: S3StorageConfig) {
    registry.register(PROVIDER_NAME, move |ca_url: Url| {
        let config = config.clone();
        async move {
            let storage = S3Storage::from_config(&ca_url, config).await?;
            Ok(Arc::new(storage) as Arc<dyn CertificateStorage>)
        }
    });
}
