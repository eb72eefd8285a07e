use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::client::{ObjectMetadata, ObjectStoreClient, ObjectStoreError, PutObjectOptions};

/// AwsS3 is an [`ObjectStoreClient`] bound to one S3 bucket.
#[derive(Clone, Debug)]
pub struct AwsS3 {
    client: Arc<Client>,
    bucket_name: String,
}

impl AwsS3 {
    /// Creates a new instance of AwsS3 with the provided AWS configuration.
    /// # Arguments
    /// * `aws_config` - The AWS configuration.
    /// * `bucket_name` - The bucket every object lives in.
    /// * `region` - Overrides the region of `aws_config` when set.
    ///
    /// # Returns
    /// * `Self` - The new instance of AwsS3.
    pub fn new(aws_config: &SdkConfig, bucket_name: impl Into<String>, region: Option<&str>) -> Self {
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(aws_config);

        if let Some(region) = region {
            s3_config_builder = s3_config_builder.region(Region::new(region.to_string()));
        }

        let client = Client::from_conf(s3_config_builder.build());

        Self { client: Arc::new(client), bucket_name: bucket_name.into() }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn region(&self) -> Option<String> {
        self.client.config().region().map(|region| region.to_string())
    }
}

#[async_trait]
impl ObjectStoreClient for AwsS3 {
    /// Get the data from the bucket with the specified key.
    ///
    /// # Arguments
    /// * `key` - The key of the object to retrieve.
    ///
    /// # Returns
    /// * `Result<Bytes, ObjectStoreError>` - The result of the get operation.
    async fn get_object(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|source| ObjectStoreError::from_get(key, source))?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| ObjectStoreError::ObjectStream { key: key.to_string(), message: e.to_string() })?;

        let data_bytes = data.into_bytes();
        tracing::debug!(
            log_type = "CertStorage",
            category = "object_store_call",
            data_bytes = data_bytes.len(),
            "Retrieved object from {}, key={}",
            self.bucket_name,
            key
        );
        Ok(data_bytes)
    }

    /// Put the data into the bucket with the specified key.
    ///
    /// # Arguments
    /// * `key` - The key of the object to put.
    /// * `body` - The data to put into the bucket.
    /// * `options` - Encryption and content type for the write.
    /// # Returns
    /// * `Result<(), ObjectStoreError>` - The result of the put operation.
    async fn put_object(&self, key: &str, body: Bytes, options: PutObjectOptions) -> Result<(), ObjectStoreError> {
        let data_bytes = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(body))
            .set_server_side_encryption(options.server_side_encryption)
            .set_content_type(options.content_type)
            .send()
            .await
            .map_err(|source| ObjectStoreError::PutObject { key: key.to_string(), source })?;

        tracing::debug!(
            log_type = "CertStorage",
            category = "object_store_call",
            data_bytes,
            "Put object into {}, key={}",
            self.bucket_name,
            key
        );
        Ok(())
    }

    async fn head_object(&self, key: &str) -> Result<ObjectMetadata, ObjectStoreError> {
        let output = self
            .client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|source| ObjectStoreError::from_head(key, source))?;

        Ok(ObjectMetadata {
            content_length: output.content_length(),
            e_tag: output.e_tag().map(str::to_string),
            content_type: output.content_type().map(str::to_string),
        })
    }

    /// delete the data from the bucket with the specified key.
    ///
    /// # Arguments
    /// * `key` - The key of the object to delete.
    /// # Returns
    /// * `Result<(), ObjectStoreError>` - The result of the delete operation.
    async fn delete_object(&self, key: &str) -> Result<(), ObjectStoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|source| ObjectStoreError::DeleteObject { key: key.to_string(), source })?;

        tracing::debug!(
            log_type = "CertStorage",
            category = "object_store_call",
            "Deleted object from {}, key={}",
            self.bucket_name,
            key
        );
        Ok(())
    }
}
