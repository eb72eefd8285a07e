use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::delete_object::DeleteObjectError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectStoreError {
    /// The store reported that no object exists under `key`.
    #[error("Object not found: {key}")]
    NotFound { key: String },

    #[error("Failed to get object {key}: {source}")]
    GetObject {
        key: String,
        #[source]
        source: SdkError<GetObjectError>,
    },

    #[error("Failed to put object {key}: {source}")]
    PutObject {
        key: String,
        #[source]
        source: SdkError<PutObjectError>,
    },

    #[error("Failed to head object {key}: {source}")]
    HeadObject {
        key: String,
        #[source]
        source: SdkError<HeadObjectError>,
    },

    #[error("Unable to delete object {key}: {source}")]
    DeleteObject {
        key: String,
        #[source]
        source: SdkError<DeleteObjectError>,
    },

    #[error("Failed to stream object {key}: {message}")]
    ObjectStream { key: String, message: String },

    /// Catch-all for stores that are not backed by the AWS SDK.
    #[error("Object store error for {key}: {source}")]
    Other {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl ObjectStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ObjectStoreError::NotFound { .. })
    }

    pub fn key(&self) -> &str {
        match self {
            ObjectStoreError::NotFound { key }
            | ObjectStoreError::GetObject { key, .. }
            | ObjectStoreError::PutObject { key, .. }
            | ObjectStoreError::HeadObject { key, .. }
            | ObjectStoreError::DeleteObject { key, .. }
            | ObjectStoreError::ObjectStream { key, .. }
            | ObjectStoreError::Other { key, .. } => key,
        }
    }

    /// Maps a GET failure, recognising a missing key by the service's `NoSuchKey` code.
    pub(crate) fn from_get(key: &str, source: SdkError<GetObjectError>) -> Self {
        if source.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
            return ObjectStoreError::NotFound { key: key.to_string() };
        }
        ObjectStoreError::GetObject { key: key.to_string(), source }
    }

    /// Maps a HEAD failure. HEAD responses carry no body, so the SDK surfaces a 404 as the
    /// modeled `NotFound` error rather than `NoSuchKey`.
    pub(crate) fn from_head(key: &str, source: SdkError<HeadObjectError>) -> Self {
        if source.as_service_error().is_some_and(HeadObjectError::is_not_found) {
            return ObjectStoreError::NotFound { key: key.to_string() };
        }
        ObjectStoreError::HeadObject { key: key.to_string(), source }
    }
}
