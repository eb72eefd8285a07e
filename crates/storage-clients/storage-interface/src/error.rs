use std::fmt;

/// The two record namespaces a certificate storage keeps apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Site,
    User,
}

impl RecordKind {
    /// Path segment the records of this kind live under.
    pub fn key_segment(&self) -> &'static str {
        match self {
            RecordKind::Site => "sites",
            RecordKind::User => "users",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Site => write!(f, "site"),
            RecordKind::User => write!(f, "user"),
        }
    }
}

/// Storage operation an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Load,
    Store,
    Delete,
    Exists,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOperation::Load => write!(f, "load"),
            StorageOperation::Store => write!(f, "store"),
            StorageOperation::Delete => write!(f, "delete"),
            StorageOperation::Exists => write!(f, "check existence of"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required setting is missing or invalid. Raised at construction only.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No {kind} data stored for {name}")]
    NotFound { kind: RecordKind, name: String },

    #[error("Unable to serialize {kind} data for {name}: {source}")]
    Serialization {
        kind: RecordKind,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot deserialize {kind} data for {name}: {source}")]
    Deserialization {
        kind: RecordKind,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Network, auth or permission failure reported by the backing store.
    #[error("Unable to {operation} {kind} data for {name}: {source}")]
    Transport {
        operation: StorageOperation,
        kind: RecordKind,
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unknown storage provider: {0}")]
    UnknownProvider(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// Get error type as a string for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            StorageError::Configuration(_) => "configuration_error",
            StorageError::NotFound { .. } => "not_found",
            StorageError::Serialization { .. } => "serialization_error",
            StorageError::Deserialization { .. } => "deserialization_error",
            StorageError::Transport { .. } => "transport_error",
            StorageError::UnknownProvider(_) => "unknown_provider",
        }
    }
}
