pub mod error;
pub mod records;
pub mod registry;

use async_trait::async_trait;
use mockall::automock;

pub use error::{RecordKind, StorageError, StorageOperation};
pub use records::{SiteData, UserData};
pub use registry::{StorageConstructor, StorageProviderRegistry};

/// Storage backend for a TLS certificate manager.
///
/// A certificate manager persists two kinds of records through this trait:
/// - site data: the certificate, private key and metadata issued for one domain
/// - user data: the registration and account key of one ACME identity (keyed by email)
///
/// Implementations treat both records as opaque payloads. Issuance, renewal and the ACME
/// protocol stay with the host; a backend only stores and returns what it is given.
#[automock]
#[async_trait]
pub trait CertificateStorage: Send + Sync {
    /// Returns `true` if site data exists for `domain`. A missing record is `Ok(false)`,
    /// every other failure is an error.
    async fn site_exists(&self, domain: &str) -> Result<bool, StorageError>;

    /// Loads the site data stored for `domain`.
    /// Fails with [`StorageError::NotFound`] if nothing is stored.
    async fn load_site(&self, domain: &str) -> Result<SiteData, StorageError>;

    /// Stores site data for `domain`, replacing whatever was there.
    async fn store_site(&self, domain: &str, data: &SiteData) -> Result<(), StorageError>;

    /// Deletes the site data for `domain`. Deleting a missing record succeeds.
    async fn delete_site(&self, domain: &str) -> Result<(), StorageError>;

    /// Loads the user data stored for `email`.
    /// Fails with [`StorageError::NotFound`] if nothing is stored.
    async fn load_user(&self, email: &str) -> Result<UserData, StorageError>;

    /// Stores user data for `email`, replacing whatever was there.
    async fn store_user(&self, email: &str, data: &UserData) -> Result<(), StorageError>;

    /// Email of the most recently used account, or an empty string when the backend
    /// cannot tell. An empty string means "unknown", not "no users".
    fn most_recent_user_email(&self) -> String;
}
