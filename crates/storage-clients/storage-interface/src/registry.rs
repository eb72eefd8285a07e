use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use url::Url;

use crate::{CertificateStorage, StorageError};

/// Builds a storage backend for the CA directory at the given URL.
pub type StorageConstructor =
    Arc<dyn Fn(Url) -> BoxFuture<'static, Result<Arc<dyn CertificateStorage>, StorageError>> + Send + Sync>;

/// Named storage backends a host can choose from.
///
/// Providers are registered explicitly at startup by whoever assembles the host,
/// so the set of available backends is exactly what was passed in.
#[derive(Clone, Default)]
pub struct StorageProviderRegistry {
    providers: HashMap<String, StorageConstructor>,
}

impl StorageProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` under `name`, replacing any provider already registered
    /// under that name.
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(Url) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn CertificateStorage>, StorageError>> + Send + 'static,
    {
        let boxed: StorageConstructor = Arc::new(move |ca_url: Url| constructor(ca_url).boxed());
        self.providers.insert(name.into(), boxed);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Constructs the provider registered under `name` for the CA at `ca_url`.
    pub async fn construct(&self, name: &str, ca_url: &Url) -> Result<Arc<dyn CertificateStorage>, StorageError> {
        let constructor =
            self.providers.get(name).ok_or_else(|| StorageError::UnknownProvider(name.to_string()))?.clone();
        constructor(ca_url.clone()).await
    }
}

impl std::fmt::Debug for StorageProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageProviderRegistry").field("providers", &self.names()).finish()
    }
}
