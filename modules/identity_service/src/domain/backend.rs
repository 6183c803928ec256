//! External credential backend seam

use async_trait::async_trait;

/// Identity returned by the external auth backend on a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUser {
    pub email: String,
    pub name: String,
    /// Raw role string as reported by the backend
    pub role: Option<String>,
}

/// Delegated credential check
///
/// `Ok(None)` means the backend answered but rejected the credentials; `Err`
/// means it could not be reached or answered garbage. Either way the service
/// falls back to the local password hash.
#[async_trait]
pub trait CredentialBackend: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<BackendUser>>;
}
