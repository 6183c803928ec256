//! Native client trait for inter-module communication
//!
//! NO HTTP - direct function calls into the identity domain service.

use super::{
    error::IdentityError,
    model::{SessionToken, User},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Identity service API for inter-module communication
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Get a user by id
    async fn get_user(&self, user_id: Uuid) -> Result<User, IdentityError>;

    /// Find a user by email (case-insensitive)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityError>;

    /// Resolve a raw session token to its user; `None` if unknown or expired
    async fn user_for_session(&self, token: &str) -> Result<Option<User>, IdentityError>;

    /// Create an administrator account, or promote the existing account with
    /// this email to ADMIN
    async fn ensure_admin(&self, email: &str, name: &str, password: &str) -> Result<User, IdentityError>;

    /// Verify credentials and open a new session
    async fn login(&self, email: &str, password: &str) -> Result<(User, SessionToken), IdentityError>;
}
