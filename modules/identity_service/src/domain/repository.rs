//! Repository traits for data access
//!
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{Session, User, UserFilter};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use uuid::Uuid;

/// Repository for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create(&self, user: &User) -> Result<User>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Find a user by lower-cased email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Overwrite a user row
    async fn update(&self, user: &User) -> Result<User>;

    /// Filtered page of users, newest first, plus the total match count
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> Result<(Vec<User>, u64)>;
}

/// Repository for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<()>;

    async fn find(&self, token_hash: &str) -> Result<Option<Session>>;

    async fn delete(&self, token_hash: &str) -> Result<()>;

    /// Remove every session that expired at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
