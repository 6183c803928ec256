//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{IdentityApi, IdentityError, SessionToken, User};
use crate::domain::Service;
use async_trait::async_trait;
use idgm_kit::{Principal, SessionResolver};
use std::sync::Arc;
use uuid::Uuid;

/// Native client that directly calls the domain service
///
/// Also serves as the [`SessionResolver`] the server installs for every
/// module router.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl IdentityApi for NativeClient {
    async fn get_user(&self, user_id: Uuid) -> Result<User, IdentityError> {
        self.service.get_user(user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        self.service.find_user_by_email(email).await
    }

    async fn user_for_session(&self, token: &str) -> Result<Option<User>, IdentityError> {
        self.service.user_for_session(token).await
    }

    async fn ensure_admin(&self, email: &str, name: &str, password: &str) -> Result<User, IdentityError> {
        self.service.ensure_admin(email, name, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<(User, SessionToken), IdentityError> {
        self.service.login(email, password).await
    }
}

#[async_trait]
impl SessionResolver for NativeClient {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Principal>> {
        let user = self
            .service
            .user_for_session(token)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(user.map(|u| u.principal()))
    }
}
