//! Domain service - registration, login and session lifecycle

use super::backend::{BackendUser, CredentialBackend};
use super::password::{generate_token, hash_password, hash_token, needs_rehash, verify_password};
use super::repository::{SessionRepository, UserRepository};
use super::validation::{normalize_email, validate_registration};
use crate::contract::{IdentityError, Session, SessionToken, User, UserFilter};
use chrono::{DateTime, Utc};
use idgm_kit::{Page, PageRequest, Role};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Domain service for identity management
pub struct Service {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    backend: Option<Arc<dyn CredentialBackend>>,
    session_ttl: Duration,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        backend: Option<Arc<dyn CredentialBackend>>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            backend,
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    // ===== Accounts =====

    /// Register a new customer account
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, IdentityError> {
        let email = normalize_email(email);
        let errors = validate_registration(&email, name, password);
        if !errors.is_empty() {
            return Err(IdentityError::Validation { errors });
        }

        if self.find_user_by_email(&email).await?.is_some() {
            return Err(IdentityError::Conflict {
                reason: format!("An account with email '{}' already exists", email),
            });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            name: name.trim().to_string(),
            role: Role::Customer,
            password_hash: Some(hash_password(password).map_err(internal)?),
            created_at: now,
            updated_at: now,
        };

        let created = self.users.create(&user).await.map_err(internal)?;
        tracing::info!(user_id = %created.id, "User registered");
        Ok(created)
    }

    /// Create an administrator, or promote an existing account to ADMIN
    pub async fn ensure_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, IdentityError> {
        if let Some(existing) = self.find_user_by_email(email).await? {
            return self.update_role(existing.id, Role::Admin).await;
        }

        let created = self.register(email, name, password).await?;
        self.update_role(created.id, Role::Admin).await
    }

    /// Get a user by id
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, IdentityError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| IdentityError::user_not_found(user_id))
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        self.users
            .find_by_email(&normalize_email(email))
            .await
            .map_err(internal)
    }

    /// Filtered, paginated user listing for the admin back-office
    pub async fn list_users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, IdentityError> {
        let (items, total) = self.users.list(filter, page).await.map_err(internal)?;
        Ok(Page::new(items, total, page))
    }

    /// Change a user's role
    pub async fn update_role(&self, user_id: Uuid, role: Role) -> Result<User, IdentityError> {
        let mut user = self.get_user(user_id).await?;
        if user.role == role {
            return Ok(user);
        }
        user.role = role;
        user.updated_at = Utc::now();
        let updated = self.users.update(&user).await.map_err(internal)?;
        tracing::info!(user_id = %user_id, role = %role, "User role changed");
        Ok(updated)
    }

    // ===== Sessions =====

    /// Verify credentials and open a new session
    ///
    /// The external backend is consulted first when configured; any rejection
    /// or failure there falls through to the local password hash.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, SessionToken), IdentityError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(IdentityError::InvalidCredentials);
        }

        let user = match self.authenticate_with_backend(&email, password).await? {
            Some(user) => user,
            None => self.authenticate_locally(&email, password).await?,
        };

        let token = self.open_session(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, token))
    }

    /// Close a session; unknown tokens are ignored
    pub async fn logout(&self, token: &str) -> Result<(), IdentityError> {
        self.sessions
            .delete(&hash_token(token))
            .await
            .map_err(internal)
    }

    /// Resolve a raw token to its user
    ///
    /// Expired sessions are deleted on sight and reported as absent.
    pub async fn user_for_session(&self, token: &str) -> Result<Option<User>, IdentityError> {
        let token_hash = hash_token(token);
        let Some(session) = self.sessions.find(&token_hash).await.map_err(internal)? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            if let Err(e) = self.sessions.delete(&token_hash).await {
                tracing::warn!(error = ?e, "Failed to delete expired session");
            }
            return Ok(None);
        }

        self.users.find_by_id(session.user_id).await.map_err(internal)
    }

    /// Remove all expired sessions, returning how many were deleted
    pub async fn purge_expired_sessions(&self) -> Result<u64, IdentityError> {
        self.sessions
            .delete_expired(Utc::now())
            .await
            .map_err(internal)
    }

    // ===== Helper Methods =====

    async fn open_session(&self, user_id: Uuid) -> Result<SessionToken, IdentityError> {
        let token = generate_token();
        let now = Utc::now();
        let expires_at = expiry(now, self.session_ttl);

        let session = Session {
            token_hash: hash_token(&token),
            user_id,
            expires_at,
            created_at: now,
        };
        self.sessions.create(&session).await.map_err(internal)?;

        Ok(SessionToken { token, expires_at })
    }

    async fn authenticate_locally(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let user = self
            .find_user_by_email(email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        match &user.password_hash {
            Some(stored) if verify_password(password, stored) => {
                if needs_rehash(stored) {
                    return Ok(self.upgrade_password_hash(user, password).await);
                }
                Ok(user)
            }
            _ => Err(IdentityError::InvalidCredentials),
        }
    }

    /// Re-hash a legacy password after a successful login; failures keep the old hash
    async fn upgrade_password_hash(&self, mut user: User, password: &str) -> User {
        let hash = match hash_password(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password re-hash failed");
                return user;
            }
        };
        let previous = user.clone();
        user.password_hash = Some(hash);
        user.updated_at = Utc::now();
        match self.users.update(&user).await {
            Ok(updated) => {
                tracing::info!(user_id = %updated.id, "Password hash upgraded to argon2");
                updated
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password re-hash not stored");
                previous
            }
        }
    }

    async fn authenticate_with_backend(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, IdentityError> {
        let Some(backend) = &self.backend else {
            return Ok(None);
        };

        match backend.authenticate(email, password).await {
            Ok(Some(remote)) => self.mirror_backend_user(remote).await.map(Some),
            Ok(None) => {
                tracing::debug!("Auth backend rejected credentials, trying local hash");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Auth backend unavailable, trying local hash");
                Ok(None)
            }
        }
    }

    /// Create or refresh the local mirror of a backend-authenticated user
    async fn mirror_backend_user(&self, remote: BackendUser) -> Result<User, IdentityError> {
        let email = normalize_email(&remote.email);
        let role = remote.role.as_deref().and_then(Role::parse);
        let now = Utc::now();

        match self.find_user_by_email(&email).await? {
            Some(mut user) => {
                let mut changed = false;
                if !remote.name.trim().is_empty() && user.name != remote.name {
                    user.name = remote.name;
                    changed = true;
                }
                if let Some(role) = role.filter(|r| *r != user.role) {
                    user.role = role;
                    changed = true;
                }
                if !changed {
                    return Ok(user);
                }
                user.updated_at = now;
                self.users.update(&user).await.map_err(internal)
            }
            None => {
                let name = if remote.name.trim().is_empty() {
                    email.split('@').next().unwrap_or_default().to_string()
                } else {
                    remote.name
                };
                let user = User {
                    id: Uuid::new_v4(),
                    email,
                    name,
                    role: role.unwrap_or(Role::Customer),
                    password_hash: None,
                    created_at: now,
                    updated_at: now,
                };
                let created = self.users.create(&user).await.map_err(internal)?;
                tracing::info!(user_id = %created.id, "Mirrored user from auth backend");
                Ok(created)
            }
        }
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(7));
    now + ttl
}

fn internal(e: anyhow::Error) -> IdentityError {
    tracing::error!(error = ?e, "Identity storage error");
    IdentityError::Internal
}
