//! Session-based authentication seam
//!
//! Module routers never talk to the identity store directly. The server
//! installs an `Arc<dyn SessionResolver>` as a request extension and the
//! [`AuthUser`] / [`AdminUser`] extractors resolve the caller from the
//! `idgm_session` cookie or a bearer token.

use crate::problem::Problem;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use http::{header, request::Parts, HeaderMap};
use std::sync::Arc;
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "idgm_session";

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "CUSTOMER" | "USER" => Some(Role::Customer),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Resolves a raw session token to the principal that owns it
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` for unknown or expired tokens
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Principal>>;
}

/// Extract the session token from the cookie header or `Authorization: Bearer`
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string());

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
        })
        .filter(|token| !token.is_empty())
}

async fn resolve_principal(parts: &Parts) -> Result<Principal, Problem> {
    let resolver = parts
        .extensions
        .get::<Arc<dyn SessionResolver>>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("SessionResolver extension is not installed on the router");
            Problem::internal()
        })?;

    let token = session_token(&parts.headers).ok_or_else(Problem::unauthorized)?;

    match resolver.resolve(&token).await {
        Ok(Some(principal)) => Ok(principal),
        Ok(None) => Err(Problem::unauthorized()),
        Err(e) => {
            tracing::error!(error = ?e, "Session resolution failed");
            Err(Problem::internal())
        }
    }
}

/// Any authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_principal(parts).await.map(AuthUser)
    }
}

/// An authenticated caller with the ADMIN role
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = resolve_principal(parts).await?;
        if !principal.is_admin() {
            return Err(Problem::forbidden());
        }
        Ok(AdminUser(principal))
    }
}
