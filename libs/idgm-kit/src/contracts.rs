//! Module lifecycle contracts
//!
//! The server owns the database connection and the top-level router; each
//! module contributes its schema migrations and REST routes through these
//! traits.

use async_trait::async_trait;
use axum::Router;
use sea_orm::DatabaseConnection;

/// A module that owns database tables
#[async_trait]
pub trait DbModule: Send + Sync {
    /// Apply pending migrations for this module's tables
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()>;
}

/// A module that exposes REST endpoints
pub trait RestfulModule: Send + Sync {
    /// Stable module name used in logs
    fn name(&self) -> &'static str;

    /// Merge this module's routes into `router`
    fn register_rest(&self, router: Router) -> anyhow::Result<Router>;

    /// OpenAPI components contributed by this module
    fn openapi(&self) -> utoipa::openapi::OpenApi;
}
