//! Module declaration and lifecycle implementation

use crate::api::native::NativeClient;
use crate::api::rest::handlers::CookiePolicy;
use crate::config::Config;
use crate::contract::IdentityApi;
use crate::domain::{CredentialBackend, Service};
use crate::infra::backend::HttpCredentialBackend;
use crate::infra::storage::repositories::{SeaOrmSessionRepository, SeaOrmUserRepository};
use anyhow::Result;
use idgm_kit::{DbModule, RestfulModule, SessionResolver};
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Identity service module
pub struct IdentityServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for IdentityServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl IdentityServiceModule {
    /// Wire repositories, the optional auth backend and the domain service
    pub fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let sessions = Arc::new(SeaOrmSessionRepository::new(db));

        let backend: Option<Arc<dyn CredentialBackend>> = match cfg.backend_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                tracing::info!(backend_url = %url, "Delegating login to external auth backend");
                Some(Arc::new(HttpCredentialBackend::new(url, cfg.backend_timeout)?))
            }
            _ => None,
        };

        let service = Arc::new(Service::new(users, sessions, backend, cfg.session_ttl));
        *self.service.write() = Some(service);
        *self.config.write() = cfg;

        tracing::info!("Identity service initialized");
        Ok(())
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Identity service not initialized"))
    }

    /// In-process client for other modules and the server binary
    pub fn client(&self) -> Result<Arc<dyn IdentityApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Session resolver installed on the top-level router
    pub fn session_resolver(&self) -> Result<Arc<dyn SessionResolver>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Background loop purging expired sessions until cancelled
    pub async fn serve(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        let service = self.service()?;
        let period = self
            .config
            .read()
            .session_purge_interval
            .max(std::time::Duration::from_secs(1));
        let mut ticker = tokio::time::interval(period);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    match service.purge_expired_sessions().await {
                        Ok(0) => {}
                        Ok(n) => tracing::info!(purged = n, "Expired sessions purged"),
                        Err(e) => tracing::warn!(error = %e, "Session purge failed"),
                    }
                }
            }
        }

        tracing::info!("Identity session purge loop stopped");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DbModule for IdentityServiceModule {
    async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Identity service migrations completed");
        Ok(())
    }
}

impl RestfulModule for IdentityServiceModule {
    fn name(&self) -> &'static str {
        "identity_service"
    }

    fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let cookies = CookiePolicy {
            secure: self.config.read().secure_cookies,
            max_age_secs: service.session_ttl().as_secs(),
        };

        tracing::info!("Registering identity service REST routes");
        crate::api::rest::routes::register_routes(router, service, cookies)
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi;
        crate::api::rest::IdentityApiDoc::openapi()
    }
}
