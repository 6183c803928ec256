//! Module declaration and lifecycle implementation

use crate::api::rest::handlers::PagingPolicy;
use crate::config::Config;
use crate::domain::{EventPublisher, LoggingEventPublisher, Repositories, Service};
use crate::infra::storage::repositories::{
    SeaOrmLeaseRepository, SeaOrmPropertyRepository, SeaOrmUnitRepository,
};
use anyhow::Result;
use idgm_kit::{DbModule, RestfulModule};
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Property service module
pub struct PropertyServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for PropertyServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl PropertyServiceModule {
    pub fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let repos = Repositories {
            properties: Arc::new(SeaOrmPropertyRepository::new(db.clone())),
            units: Arc::new(SeaOrmUnitRepository::new(db.clone())),
            leases: Arc::new(SeaOrmLeaseRepository::new(db)),
        };
        let events: Arc<dyn EventPublisher> = Arc::new(LoggingEventPublisher);

        *self.service.write() = Some(Arc::new(Service::new(repos, events)));
        *self.config.write() = cfg;

        tracing::info!("Property service initialized");
        Ok(())
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Property service not initialized"))
    }
}

#[async_trait::async_trait]
impl DbModule for PropertyServiceModule {
    async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Property service migrations completed");
        Ok(())
    }
}

impl RestfulModule for PropertyServiceModule {
    fn name(&self) -> &'static str {
        "property_service"
    }

    fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let paging = PagingPolicy {
            max_page_size: self.config.read().max_page_size,
        };

        tracing::info!("Registering property service REST routes");
        crate::api::rest::routes::register_routes(router, service, paging)
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi;
        crate::api::rest::PropertyApiDoc::openapi()
    }
}
