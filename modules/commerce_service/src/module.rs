//! Module declaration and lifecycle implementation

use crate::api::rest::handlers::PagingPolicy;
use crate::config::Config;
use crate::domain::{
    EventPublisher, LoggingEventPublisher, PaymentGateway, Repositories, Service, ServiceSettings,
};
use crate::infra::payments::{http_client, FlutterwaveGateway, PaystackGateway};
use crate::infra::storage::repositories::{
    SeaOrmCartRepository, SeaOrmOrderRepository, SeaOrmPaymentRepository,
    SeaOrmProductRepository, SeaOrmWishlistRepository,
};
use anyhow::Result;
use idgm_kit::{DbModule, RestfulModule};
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Commerce service module
pub struct CommerceServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for CommerceServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl CommerceServiceModule {
    /// Wire repositories, payment gateways and the domain service
    pub fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let repos = Repositories {
            products: Arc::new(SeaOrmProductRepository::new(db.clone())),
            carts: Arc::new(SeaOrmCartRepository::new(db.clone())),
            wishlists: Arc::new(SeaOrmWishlistRepository::new(db.clone())),
            orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            payments: Arc::new(SeaOrmPaymentRepository::new(db)),
        };

        let client = http_client(cfg.provider_timeout)?;
        let gateways: Vec<Arc<dyn PaymentGateway>> = vec![
            Arc::new(PaystackGateway::new(
                client.clone(),
                &cfg.paystack.base_url,
                cfg.paystack.secret_key.clone(),
            )?),
            Arc::new(FlutterwaveGateway::new(
                client,
                &cfg.flutterwave.base_url,
                cfg.flutterwave.secret_key.clone(),
            )?),
        ];
        for (provider, key) in [
            ("paystack", &cfg.paystack.secret_key),
            ("flutterwave", &cfg.flutterwave.secret_key),
        ] {
            if key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                tracing::warn!(provider, "No secret key configured; payments will fail");
            }
        }

        let events: Arc<dyn EventPublisher> = Arc::new(LoggingEventPublisher);
        let settings = ServiceSettings {
            enforce_status_transitions: cfg.enforce_status_transitions,
            default_currency: cfg.default_currency.clone(),
            top_products_limit: cfg.top_products_limit,
        };

        let service = Arc::new(Service::new(repos, gateways, events, settings));
        *self.service.write() = Some(service);
        *self.config.write() = cfg;

        tracing::info!("Commerce service initialized");
        Ok(())
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Commerce service not initialized"))
    }
}

#[async_trait::async_trait]
impl DbModule for CommerceServiceModule {
    async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Commerce service migrations completed");
        Ok(())
    }
}

impl RestfulModule for CommerceServiceModule {
    fn name(&self) -> &'static str {
        "commerce_service"
    }

    fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let paging = PagingPolicy {
            max_page_size: self.config.read().max_page_size,
        };

        tracing::info!("Registering commerce service REST routes");
        crate::api::rest::routes::register_routes(router, service, paging)
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi;
        crate::api::rest::CommerceApiDoc::openapi()
    }
}
