//! Module wiring and HTTP router assembly

use crate::config::{AppConfig, ServerConfig};
use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Extension, Json, Router,
};
use commerce_service::CommerceServiceModule;
use identity_service::IdentityServiceModule;
use idgm_kit::{DbModule, RestfulModule, SessionResolver};
use property_service::PropertyServiceModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Every module the server hosts, initialized against one connection pool
pub struct Modules {
    pub identity: Arc<IdentityServiceModule>,
    pub commerce: Arc<CommerceServiceModule>,
    pub property: Arc<PropertyServiceModule>,
}

impl Modules {
    pub fn init(cfg: &AppConfig, db: Arc<DatabaseConnection>) -> Result<Self> {
        let identity = Arc::new(IdentityServiceModule::default());
        identity.init(cfg.identity.clone(), db.clone())?;

        let commerce = Arc::new(CommerceServiceModule::default());
        commerce.init(cfg.commerce.clone(), db.clone())?;

        let property = Arc::new(PropertyServiceModule::default());
        property.init(cfg.property.clone(), db)?;

        Ok(Self {
            identity,
            commerce,
            property,
        })
    }

    fn restful(&self) -> [&dyn RestfulModule; 3] {
        [&*self.identity, &*self.commerce, &*self.property]
    }
}

pub async fn connect(url: &str, max_connections: u32) -> Result<Arc<DatabaseConnection>> {
    let mut options = ConnectOptions::new(url.to_string());
    options.max_connections(max_connections).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to database at {}", redact(url)))?;
    tracing::info!(database = %redact(url), max_connections, "Database connected");
    Ok(Arc::new(db))
}

/// Apply every module's migrations; each module tracks its own history table
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    IdentityServiceModule::default()
        .migrate(db)
        .await
        .context("identity_service migrations failed")?;
    CommerceServiceModule::default()
        .migrate(db)
        .await
        .context("commerce_service migrations failed")?;
    PropertyServiceModule::default()
        .migrate(db)
        .await
        .context("property_service migrations failed")?;
    Ok(())
}

/// Merge module routes, health and OpenAPI endpoints, then the shared layers
pub fn build_router(modules: &Modules, server: &ServerConfig) -> Result<Router> {
    let resolver: Arc<dyn SessionResolver> = modules.identity.session_resolver()?;

    let mut router = Router::new().route("/health", get(health));
    let mut openapi = utoipa::openapi::OpenApiBuilder::new()
        .info(
            utoipa::openapi::InfoBuilder::new()
                .title("IDGM Universal API")
                .version(env!("CARGO_PKG_VERSION"))
                .build(),
        )
        .build();

    for module in modules.restful() {
        router = module
            .register_rest(router)
            .with_context(|| format!("{} failed to register routes", module.name()))?;
        openapi.merge(module.openapi());
        tracing::debug!(module = module.name(), "Module routes registered");
    }

    let openapi = Arc::new(openapi);
    router = router.route(
        "/api/openapi.json",
        get(move || {
            let openapi = openapi.clone();
            async move { Json(openapi.as_ref().clone()) }
        }),
    );

    Ok(router
        .layer(Extension(resolver))
        .layer(cors_layer(&server.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// No origins configured means no cross-origin access
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::new());
    }
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{}'", o))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Drop credentials from a connection URL before logging it
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => {
            format!("{}://***{}", &url[..scheme], &url[at..])
        }
        _ => url.to_string(),
    }
}
