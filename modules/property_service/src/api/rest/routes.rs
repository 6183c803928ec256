//! Route registration

use super::handlers::{self, PagingPolicy};
use crate::domain::Service;
use axum::{
    routing::{get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    paging: PagingPolicy,
) -> anyhow::Result<Router> {
    let routes = Router::new()
        .route("/api/properties", get(handlers::list_properties))
        .route("/api/properties/{id}", get(handlers::get_property))
        .route("/api/admin/properties", post(handlers::create_property))
        .route(
            "/api/admin/properties/{id}",
            put(handlers::update_property).delete(handlers::delete_property),
        )
        .route("/api/admin/properties/{id}/units", post(handlers::add_unit))
        .route(
            "/api/admin/leases",
            get(handlers::list_leases).post(handlers::create_lease),
        )
        .route("/api/admin/leases/{id}", patch(handlers::update_lease_status))
        .layer(Extension(paging))
        .layer(Extension(service));

    Ok(router.merge(routes))
}
