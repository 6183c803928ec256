//! Route registration

use super::handlers::{self, CookiePolicy};
use crate::domain::Service;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    cookies: CookiePolicy,
) -> anyhow::Result<Router> {
    let routes = Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/session", get(handlers::current_session))
        .route(
            "/api/admin/users",
            get(handlers::list_users).patch(handlers::update_role),
        )
        .layer(Extension(cookies))
        .layer(Extension(service));

    Ok(router.merge(routes))
}
