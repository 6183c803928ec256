//! Route registration

use super::handlers::{admin, cart, catalog, orders, payments, wishlist, PagingPolicy};
use crate::domain::Service;
use axum::{
    routing::{delete, get, post, put},
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
        // Storefront
        .route("/api/products", get(catalog::list_products))
        .route("/api/products/{id_or_slug}", get(catalog::get_product))
        .route(
            "/api/cart",
            get(cart::get_cart)
                .post(cart::add_to_cart)
                .put(cart::update_cart_item)
                .delete(cart::remove_cart_item),
        )
        .route("/api/cart/clear", delete(cart::clear_cart))
        .route(
            "/api/wishlist",
            get(wishlist::list_wishlist)
                .post(wishlist::add_to_wishlist)
                .delete(wishlist::remove_from_wishlist),
        )
        .route("/api/orders", get(orders::list_orders).post(orders::checkout))
        .route("/api/orders/{id}", get(orders::get_order))
        .route("/api/payments/initialize", post(payments::initialize_payment))
        .route("/api/payments/verify", get(payments::verify_payment))
        // Admin
        .route(
            "/api/admin/orders",
            get(admin::list_orders).patch(admin::update_order_status),
        )
        .route("/api/admin/payments", get(admin::list_payments))
        .route("/api/admin/products", post(admin::create_product))
        .route(
            "/api/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route(
            "/api/admin/inventory",
            get(admin::list_inventory).patch(admin::update_inventory),
        )
        .route("/api/admin/analytics", get(admin::analytics))
        .layer(Extension(paging))
        .layer(Extension(service));

    Ok(router.merge(routes))
}
