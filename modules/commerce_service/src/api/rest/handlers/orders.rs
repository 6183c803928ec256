//! Checkout and the caller's order history

use super::PagingPolicy;
use crate::api::rest::{dto::*, error::map_domain_error};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use idgm_kit::{AuthUser, JsonBody, Page, Problem};
use std::sync::Arc;
use uuid::Uuid;

/// Place a PENDING order from the cart
pub async fn checkout(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderDto>), Problem> {
    let order = service
        .checkout(&principal, req.shipping.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn list_orders(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    AuthUser(principal): AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<OrderDto>>, Problem> {
    let orders = service
        .list_user_orders(principal.user_id, paging.page(query.page, query.limit))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(orders.map(Into::into)))
}

pub async fn get_order(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDto>, Problem> {
    let order = service
        .get_user_order(principal.user_id, order_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(order.into()))
}
