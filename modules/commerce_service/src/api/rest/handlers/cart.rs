//! Cart of the authenticated user

use super::required_uuid;
use crate::api::rest::{dto::*, error::map_domain_error};
use crate::domain::Service;
use axum::{extract::Query, http::StatusCode, Extension, Json};
use idgm_kit::{AuthUser, JsonBody, Problem};
use std::sync::Arc;

pub async fn get_cart(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<CartDto>, Problem> {
    let cart = service
        .get_cart(principal.user_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(cart.into()))
}

/// Add a product; an existing line has its quantity increased
pub async fn add_to_cart(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    JsonBody(req): JsonBody<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartDto>), Problem> {
    let cart = service
        .add_to_cart(principal.user_id, req.product_id, req.quantity)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(cart.into())))
}

/// Set a line quantity; zero or less removes the line
pub async fn update_cart_item(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    JsonBody(req): JsonBody<UpdateCartItemRequest>,
) -> Result<Json<CartDto>, Problem> {
    let cart = service
        .update_cart_item(principal.user_id, req.item_id, req.quantity)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(cart.into()))
}

pub async fn remove_cart_item(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    Query(query): Query<CartItemQuery>,
) -> Result<Json<CartDto>, Problem> {
    let item_id = required_uuid("itemId", query.item_id.as_deref())?;
    let cart = service
        .remove_cart_item(principal.user_id, item_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(cart.into()))
}

pub async fn clear_cart(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<CartDto>, Problem> {
    let cart = service
        .clear_cart(principal.user_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(cart.into()))
}
