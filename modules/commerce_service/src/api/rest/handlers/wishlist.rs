use super::required_uuid;
use crate::api::rest::{dto::*, error::map_domain_error};
use crate::domain::Service;
use axum::{extract::Query, http::StatusCode, Extension, Json};
use idgm_kit::{AuthUser, JsonBody, Problem};
use std::sync::Arc;

pub async fn list_wishlist(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Vec<WishlistItemDto>>, Problem> {
    let entries = service
        .list_wishlist(principal.user_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn add_to_wishlist(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    JsonBody(req): JsonBody<AddToWishlistRequest>,
) -> Result<(StatusCode, Json<WishlistItemDto>), Problem> {
    let entry = service
        .add_to_wishlist(principal.user_id, req.product_id)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

pub async fn remove_from_wishlist(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    Query(query): Query<WishlistQuery>,
) -> Result<StatusCode, Problem> {
    let product_id = required_uuid("productId", query.product_id.as_deref())?;
    service
        .remove_from_wishlist(principal.user_id, product_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
