//! Public storefront catalog

use super::{invalid, optional, PagingPolicy};
use crate::api::rest::{dto::*, error::map_domain_error};
use crate::contract::{ProductFilter, ProductSort};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use chrono::Utc;
use idgm_kit::{Page, Problem};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Active products with filters, sort and pagination
pub async fn list_products(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Page<ProductDto>>, Problem> {
    let filter = ProductFilter {
        category: query.category,
        search: query.search,
        min_price: price_bound("minPrice", query.min_price.as_deref())?,
        max_price: price_bound("maxPrice", query.max_price.as_deref())?,
        sort: optional(
            "sort",
            query.sort.as_deref(),
            ProductSort::parse,
            ProductSort::VALUES,
        )?
        .unwrap_or_default(),
    };
    let page = paging.page(query.page, query.limit);

    let products = service
        .list_products(&filter, page)
        .await
        .map_err(map_domain_error)?;

    let now = Utc::now();
    Ok(Json(products.map(|item| ProductDto::at(item, now))))
}

/// One active product by id or slug
pub async fn get_product(
    Extension(service): Extension<Arc<Service>>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ProductDto>, Problem> {
    let product = service
        .get_product(&id_or_slug)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(product.into()))
}

fn price_bound(field: &str, raw: Option<&str>) -> Result<Option<Decimal>, Problem> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse::<Decimal>()
            .ok()
            .filter(|d| !d.is_sign_negative())
            .map(Some)
            .ok_or_else(|| invalid(field, "must be a non-negative number")),
        None => Ok(None),
    }
}
