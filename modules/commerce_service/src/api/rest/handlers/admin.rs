//! Admin back office: orders, payments, catalog, inventory and analytics

use super::{invalid, optional, PagingPolicy};
use crate::api::rest::{dto::*, error::map_domain_error};
use crate::contract::{
    AnalyticsKind, OrderFilter, OrderStatus, PaymentFilter, PaymentProvider, PaymentStatus,
    Period, ProductDraft, StockFilter,
};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use idgm_kit::{AdminUser, JsonBody, Page, Problem};
use std::sync::Arc;
use uuid::Uuid;

// ===== Orders =====

pub async fn list_orders(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<AdminOrdersQuery>,
) -> Result<Json<Page<OrderDto>>, Problem> {
    let filter = OrderFilter {
        user_id: None,
        status: optional(
            "status",
            query.status.as_deref(),
            OrderStatus::parse,
            &OrderStatus::accepted_values(),
        )?,
        search: query.search,
    };

    let orders = service
        .list_orders(&filter, paging.page(query.page, query.limit))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(orders.map(Into::into)))
}

/// Move an order through the status machine
pub async fn update_order_status(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(admin): AdminUser,
    JsonBody(req): JsonBody<UpdateOrderStatusRequest>,
) -> Result<Json<OrderDto>, Problem> {
    let order = service
        .update_order_status(admin.user_id, req.order_id, &req.status)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(order.into()))
}

// ===== Payments =====

pub async fn list_payments(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<AdminPaymentsQuery>,
) -> Result<Json<Page<PaymentDto>>, Problem> {
    let filter = PaymentFilter {
        status: optional(
            "status",
            query.status.as_deref(),
            PaymentStatus::parse,
            "INITIATED, SUCCESS, FAILED",
        )?,
        provider: optional(
            "provider",
            query.provider.as_deref(),
            PaymentProvider::parse,
            "paystack, flutterwave",
        )?,
    };

    let payments = service
        .list_payments(&filter, paging.page(query.page, query.limit))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(payments.map(Into::into)))
}

// ===== Catalog =====

pub async fn create_product(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    JsonBody(req): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>), Problem> {
    let product = service
        .create_product(ProductDraft::from(&req), req.quantity, req.threshold)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn update_product(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> Result<Json<ProductDto>, Problem> {
    let product = service
        .update_product(id, ProductDraft::from(&req), req.is_active)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(product.into()))
}

/// Soft delete
pub async fn delete_product(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service.delete_product(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Inventory =====

pub async fn list_inventory(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Page<InventoryDto>>, Problem> {
    let filter = optional("status", query.status.as_deref(), StockFilter::parse, "low, out")?;

    let items = service
        .list_inventory(filter, paging.page(query.page, query.limit))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(items.map(Into::into)))
}

pub async fn update_inventory(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    JsonBody(req): JsonBody<UpdateInventoryRequest>,
) -> Result<Json<InventoryDto>, Problem> {
    let item = service
        .update_inventory(req.product_id, req.quantity, req.threshold)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(item.into()))
}

// ===== Analytics =====

pub async fn analytics(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsDto>, Problem> {
    let kind = optional(
        "type",
        query.kind.as_deref(),
        AnalyticsKind::parse,
        AnalyticsKind::VALUES,
    )?
    .unwrap_or_default();
    let period = optional("period", query.period.as_deref(), Period::parse, Period::VALUES)?
        .unwrap_or_default();
    if query.limit == Some(0) {
        return Err(invalid("limit", "must be at least 1"));
    }

    let report = service
        .analytics(kind, period, query.limit)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(AnalyticsDto {
        kind: kind.as_str().to_string(),
        period: period.as_str().to_string(),
        data: report.into(),
    }))
}
