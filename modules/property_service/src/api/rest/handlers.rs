//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::map_domain_error};
use crate::contract::{
    LeaseDraft, LeaseFilter, LeaseStatus, PropertyDraft, PropertyFilter, PropertyType, UnitDraft,
};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use idgm_kit::{AdminUser, FieldError, JsonBody, Page, PageRequest, Problem};
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound applied to every `limit` query parameter
#[derive(Debug, Clone, Copy)]
pub struct PagingPolicy {
    pub max_page_size: u64,
}

impl PagingPolicy {
    pub fn page(&self, page: Option<u64>, limit: Option<u64>) -> PageRequest {
        PageRequest::new(page, limit, self.max_page_size)
    }
}

// ===== Public listings =====

pub async fn list_properties(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    Query(query): Query<PropertyListQuery>,
) -> Result<Json<Page<PropertyDto>>, Problem> {
    let filter = PropertyFilter {
        city: query.city,
        property_type: optional(
            "type",
            query.property_type.as_deref(),
            PropertyType::parse,
            PropertyType::VALUES,
        )?,
        search: query.search,
    };

    let properties = service
        .list_properties(&filter, paging.page(query.page, query.limit))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(properties.map(Into::into)))
}

pub async fn get_property(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyDetailDto>, Problem> {
    let detail = service.get_property(id).await.map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

// ===== Admin: properties and units =====

pub async fn create_property(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    JsonBody(req): JsonBody<PropertyRequest>,
) -> Result<(StatusCode, Json<PropertyDto>), Problem> {
    let property = service
        .create_property(PropertyDraft::from(req))
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(property.into())))
}

/// Full replacement; the response carries current occupancy
pub async fn update_property(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<PropertyRequest>,
) -> Result<Json<PropertyDetailDto>, Problem> {
    service
        .update_property(id, PropertyDraft::from(req))
        .await
        .map_err(map_domain_error)?;
    let detail = service.get_property(id).await.map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

pub async fn delete_property(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service.delete_property(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_unit(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Path(property_id): Path<Uuid>,
    JsonBody(req): JsonBody<UnitRequest>,
) -> Result<(StatusCode, Json<UnitDto>), Problem> {
    let unit = service
        .add_unit(property_id, UnitDraft::from(req))
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(unit.into())))
}

// ===== Admin: leases =====

pub async fn list_leases(
    Extension(service): Extension<Arc<Service>>,
    Extension(paging): Extension<PagingPolicy>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<LeaseListQuery>,
) -> Result<Json<Page<LeaseDto>>, Problem> {
    let filter = LeaseFilter {
        status: optional(
            "status",
            query.status.as_deref(),
            LeaseStatus::parse,
            LeaseStatus::VALUES,
        )?,
        unit_id: match query.unit_id.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                Uuid::parse_str(raw).map_err(|_| invalid("unitId", "must be a valid UUID"))?,
            ),
            None => None,
        },
    };

    let leases = service
        .list_leases(&filter, paging.page(query.page, query.limit))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(leases.map(Into::into)))
}

pub async fn create_lease(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(admin): AdminUser,
    JsonBody(req): JsonBody<LeaseRequest>,
) -> Result<(StatusCode, Json<LeaseDto>), Problem> {
    let lease = service
        .create_lease(LeaseDraft::from(req))
        .await
        .map_err(map_domain_error)?;
    tracing::debug!(admin_id = %admin.user_id, lease_id = %lease.id, "Lease opened by admin");

    Ok((StatusCode::CREATED, Json(lease.into())))
}

/// End or terminate an ACTIVE lease
pub async fn update_lease_status(
    Extension(service): Extension<Arc<Service>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateLeaseStatusRequest>,
) -> Result<Json<LeaseDto>, Problem> {
    let lease = service
        .update_lease_status(id, &req.status)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(lease.into()))
}

fn invalid(field: &str, message: impl Into<String>) -> Problem {
    Problem::validation(vec![FieldError::new(field, message)])
}

/// Optional enum-like query parameter; blank counts as absent
fn optional<T>(
    field: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    accepted: &str,
) -> Result<Option<T>, Problem> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| invalid(field, format!("must be one of {}", accepted))),
        None => Ok(None),
    }
}
