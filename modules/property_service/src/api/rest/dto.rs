//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Properties =====

/// Listing entry with occupancy counts
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    #[serde(rename = "type")]
    #[schema(example = "APARTMENT")]
    pub property_type: String,

    pub address: String,
    pub city: String,
    pub state: String,
    pub unit_count: u64,
    pub occupied_units: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A property with every unit and its occupancy
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetailDto {
    #[serde(flatten)]
    pub property: PropertyDto,
    pub units: Vec<UnitDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Admin create and full update
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

// ===== Units =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub id: Uuid,
    pub property_id: Uuid,
    #[schema(example = "Flat 2B")]
    pub label: String,
    pub bedrooms: i32,
    pub bathrooms: i32,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 350000.0)]
    pub monthly_rent: Decimal,

    pub occupied: bool,
    pub active_lease_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitRequest {
    pub label: String,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[schema(value_type = f64)]
    pub monthly_rent: Decimal,
}

// ===== Leases =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaseDto {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_name: String,
    pub tenant_email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub monthly_rent: Decimal,

    #[schema(example = "ACTIVE")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New lease; rent falls back to the unit's when omitted
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaseRequest {
    pub unit_id: Uuid,
    pub tenant_name: String,
    pub tenant_email: String,
    #[schema(example = "2025-01-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2025-12-31")]
    pub end_date: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub monthly_rent: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLeaseStatusRequest {
    #[schema(example = "ENDED")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseListQuery {
    pub status: Option<String>,
    pub unit_id: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
