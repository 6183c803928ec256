//! REST DTOs with serde derives for HTTP API
//!
//! Money leaves the service as JSON numbers; request bodies accept either
//! numbers or numeric strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Catalog =====

/// Storefront product
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "ankara-print-dress")]
    pub slug: String,
    pub description: String,
    pub category: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 25000.0)]
    pub price: Decimal,

    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub sale_price: Option<Decimal>,

    pub sale_starts_at: Option<DateTime<Utc>>,
    pub sale_ends_at: Option<DateTime<Utc>>,

    /// Price a buyer pays right now
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub effective_price: Decimal,

    pub on_sale: bool,
    pub image_url: Option<String>,
    pub is_active: bool,

    #[schema(example = "IN_STOCK")]
    pub stock_status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storefront listing query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Admin product create and full update
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,

    #[schema(value_type = f64)]
    pub price: Decimal,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub sale_price: Option<Decimal>,

    #[serde(default)]
    pub sale_starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sale_ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,

    /// Initial stock; create only
    #[serde(default)]
    pub quantity: Option<i32>,

    /// Low-stock threshold; create only
    #[serde(default)]
    pub threshold: Option<i32>,

    /// Reactivate or hide; update only
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Stock row for the admin inventory view
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDto {
    pub product_id: Uuid,
    pub product_name: String,
    pub slug: String,
    pub category: String,
    pub quantity: i32,
    pub threshold: i32,

    #[schema(example = "LOW_STOCK")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryQuery {
    /// `low` or `out`
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub product_id: Uuid,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub threshold: Option<i32>,
}

// ===== Cart & Wishlist =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub id: Uuid,
    pub items: Vec<CartItemDto>,

    /// Sum of captured line prices
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub subtotal: Decimal,

    pub item_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub quantity: i32,

    /// Price captured when the line was added
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,

    /// Live effective price of the product
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub current_price: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub line_total: Decimal,

    pub stock_status: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub item_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemQuery {
    pub item_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemDto {
    pub id: Uuid,
    pub product: ProductDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistQuery {
    pub product_id: Option<String>,
}

// ===== Orders =====

/// Shipping address; missing fields are reported by validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ShippingDto {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub shipping: ShippingDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_email: String,

    #[schema(example = "PENDING")]
    pub status: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,

    pub shipping: ShippingDto,
    pub items: Vec<OrderItemDto>,

    /// Statuses an admin may move this order to
    pub allowed_next: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub category: String,
    pub quantity: i32,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminOrdersQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_id: Uuid,

    #[schema(example = "PAID")]
    pub status: String,
}

// ===== Payments =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentRequest {
    #[serde(default)]
    pub email: String,

    #[schema(value_type = f64, example = 15000.0)]
    pub amount: Decimal,

    #[serde(default)]
    #[schema(example = "paystack")]
    pub provider: String,

    #[serde(default)]
    #[schema(example = "NGN")]
    pub currency: Option<String>,

    #[serde(default)]
    pub order_id: Option<Uuid>,

    #[serde(default)]
    pub callback_url: Option<String>,

    /// Snapshot stored in the payment metadata
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub shipping: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub items: Option<Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitDto {
    #[schema(example = "IDGM-1730000000000-a1B2c3D4")]
    pub reference: String,
    pub authorization_url: String,
    pub provider: String,
    pub payment_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
    pub user_id: Uuid,
    pub provider: String,
    pub reference: String,
    pub provider_reference: Option<String>,
    pub email: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,

    pub currency: String,

    #[schema(example = "SUCCESS")]
    pub status: String,

    #[schema(value_type = Object)]
    pub metadata: Value,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminPaymentsQuery {
    pub status: Option<String>,
    pub provider: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

// ===== Analytics =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub period: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsDto {
    #[serde(rename = "type")]
    #[schema(example = "overview")]
    pub kind: String,

    #[schema(example = "30d")]
    pub period: String,

    pub data: AnalyticsData,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnalyticsData {
    Overview(OverviewDto),
    Revenue(Vec<DailyRevenueDto>),
    Categories(Vec<CategorySalesDto>),
    Providers(Vec<ProviderStatsDto>),
    TopProducts(Vec<ProductSalesDto>),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,

    pub orders: u64,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_order_value: Decimal,

    pub customers: u64,
    pub payments_succeeded: u64,
    pub payments_failed: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyRevenueDto {
    #[schema(value_type = String, example = "2025-03-01")]
    pub date: NaiveDate,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,

    pub orders: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategorySalesDto {
    pub category: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,

    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderStatsDto {
    pub provider: String,
    pub succeeded: u64,
    pub failed: u64,
    pub initiated: u64,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesDto {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,
}
