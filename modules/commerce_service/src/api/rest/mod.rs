//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(
    dto::ProductDto,
    dto::ProductRequest,
    dto::InventoryDto,
    dto::UpdateInventoryRequest,
    dto::CartDto,
    dto::CartItemDto,
    dto::AddToCartRequest,
    dto::UpdateCartItemRequest,
    dto::WishlistItemDto,
    dto::AddToWishlistRequest,
    dto::ShippingDto,
    dto::CheckoutRequest,
    dto::OrderDto,
    dto::OrderItemDto,
    dto::UpdateOrderStatusRequest,
    dto::InitializePaymentRequest,
    dto::PaymentInitDto,
    dto::PaymentDto,
    dto::AnalyticsDto,
    dto::AnalyticsData,
    dto::OverviewDto,
    dto::DailyRevenueDto,
    dto::CategorySalesDto,
    dto::ProviderStatsDto,
    dto::ProductSalesDto,
    idgm_kit::Problem,
    idgm_kit::FieldError,
)))]
pub struct CommerceApiDoc;
