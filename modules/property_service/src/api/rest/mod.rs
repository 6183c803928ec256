//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(
    dto::PropertyDto,
    dto::PropertyDetailDto,
    dto::PropertyRequest,
    dto::UnitDto,
    dto::UnitRequest,
    dto::LeaseDto,
    dto::LeaseRequest,
    dto::UpdateLeaseStatusRequest,
    idgm_kit::Problem,
    idgm_kit::FieldError,
)))]
pub struct PropertyApiDoc;
