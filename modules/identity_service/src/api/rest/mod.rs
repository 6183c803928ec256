//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(
    dto::UserDto,
    dto::SessionDto,
    dto::RegisterRequest,
    dto::LoginRequest,
    dto::UpdateRoleRequest,
    idgm_kit::Problem,
    idgm_kit::FieldError,
)))]
pub struct IdentityApiDoc;
