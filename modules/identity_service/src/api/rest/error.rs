//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::IdentityError;
use axum::http::StatusCode;
use idgm_kit::Problem;

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: IdentityError) -> Problem {
    match error {
        IdentityError::NotFound { resource, id } => Problem::not_found(&resource, &id),

        IdentityError::Validation { errors } => Problem::validation(errors),

        IdentityError::InvalidCredentials => Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("Invalid email or password"),

        IdentityError::Conflict { reason } => Problem::conflict(reason),

        IdentityError::Internal => Problem::internal(),
    }
}
