//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::PropertyError;
use idgm_kit::Problem;

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: PropertyError) -> Problem {
    match error {
        PropertyError::NotFound { resource, id } => Problem::not_found(&resource, &id),
        PropertyError::Validation { errors } => Problem::validation(errors),
        PropertyError::Conflict { reason } => Problem::conflict(reason),
        PropertyError::InvalidTransition { from, to } => Problem::conflict(format!(
            "Lease cannot move from {} to {}; only ACTIVE leases can be closed",
            from, to
        )),
        PropertyError::Internal => Problem::internal(),
    }
}
