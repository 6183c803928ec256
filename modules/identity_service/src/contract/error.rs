//! Contract error types for identity service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use idgm_kit::FieldError;
use thiserror::Error;

/// Identity service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// User not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Payload failed validation
    #[error("Validation error: {}", format_fields(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Email/password pair did not match
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Duplicate email and similar
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl IdentityError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn user_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        }
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
