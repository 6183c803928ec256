use super::model::LeaseStatus;
use idgm_kit::FieldError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("Validation error: {}", format_fields(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Leases only leave ACTIVE, and only once
    #[error("Lease cannot move from {from} to {to}")]
    InvalidTransition { from: LeaseStatus, to: LeaseStatus },

    #[error("Internal error")]
    Internal,
}

impl PropertyError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
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
