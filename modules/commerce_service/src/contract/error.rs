//! Contract error types for commerce service

use super::model::{OrderStatus, PaymentProvider};
use idgm_kit::FieldError;
use thiserror::Error;
use uuid::Uuid;

/// Commerce service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommerceError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("Validation error: {}", format_fields(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Requested quantity exceeds what is on hand
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Gateway rejected the call or was unreachable; the message is for logs only
    #[error("Payment provider {provider} failed: {message}")]
    Provider {
        provider: PaymentProvider,
        message: String,
    },

    /// Deployment is missing something it needs, e.g. a provider secret key
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Internal error")]
    Internal,
}

impl CommerceError {
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
