//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::CommerceError;
use axum::http::StatusCode;
use idgm_kit::Problem;

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: CommerceError) -> Problem {
    match error {
        CommerceError::NotFound { resource, id } => Problem::not_found(&resource, &id),

        CommerceError::Validation { errors } => Problem::validation(errors),

        CommerceError::Conflict { reason } => Problem::conflict(reason),

        CommerceError::InsufficientStock {
            product_id,
            requested,
            available,
        } => {
            tracing::debug!(%product_id, requested, available, "Rejected for insufficient stock");
            Problem::conflict("insufficient stock")
                .with_instance(format!("/api/products/{}", product_id))
        }

        CommerceError::InvalidTransition { from, to } => {
            let allowed = from
                .allowed_next()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>();
            let detail = if allowed.is_empty() {
                format!("Order status {} is terminal; cannot move to {}", from, to)
            } else {
                format!(
                    "Order cannot move from {} to {}; allowed: {}",
                    from,
                    to,
                    allowed.join(", ")
                )
            };
            Problem::conflict(detail)
        }

        CommerceError::Provider { provider, message } => {
            tracing::error!(provider = %provider, message = %message, "Payment provider failure");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Payment provider error")
                .with_detail("The payment provider could not process the request")
        }

        CommerceError::Configuration { reason } => {
            tracing::error!(reason = %reason, "Commerce configuration error");
            Problem::internal()
        }

        CommerceError::Internal => Problem::internal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{OrderStatus, PaymentProvider};

    #[test]
    fn test_provider_message_stays_out_of_response() {
        let problem = map_domain_error(CommerceError::Provider {
            provider: PaymentProvider::Paystack,
            message: "Invalid key sk_live_secret".to_string(),
        });

        assert_eq!(problem.status, 500);
        assert_eq!(problem.title, "Payment provider error");
        assert!(!problem.detail.unwrap_or_default().contains("sk_live"));
    }

    #[test]
    fn test_terminal_transition_is_conflict() {
        let problem = map_domain_error(CommerceError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Paid,
        });

        assert_eq!(problem.status, 409);
        assert!(problem.detail.unwrap_or_default().contains("terminal"));
    }

    #[test]
    fn test_insufficient_stock_detail() {
        let problem = map_domain_error(CommerceError::InsufficientStock {
            product_id: uuid::Uuid::nil(),
            requested: 3,
            available: 1,
        });

        assert_eq!(problem.status, 409);
        assert_eq!(problem.detail.as_deref(), Some("insufficient stock"));
    }
}
