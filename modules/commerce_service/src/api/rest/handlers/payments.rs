use super::invalid;
use crate::api::rest::{dto::*, error::map_domain_error};
use crate::contract::PaymentRequest;
use crate::domain::Service;
use axum::{extract::Query, Extension, Json};
use idgm_kit::{AuthUser, JsonBody, Problem};
use std::sync::Arc;

/// Create a payment and return the provider redirect
pub async fn initialize_payment(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    JsonBody(req): JsonBody<InitializePaymentRequest>,
) -> Result<Json<PaymentInitDto>, Problem> {
    let request = PaymentRequest {
        email: req.email,
        amount: req.amount,
        provider: req.provider,
        currency: req.currency,
        order_id: req.order_id,
        callback_url: req.callback_url,
        shipping: req.shipping,
        items: req.items,
    };

    let init = service
        .initialize_payment(&principal, request)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(init.into()))
}

/// Confirm a payment with its provider
pub async fn verify_payment(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(principal): AuthUser,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<PaymentDto>, Problem> {
    let reference = query
        .reference
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| invalid("reference", "is required"))?;

    let payment = service
        .verify_payment(&principal, reference)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(payment.into()))
}
