//! Payload checks for catalog, checkout and payment requests
//!
//! Every check collects all failures so the client can highlight each field.

use crate::contract::{PaymentProvider, PaymentRequest, ProductDraft, ShippingAddress};
use idgm_kit::{validation::is_valid_email, FieldError};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Payment request after shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayment {
    pub email: String,
    pub amount: Decimal,
    pub provider: PaymentProvider,
    pub currency: String,
    pub order_id: Option<Uuid>,
    pub callback_url: Option<String>,
}

pub fn validate_payment(
    req: &PaymentRequest,
    default_currency: &str,
) -> Result<ValidatedPayment, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = req.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }

    if req.amount <= Decimal::ZERO {
        errors.push(FieldError::new("amount", "must be greater than 0"));
    }

    let provider = PaymentProvider::parse(&req.provider);
    if provider.is_none() {
        errors.push(FieldError::new(
            "provider",
            "must be one of paystack, flutterwave",
        ));
    }

    let currency = req
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(default_currency)
        .to_ascii_uppercase();
    if !is_currency_code(&currency) {
        errors.push(FieldError::new("currency", "must be a 3-letter currency code"));
    }

    let callback_url = req
        .callback_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    if let Some(raw) = callback_url {
        if !is_http_url(raw) {
            errors.push(FieldError::new("callbackUrl", "must be an http(s) URL"));
        }
    }

    match provider {
        Some(provider) if errors.is_empty() => Ok(ValidatedPayment {
            email,
            amount: req.amount,
            provider,
            currency,
            order_id: req.order_id,
            callback_url: callback_url.map(str::to_string),
        }),
        _ => Err(errors),
    }
}

pub fn validate_product(draft: &ProductDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "must not be empty"));
    }
    if draft.category.trim().is_empty() {
        errors.push(FieldError::new("category", "must not be empty"));
    }
    if draft.price <= Decimal::ZERO {
        errors.push(FieldError::new("price", "must be greater than 0"));
    }
    if let Some(sale) = draft.sale_price {
        if sale < Decimal::ZERO {
            errors.push(FieldError::new("salePrice", "must not be negative"));
        } else if sale >= draft.price {
            errors.push(FieldError::new("salePrice", "must be lower than price"));
        }
    }
    if let (Some(start), Some(end)) = (draft.sale_starts_at, draft.sale_ends_at) {
        if start >= end {
            errors.push(FieldError::new("saleEndsAt", "must be after saleStartsAt"));
        }
    }
    if let Some(url) = draft.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !is_http_url(url) {
            errors.push(FieldError::new("imageUrl", "must be an http(s) URL"));
        }
    }

    errors
}

pub fn validate_stock_levels(quantity: Option<i32>, threshold: Option<i32>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if quantity.is_some_and(|q| q < 0) {
        errors.push(FieldError::new("quantity", "must not be negative"));
    }
    if threshold.is_some_and(|t| t < 0) {
        errors.push(FieldError::new("threshold", "must not be negative"));
    }
    errors
}

pub fn validate_shipping(shipping: &ShippingAddress) -> Vec<FieldError> {
    [
        ("shipping.name", &shipping.name),
        ("shipping.phone", &shipping.phone),
        ("shipping.address", &shipping.address),
        ("shipping.city", &shipping.city),
        ("shipping.state", &shipping.state),
        ("shipping.country", &shipping.country),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| FieldError::new(field, "must not be empty"))
    .collect()
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_http_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
