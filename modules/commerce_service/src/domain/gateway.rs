//! Payment gateway seam
//!
//! Implementations live in infra/payments/ and talk to the provider HTTP APIs.

use crate::contract::PaymentProvider;
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Charge to open with a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub reference: String,
    pub email: String,
    /// Major units; gateways convert when their API wants minor units
    pub amount: Decimal,
    pub currency: String,
    pub callback_url: Option<String>,
    pub metadata: serde_json::Value,
}

/// Hosted checkout opened by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSession {
    pub authorization_url: String,
    pub provider_reference: Option<String>,
    /// Provider response payload, stored on the payment
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub succeeded: bool,
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("secret key is not configured")]
    MissingSecretKey,

    /// Non-2xx reply or an envelope reporting failure
    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider unreachable: {0}")]
    Transport(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    async fn initialize(&self, charge: &ChargeRequest) -> Result<ChargeSession, GatewayError>;

    async fn verify(&self, reference: &str) -> Result<Verification, GatewayError>;
}
