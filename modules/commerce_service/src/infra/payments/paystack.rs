//! Paystack transaction API
//!
//! `POST /transaction/initialize` takes the amount in minor units (kobo);
//! `GET /transaction/verify/{reference}` reports `data.status == "success"`.

use super::{malformed, normalize_base_url, read_json, secret, transport};
use crate::contract::PaymentProvider;
use crate::domain::{ChargeRequest, ChargeSession, GatewayError, PaymentGateway, Verification};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub struct PaystackGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: Option<String>,
}

impl PaystackGateway {
    pub fn new(client: reqwest::Client, base_url: &str, secret_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            secret_key,
        })
    }
}

#[derive(Serialize)]
struct InitializeBody<'a> {
    email: &'a str,
    amount: i64,
    currency: &'a str,
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    metadata: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Deserialize)]
struct InitializeData {
    authorization_url: String,
    #[serde(default)]
    reference: Option<String>,
}

#[derive(Deserialize)]
struct VerifyData {
    status: String,
}

/// Major units to kobo/pesewas/cents
fn minor_units(amount: Decimal) -> Result<i64, GatewayError> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| GatewayError::Rejected(format!("amount {} is out of range", amount)))
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Paystack
    }

    async fn initialize(&self, charge: &ChargeRequest) -> Result<ChargeSession, GatewayError> {
        let key = secret(&self.secret_key)?;
        let body = InitializeBody {
            email: &charge.email,
            amount: minor_units(charge.amount)?,
            currency: &charge.currency,
            reference: &charge.reference,
            callback_url: charge.callback_url.as_deref(),
            metadata: &charge.metadata,
        };

        let response = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let raw = read_json(response).await?;
        let envelope: Envelope<InitializeData> =
            serde_json::from_value(raw.clone()).map_err(malformed)?;
        let data = match envelope.data {
            Some(data) if envelope.status => data,
            _ => return Err(GatewayError::Rejected(envelope.message)),
        };

        Ok(ChargeSession {
            authorization_url: data.authorization_url,
            provider_reference: data.reference,
            raw: raw.get("data").cloned().unwrap_or_default(),
        })
    }

    async fn verify(&self, reference: &str) -> Result<Verification, GatewayError> {
        let key = secret(&self.secret_key)?;
        let response = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(key)
            .send()
            .await
            .map_err(transport)?;

        let raw = read_json(response).await?;
        let envelope: Envelope<VerifyData> =
            serde_json::from_value(raw.clone()).map_err(malformed)?;
        let data = match envelope.data {
            Some(data) if envelope.status => data,
            _ => return Err(GatewayError::Rejected(envelope.message)),
        };

        Ok(Verification {
            succeeded: data.status == "success",
            raw: raw.get("data").cloned().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_rounds_to_kobo() {
        assert_eq!(minor_units(Decimal::new(150_050, 2)).unwrap(), 150_050);
        assert_eq!(minor_units(Decimal::new(1_999, 3)).unwrap(), 200);
    }
}
