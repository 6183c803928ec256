//! Flutterwave Standard checkout API
//!
//! `POST /v3/payments` returns the hosted page in `data.link`;
//! `GET /v3/transactions/verify_by_reference?tx_ref=` reports
//! `data.status == "successful"`.

use super::{malformed, normalize_base_url, read_json, secret, transport};
use crate::contract::PaymentProvider;
use crate::domain::{ChargeRequest, ChargeSession, GatewayError, PaymentGateway, Verification};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub struct FlutterwaveGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: Option<String>,
}

impl FlutterwaveGateway {
    pub fn new(client: reqwest::Client, base_url: &str, secret_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            secret_key,
        })
    }
}

#[derive(Serialize)]
struct PaymentBody<'a> {
    tx_ref: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<&'a str>,
    customer: Customer<'a>,
    meta: &'a serde_json::Value,
}

#[derive(Serialize)]
struct Customer<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T, GatewayError> {
        match self.data {
            Some(data) if self.status == "success" => Ok(data),
            _ => Err(GatewayError::Rejected(self.message)),
        }
    }
}

#[derive(Deserialize)]
struct PaymentData {
    link: String,
}

#[derive(Deserialize)]
struct VerifyData {
    status: String,
}

#[async_trait]
impl PaymentGateway for FlutterwaveGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Flutterwave
    }

    async fn initialize(&self, charge: &ChargeRequest) -> Result<ChargeSession, GatewayError> {
        let key = secret(&self.secret_key)?;
        let body = PaymentBody {
            tx_ref: &charge.reference,
            amount: charge.amount,
            currency: &charge.currency,
            redirect_url: charge.callback_url.as_deref(),
            customer: Customer {
                email: &charge.email,
            },
            meta: &charge.metadata,
        };

        let response = self
            .client
            .post(format!("{}/v3/payments", self.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let raw = read_json(response).await?;
        let data = serde_json::from_value::<Envelope<PaymentData>>(raw.clone())
            .map_err(malformed)?
            .into_data()?;

        Ok(ChargeSession {
            authorization_url: data.link,
            provider_reference: None,
            raw: raw.get("data").cloned().unwrap_or_default(),
        })
    }

    async fn verify(&self, reference: &str) -> Result<Verification, GatewayError> {
        let key = secret(&self.secret_key)?;
        let endpoint = url::Url::parse_with_params(
            &format!("{}/v3/transactions/verify_by_reference", self.base_url),
            &[("tx_ref", reference)],
        )
        .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(key)
            .send()
            .await
            .map_err(transport)?;

        let raw = read_json(response).await?;
        let data = serde_json::from_value::<Envelope<VerifyData>>(raw.clone())
            .map_err(malformed)?
            .into_data()?;

        Ok(Verification {
            succeeded: data.status == "successful",
            raw: raw.get("data").cloned().unwrap_or_default(),
        })
    }
}
