//! Payment provider HTTP clients
//!
//! Both providers authenticate with `Authorization: Bearer <secret key>` and
//! wrap every reply in a `{status, message, data}` envelope.

pub mod flutterwave;
pub mod paystack;

pub use flutterwave::FlutterwaveGateway;
pub use paystack::PaystackGateway;

use crate::domain::GatewayError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;

/// Shared HTTP client for provider calls
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build payment provider HTTP client")
}

/// Validate a configured base URL and drop any trailing slash
fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed =
        url::Url::parse(raw).with_context(|| format!("invalid provider base URL '{}'", raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("provider base URL '{}' must be http(s)", raw);
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn secret(key: &Option<String>) -> Result<&str, GatewayError> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(GatewayError::MissingSecretKey)
}

/// Read a provider reply as JSON, turning non-2xx statuses into rejections
async fn read_json(response: reqwest::Response) -> Result<Value, GatewayError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;

    let parsed: Option<Value> = serde_json::from_str(&body).ok();
    if !status.is_success() {
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Err(GatewayError::Rejected(format!("HTTP {}: {}", status, message)));
    }

    parsed.ok_or_else(|| GatewayError::Rejected("response body is not JSON".to_string()))
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

fn malformed(e: serde_json::Error) -> GatewayError {
    GatewayError::Rejected(format!("malformed response envelope: {}", e))
}
