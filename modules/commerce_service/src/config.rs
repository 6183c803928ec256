//! Configuration for commerce service module

use serde::Deserialize;
use std::time::Duration;

/// Commerce service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reject order status changes outside the transition table
    #[serde(default = "default_true")]
    pub enforce_status_transitions: bool,

    /// Currency used when a payment request omits one
    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    #[serde(default = "default_paystack")]
    pub paystack: ProviderConfig,

    #[serde(default = "default_flutterwave")]
    pub flutterwave: ProviderConfig,

    /// Request timeout for payment provider calls
    #[serde(default = "default_provider_timeout", with = "humantime_serde")]
    pub provider_timeout: Duration,

    /// Default row count of the top-products report
    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: usize,
}

/// Payment provider endpoint and credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub base_url: String,

    /// Initialization fails with a configuration error while unset
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enforce_status_transitions: true,
            default_currency: default_currency(),
            max_page_size: default_max_page_size(),
            paystack: default_paystack(),
            flutterwave: default_flutterwave(),
            provider_timeout: default_provider_timeout(),
            top_products_limit: default_top_products_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "NGN".to_string()
}

fn default_max_page_size() -> u64 {
    100
}

fn default_paystack() -> ProviderConfig {
    ProviderConfig {
        base_url: "https://api.paystack.co".to_string(),
        secret_key: None,
    }
}

fn default_flutterwave() -> ProviderConfig {
    ProviderConfig {
        base_url: "https://api.flutterwave.com".to_string(),
        secret_key: None,
    }
}

fn default_provider_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_top_products_limit() -> usize {
    5
}
