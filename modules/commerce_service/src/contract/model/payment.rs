use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// Supported payment gateways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentProvider {
    Paystack,
    Flutterwave,
}

impl PaymentProvider {
    pub const ALL: [PaymentProvider; 2] = [Self::Paystack, Self::Flutterwave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paystack => "paystack",
            Self::Flutterwave => "flutterwave",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "paystack" => Some(Self::Paystack),
            "flutterwave" => Some(Self::Flutterwave),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Initiated,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "INITIATED",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INITIATED" => Some(Self::Initiated),
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Initiated)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attempted external charge
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
    pub user_id: Uuid,
    pub provider: PaymentProvider,
    /// `IDGM-<unix-millis>-<8 alphanumerics>`, unique
    pub reference: String,
    pub provider_reference: Option<String>,
    pub email: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated initialization request as received from the client
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub email: String,
    pub amount: Decimal,
    pub provider: String,
    pub currency: Option<String>,
    pub order_id: Option<Uuid>,
    pub callback_url: Option<String>,
    pub shipping: Option<serde_json::Value>,
    pub items: Option<serde_json::Value>,
}

/// Result of a successful initialization
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInit {
    pub payment: Payment,
    pub authorization_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub provider: Option<PaymentProvider>,
}
