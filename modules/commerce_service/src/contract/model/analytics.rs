use super::payment::PaymentProvider;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Reporting window ending now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const VALUES: &'static str = "7d, 30d, 90d, 1y";

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "7d" => Some(Self::Week),
            "30d" => Some(Self::Month),
            "90d" => Some(Self::Quarter),
            "1y" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Half-open `[now - days, now)`
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.days()), now)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyticsKind {
    #[default]
    Overview,
    Revenue,
    Categories,
    Providers,
    TopProducts,
}

impl AnalyticsKind {
    pub const VALUES: &'static str = "overview, revenue, categories, providers, top-products";

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "overview" => Some(Self::Overview),
            "revenue" => Some(Self::Revenue),
            "categories" => Some(Self::Categories),
            "providers" => Some(Self::Providers),
            "top-products" => Some(Self::TopProducts),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Revenue => "revenue",
            Self::Categories => "categories",
            Self::Providers => "providers",
            Self::TopProducts => "top-products",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overview {
    pub revenue: Decimal,
    pub orders: u64,
    pub average_order_value: Decimal,
    pub customers: u64,
    pub payments_succeeded: u64,
    pub payments_failed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
    /// Revenue-counting orders placed that day
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySales {
    pub category: String,
    pub revenue: Decimal,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStats {
    pub provider: PaymentProvider,
    pub succeeded: u64,
    pub failed: u64,
    pub initiated: u64,
    /// Sum of successful payment amounts
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

/// One analytics response, shaped by the requested kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsReport {
    Overview(Overview),
    Revenue(Vec<DailyRevenue>),
    Categories(Vec<CategorySales>),
    Providers(Vec<ProviderStats>),
    TopProducts(Vec<ProductSales>),
}
