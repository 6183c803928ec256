use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Threshold applied when a product is created without one
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Catalog product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub sale_starts_at: Option<DateTime<Utc>>,
    pub sale_ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the flash sale window covers `at`; a missing bound is open
    pub fn on_sale(&self, at: DateTime<Utc>) -> bool {
        self.sale_price.is_some()
            && self.sale_starts_at.is_none_or(|start| start <= at)
            && self.sale_ends_at.is_none_or(|end| at < end)
    }

    /// Price a buyer pays at `at`
    pub fn effective_price(&self, at: DateTime<Utc>) -> Decimal {
        match self.sale_price {
            Some(sale) if self.on_sale(at) => sale,
            _ => self.price,
        }
    }
}

/// Editable product fields, shared by create and full update
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub sale_starts_at: Option<DateTime<Utc>>,
    pub sale_ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

/// On-hand stock for one product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory {
    pub product_id: Uuid,
    pub quantity: i32,
    pub threshold: i32,
}

impl Inventory {
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.threshold)
    }
}

/// Derived stock level, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn classify(quantity: i32, threshold: i32) -> Self {
        if quantity <= 0 {
            Self::OutOfStock
        } else if quantity <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "IN_STOCK",
            Self::LowStock => "LOW_STOCK",
            Self::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

/// Product joined with its inventory row
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub product: Product,
    pub inventory: Inventory,
}

/// Storefront listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    pub const VALUES: &'static str = "newest, price_asc, price_desc, name";

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "newest" => Some(Self::Newest),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Storefront listing filter; prices compare against the effective price
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: ProductSort,
}

/// Admin inventory filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFilter {
    /// Low or out of stock
    Low,
    Out,
}

impl StockFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "out" => Some(Self::Out),
            _ => None,
        }
    }

    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            Self::Low => status != StockStatus::InStock,
            Self::Out => status == StockStatus::OutOfStock,
        }
    }
}
