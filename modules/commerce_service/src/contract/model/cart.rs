use super::catalog::CatalogItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// One cart per user, created lazily
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Cart line; `price` is captured when the line is first added
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Cart line joined with live product data
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: CatalogItem,
}

/// Cart as rendered to its owner
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}

impl CartView {
    /// Sum of captured line prices
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.item.line_total()).sum()
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.item.quantity)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistEntry {
    pub item: WishlistItem,
    pub product: CatalogItem,
}
