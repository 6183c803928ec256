//! Repository traits for data access
//!
//! Implementations are in infra/storage/repositories/

use crate::contract::{
    Cart, CartItem, CatalogItem, Inventory, Order, OrderFilter, OrderStatus, Payment,
    PaymentFilter, Product, ProductFilter, StockFilter, WishlistItem,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use thiserror::Error;
use uuid::Uuid;

/// Raised by [`OrderRepository::place`] when a stock decrement would go negative
///
/// The whole checkout transaction is rolled back; callers downcast the
/// `anyhow::Error` to recover the product.
#[derive(Debug, Clone, Copy, Error)]
#[error("insufficient stock for product {product_id}")]
pub struct StockConflict {
    pub product_id: Uuid,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product together with its inventory row
    async fn create(&self, product: &Product, inventory: &Inventory) -> Result<()>;

    async fn update(&self, product: &Product) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CatalogItem>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogItem>>;

    /// Batch lookup; missing ids are skipped
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<CatalogItem>>;

    /// Active products matching `filter`, with effective prices taken at `now`
    async fn list(
        &self,
        filter: &ProductFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<(Vec<CatalogItem>, u64)>;

    async fn update_inventory(&self, inventory: &Inventory) -> Result<()>;

    /// Active products' stock, lowest quantity first
    async fn list_inventory(
        &self,
        filter: Option<StockFilter>,
        page: PageRequest,
    ) -> Result<(Vec<CatalogItem>, u64)>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_or_create(&self, user_id: Uuid) -> Result<Cart>;

    /// Lines in insertion order
    async fn items(&self, cart_id: Uuid) -> Result<Vec<CartItem>>;

    async fn find_item(&self, item_id: Uuid) -> Result<Option<CartItem>>;

    async fn insert_item(&self, item: &CartItem) -> Result<()>;

    async fn set_quantity(&self, item_id: Uuid, quantity: i32) -> Result<()>;

    async fn delete_item(&self, item_id: Uuid) -> Result<()>;

    async fn clear(&self, cart_id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Newest first
    async fn list(&self, user_id: Uuid) -> Result<Vec<WishlistItem>>;

    async fn find(&self, user_id: Uuid, product_id: Uuid) -> Result<Option<WishlistItem>>;

    async fn insert(&self, item: &WishlistItem) -> Result<()>;

    /// Returns whether a row was removed
    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Atomically insert the order and its items, decrement stock for every
    /// line and empty the cart. Fails with [`StockConflict`] when a line no
    /// longer fits the inventory.
    async fn place(&self, order: &Order, cart_id: Uuid) -> Result<()>;

    async fn find(&self, id: Uuid) -> Result<Option<Order>>;

    /// Newest first
    async fn list(&self, filter: &OrderFilter, page: PageRequest) -> Result<(Vec<Order>, u64)>;

    /// Compare-and-set the status; restocks every item when `restock` is set
    /// and marks the order restocked. Returns `false` when the order was no
    /// longer in `from`, or was already restocked and `restock` is set.
    async fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        restock: bool,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Orders created in `[start, end)`, items included
    async fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<()>;

    async fn update(&self, payment: &Payment) -> Result<()>;

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>>;

    /// Newest first
    async fn list(&self, filter: &PaymentFilter, page: PageRequest)
        -> Result<(Vec<Payment>, u64)>;

    /// Payments created in `[start, end)`
    async fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Payment>>;
}
