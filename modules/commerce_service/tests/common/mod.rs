//! Shared in-memory repositories and fixtures for commerce tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use commerce_service::contract::{
    Cart, CartItem, CatalogItem, Inventory, Order, OrderFilter, OrderStatus, Payment,
    PaymentFilter, Product, ProductFilter, ProductSort, StockFilter, WishlistItem,
};
use commerce_service::domain::repository::{
    CartRepository, OrderRepository, PaymentRepository, ProductRepository, StockConflict,
    WishlistRepository,
};
use commerce_service::domain::{
    ChargeRequest, ChargeSession, GatewayError, NoOpEventPublisher, PaymentGateway, Repositories,
    Service, ServiceSettings, Verification,
};
use commerce_service::PaymentProvider;
use idgm_kit::{PageRequest, Principal, Role};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

pub fn dec(raw: &str) -> Decimal {
    raw.parse().expect("decimal literal")
}

// ===== In-memory store =====

/// Every table the commerce repositories touch, shared so that checkout can
/// move stock and empty carts the way one database transaction would
#[derive(Default)]
pub struct MockDb {
    pub products: RwLock<HashMap<Uuid, CatalogItem>>,
    pub carts: RwLock<HashMap<Uuid, Cart>>,
    /// Insertion order
    pub cart_items: RwLock<Vec<CartItem>>,
    pub wishlist: RwLock<Vec<WishlistItem>>,
    pub orders: RwLock<HashMap<Uuid, Order>>,
    pub payments: RwLock<HashMap<String, Payment>>,
}

impl MockDb {
    pub fn stock(&self, product_id: Uuid) -> i32 {
        self.products
            .read()
            .get(&product_id)
            .map_or(0, |p| p.inventory.quantity)
    }

    pub fn set_stock(&self, product_id: Uuid, quantity: i32) {
        if let Some(p) = self.products.write().get_mut(&product_id) {
            p.inventory.quantity = quantity;
        }
    }

    pub fn cart_item_count(&self) -> usize {
        self.cart_items.read().len()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.read().len()
    }

    pub fn payment(&self, reference: &str) -> Option<Payment> {
        self.payments.read().get(reference).cloned()
    }

    pub fn order(&self, id: Uuid) -> Option<Order> {
        self.orders.read().get(&id).cloned()
    }

    pub fn insert_order(&self, order: Order) {
        self.orders.write().insert(order.id, order);
    }

    pub fn insert_payment(&self, payment: Payment) {
        self.payments
            .write()
            .insert(payment.reference.clone(), payment);
    }
}

pub struct MockProductRepo(pub Arc<MockDb>);

#[async_trait]
impl ProductRepository for MockProductRepo {
    async fn create(&self, product: &Product, inventory: &Inventory) -> anyhow::Result<()> {
        self.0.products.write().insert(
            product.id,
            CatalogItem {
                product: product.clone(),
                inventory: *inventory,
            },
        );
        Ok(())
    }

    async fn update(&self, product: &Product) -> anyhow::Result<()> {
        if let Some(item) = self.0.products.write().get_mut(&product.id) {
            item.product = product.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<CatalogItem>> {
        Ok(self.0.products.read().get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<CatalogItem>> {
        Ok(self
            .0
            .products
            .read()
            .values()
            .find(|p| p.product.slug == slug)
            .cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<CatalogItem>> {
        let products = self.0.products.read();
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<CatalogItem>, u64)> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<CatalogItem> = self
            .0
            .products
            .read()
            .values()
            .filter(|p| p.product.is_active)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| p.product.category == c)
            })
            .filter(|p| {
                search.as_deref().is_none_or(|s| {
                    p.product.name.to_lowercase().contains(s)
                        || p.product.description.to_lowercase().contains(s)
                })
            })
            .filter(|p| {
                let price = p.product.effective_price(now);
                filter.min_price.is_none_or(|min| price >= min)
                    && filter.max_price.is_none_or(|max| price <= max)
            })
            .cloned()
            .collect();

        match filter.sort {
            ProductSort::Newest => items.sort_by(|a, b| b.product.created_at.cmp(&a.product.created_at)),
            ProductSort::PriceAsc => items.sort_by_key(|p| p.product.effective_price(now)),
            ProductSort::PriceDesc => {
                items.sort_by_key(|p| std::cmp::Reverse(p.product.effective_price(now)))
            }
            ProductSort::Name => items.sort_by(|a, b| a.product.name.cmp(&b.product.name)),
        }
        let total = items.len() as u64;
        Ok((page.slice(&items), total))
    }

    async fn update_inventory(&self, inventory: &Inventory) -> anyhow::Result<()> {
        if let Some(item) = self.0.products.write().get_mut(&inventory.product_id) {
            item.inventory = *inventory;
        }
        Ok(())
    }

    async fn list_inventory(
        &self,
        filter: Option<StockFilter>,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<CatalogItem>, u64)> {
        let mut items: Vec<CatalogItem> = self
            .0
            .products
            .read()
            .values()
            .filter(|p| p.product.is_active)
            .filter(|p| filter.is_none_or(|f| f.matches(p.inventory.status())))
            .cloned()
            .collect();
        items.sort_by_key(|p| p.inventory.quantity);
        let total = items.len() as u64;
        Ok((page.slice(&items), total))
    }
}

pub struct MockCartRepo(pub Arc<MockDb>);

#[async_trait]
impl CartRepository for MockCartRepo {
    async fn get_or_create(&self, user_id: Uuid) -> anyhow::Result<Cart> {
        let mut carts = self.0.carts.write();
        if let Some(cart) = carts.values().find(|c| c.user_id == user_id) {
            return Ok(cart.clone());
        }
        let cart = Cart {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };
        carts.insert(cart.id, cart.clone());
        Ok(cart)
    }

    async fn items(&self, cart_id: Uuid) -> anyhow::Result<Vec<CartItem>> {
        Ok(self
            .0
            .cart_items
            .read()
            .iter()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect())
    }

    async fn find_item(&self, item_id: Uuid) -> anyhow::Result<Option<CartItem>> {
        Ok(self
            .0
            .cart_items
            .read()
            .iter()
            .find(|i| i.id == item_id)
            .cloned())
    }

    async fn insert_item(&self, item: &CartItem) -> anyhow::Result<()> {
        self.0.cart_items.write().push(item.clone());
        Ok(())
    }

    async fn set_quantity(&self, item_id: Uuid, quantity: i32) -> anyhow::Result<()> {
        if let Some(item) = self
            .0
            .cart_items
            .write()
            .iter_mut()
            .find(|i| i.id == item_id)
        {
            item.quantity = quantity;
        }
        Ok(())
    }

    async fn delete_item(&self, item_id: Uuid) -> anyhow::Result<()> {
        self.0.cart_items.write().retain(|i| i.id != item_id);
        Ok(())
    }

    async fn clear(&self, cart_id: Uuid) -> anyhow::Result<u64> {
        let mut items = self.0.cart_items.write();
        let before = items.len();
        items.retain(|i| i.cart_id != cart_id);
        Ok((before - items.len()) as u64)
    }
}

pub struct MockWishlistRepo(pub Arc<MockDb>);

#[async_trait]
impl WishlistRepository for MockWishlistRepo {
    async fn list(&self, user_id: Uuid) -> anyhow::Result<Vec<WishlistItem>> {
        let mut items: Vec<WishlistItem> = self
            .0
            .wishlist
            .read()
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find(&self, user_id: Uuid, product_id: Uuid) -> anyhow::Result<Option<WishlistItem>> {
        Ok(self
            .0
            .wishlist
            .read()
            .iter()
            .find(|w| w.user_id == user_id && w.product_id == product_id)
            .cloned())
    }

    async fn insert(&self, item: &WishlistItem) -> anyhow::Result<()> {
        self.0.wishlist.write().push(item.clone());
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> anyhow::Result<bool> {
        let mut items = self.0.wishlist.write();
        let before = items.len();
        items.retain(|w| !(w.user_id == user_id && w.product_id == product_id));
        Ok(items.len() < before)
    }
}

pub struct MockOrderRepo(pub Arc<MockDb>);

#[async_trait]
impl OrderRepository for MockOrderRepo {
    async fn place(&self, order: &Order, cart_id: Uuid) -> anyhow::Result<()> {
        let mut products = self.0.products.write();
        for item in &order.items {
            let available = products
                .get(&item.product_id)
                .map_or(0, |p| p.inventory.quantity);
            if available < item.quantity {
                return Err(StockConflict {
                    product_id: item.product_id,
                }
                .into());
            }
        }
        for item in &order.items {
            if let Some(p) = products.get_mut(&item.product_id) {
                p.inventory.quantity -= item.quantity;
            }
        }
        drop(products);

        self.0.orders.write().insert(order.id, order.clone());
        self.0.cart_items.write().retain(|i| i.cart_id != cart_id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        Ok(self.0.orders.read().get(&id).cloned())
    }

    async fn list(&self, filter: &OrderFilter, page: PageRequest) -> anyhow::Result<(Vec<Order>, u64)> {
        let search = filter.search.as_deref().map(|s| s.trim().to_lowercase());
        let mut orders: Vec<Order> = self
            .0
            .orders
            .read()
            .values()
            .filter(|o| filter.user_id.is_none_or(|u| o.user_id == u))
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| {
                search.as_deref().is_none_or(|s| {
                    o.id.to_string().starts_with(s) || o.customer_email.to_lowercase().contains(s)
                })
            })
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = orders.len() as u64;
        Ok((page.slice(&orders), total))
    }

    async fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        restock: bool,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut orders = self.0.orders.write();
        let Some(order) = orders
            .get_mut(&id)
            .filter(|o| o.status == from && !(restock && o.restocked))
        else {
            return Ok(false);
        };
        order.status = to;
        order.updated_at = now;

        if restock {
            order.restocked = true;
            let mut products = self.0.products.write();
            for item in &order.items {
                if let Some(p) = products.get_mut(&item.product_id) {
                    p.inventory.quantity += item.quantity;
                }
            }
        }
        Ok(true)
    }

    async fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> anyhow::Result<Vec<Order>> {
        Ok(self
            .0
            .orders
            .read()
            .values()
            .filter(|o| o.created_at >= start && o.created_at < end)
            .cloned()
            .collect())
    }
}

pub struct MockPaymentRepo(pub Arc<MockDb>);

#[async_trait]
impl PaymentRepository for MockPaymentRepo {
    async fn create(&self, payment: &Payment) -> anyhow::Result<()> {
        let mut payments = self.0.payments.write();
        if payments.contains_key(&payment.reference) {
            anyhow::bail!("duplicate payment reference {}", payment.reference);
        }
        payments.insert(payment.reference.clone(), payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> anyhow::Result<()> {
        self.0
            .payments
            .write()
            .insert(payment.reference.clone(), payment.clone());
        Ok(())
    }

    async fn find_by_reference(&self, reference: &str) -> anyhow::Result<Option<Payment>> {
        Ok(self.0.payments.read().get(reference).cloned())
    }

    async fn list(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Payment>, u64)> {
        let mut payments: Vec<Payment> = self
            .0
            .payments
            .read()
            .values()
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .filter(|p| filter.provider.is_none_or(|pr| p.provider == pr))
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = payments.len() as u64;
        Ok((page.slice(&payments), total))
    }

    async fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> anyhow::Result<Vec<Payment>> {
        Ok(self
            .0
            .payments
            .read()
            .values()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .cloned()
            .collect())
    }
}

// ===== Gateway stub =====

/// Scripted gateway that counts calls
pub struct StubGateway {
    provider: PaymentProvider,
    initialize_result: Result<ChargeSession, GatewayError>,
    verify_succeeds: bool,
    pub initialize_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
}

impl StubGateway {
    pub fn accepting(provider: PaymentProvider) -> Self {
        Self {
            provider,
            initialize_result: Ok(ChargeSession {
                authorization_url: "https://checkout.example.com/pay/abc".to_string(),
                provider_reference: Some("prov_ref_1".to_string()),
                raw: json!({"access_code": "abc"}),
            }),
            verify_succeeds: true,
            initialize_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(provider: PaymentProvider, message: &str) -> Self {
        Self {
            initialize_result: Err(GatewayError::Rejected(message.to_string())),
            verify_succeeds: false,
            ..Self::accepting(provider)
        }
    }

    pub fn initialize_count(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    async fn initialize(&self, _request: &ChargeRequest) -> Result<ChargeSession, GatewayError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        self.initialize_result.clone()
    }

    async fn verify(&self, _reference: &str) -> Result<Verification, GatewayError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Verification {
            succeeded: self.verify_succeeds,
            raw: json!({"status": if self.verify_succeeds { "success" } else { "failed" }}),
        })
    }
}

// ===== Fixtures =====

pub struct TestContext {
    pub service: Arc<Service>,
    pub db: Arc<MockDb>,
}

pub fn create_test_context(gateways: Vec<Arc<dyn PaymentGateway>>) -> TestContext {
    create_test_context_with(gateways, ServiceSettings::default())
}

pub fn create_test_context_with(
    gateways: Vec<Arc<dyn PaymentGateway>>,
    settings: ServiceSettings,
) -> TestContext {
    let db = Arc::new(MockDb::default());
    let repos = Repositories {
        products: Arc::new(MockProductRepo(db.clone())),
        carts: Arc::new(MockCartRepo(db.clone())),
        wishlists: Arc::new(MockWishlistRepo(db.clone())),
        orders: Arc::new(MockOrderRepo(db.clone())),
        payments: Arc::new(MockPaymentRepo(db.clone())),
    };
    let service = Arc::new(Service::new(
        repos,
        gateways,
        Arc::new(NoOpEventPublisher),
        settings,
    ));
    TestContext { service, db }
}

pub fn customer(email: &str) -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Test Customer".to_string(),
        role: Role::Customer,
    }
}

pub fn admin() -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
    }
}

/// Insert an active product with `quantity` on hand
pub fn seed_product(db: &MockDb, name: &str, category: &str, price: &str, quantity: i32) -> Uuid {
    let now = Utc::now();
    let id = Uuid::new_v4();
    let product = Product {
        id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: format!("{} description", name),
        category: category.to_string(),
        price: dec(price),
        sale_price: None,
        sale_starts_at: None,
        sale_ends_at: None,
        image_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.products.write().insert(
        id,
        CatalogItem {
            product,
            inventory: Inventory {
                product_id: id,
                quantity,
                threshold: 5,
            },
        },
    );
    id
}

pub fn shipping() -> commerce_service::contract::ShippingAddress {
    commerce_service::contract::ShippingAddress {
        name: "Ada Obi".to_string(),
        phone: "+2348012345678".to_string(),
        address: "12 Marina Road".to_string(),
        city: "Lagos".to_string(),
        state: "Lagos".to_string(),
        country: "NG".to_string(),
    }
}
