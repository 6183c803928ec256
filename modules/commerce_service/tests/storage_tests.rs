//! SeaORM repositories against an in-memory SQLite database

mod common;

use chrono::{Duration, Utc};
use commerce_service::contract::{
    CatalogItem, Order, OrderItem, OrderStatus, ProductDraft, ProductFilter, ProductSort,
    ShippingAddress, DEFAULT_LOW_STOCK_THRESHOLD,
};
use commerce_service::domain::repository::{OrderRepository, ProductRepository, StockConflict};
use commerce_service::domain::{NoOpEventPublisher, Repositories, Service, ServiceSettings};
use commerce_service::infra::storage::migrations::Migrator;
use commerce_service::infra::storage::repositories::{
    SeaOrmCartRepository, SeaOrmOrderRepository, SeaOrmPaymentRepository,
    SeaOrmProductRepository, SeaOrmWishlistRepository,
};
use commerce_service::CommerceError;
use common::{admin, customer, dec, print_test_header, shipping};
use idgm_kit::PageRequest;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use uuid::Uuid;

struct SqliteContext {
    service: Arc<Service>,
    db: Arc<DatabaseConnection>,
}

impl SqliteContext {
    async fn stock(&self, product_id: Uuid) -> i32 {
        SeaOrmProductRepository::new(self.db.clone())
            .find_by_id(product_id)
            .await
            .expect("product lookup")
            .map_or(0, |item| item.inventory.quantity)
    }
}

async fn sqlite_context(settings: ServiceSettings) -> SqliteContext {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Arc::new(Database::connect(options).await.expect("sqlite connects"));
    Migrator::up(&*db, None).await.expect("migrations apply");

    let repos = Repositories {
        products: Arc::new(SeaOrmProductRepository::new(db.clone())),
        carts: Arc::new(SeaOrmCartRepository::new(db.clone())),
        wishlists: Arc::new(SeaOrmWishlistRepository::new(db.clone())),
        orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
        payments: Arc::new(SeaOrmPaymentRepository::new(db.clone())),
    };
    let service = Arc::new(Service::new(
        repos,
        Vec::new(),
        Arc::new(NoOpEventPublisher),
        settings,
    ));
    SqliteContext { service, db }
}

fn draft(name: &str, price: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("Handmade {}", name.to_lowercase()),
        category: "crafts".to_string(),
        price: dec(price),
        sale_price: None,
        sale_starts_at: None,
        sale_ends_at: None,
        image_url: None,
    }
}

async fn create_product(ctx: &SqliteContext, draft: ProductDraft, quantity: i32) -> Uuid {
    ctx.service
        .create_product(draft, Some(quantity), None)
        .await
        .expect("create product")
        .product
        .id
}

fn names(items: &[CatalogItem]) -> Vec<String> {
    items.iter().map(|i| i.product.name.clone()).collect()
}

#[tokio::test]
async fn test_migrations_rerun_without_error() {
    print_test_header(
        "test_migrations_rerun_without_error",
        "Every migration records its own name, so a second run applies nothing",
    );
    let ctx = sqlite_context(ServiceSettings::default()).await;

    Migrator::up(&*ctx.db, None).await.expect("rerun is a no-op");
    let applied = Migrator::get_applied_migrations(&*ctx.db)
        .await
        .expect("history readable");
    let applied: Vec<&str> = applied.iter().map(|m| m.name()).collect();
    assert_eq!(
        applied,
        vec![
            "m20250301_000001_create_catalog",
            "m20250301_000002_create_carts",
            "m20250301_000003_create_orders",
            "m20250301_000004_create_payments",
        ]
    );
}

#[tokio::test]
async fn test_price_bounds_use_effective_price() {
    print_test_header(
        "test_price_bounds_use_effective_price",
        "Price bounds match the sale price inside its window and the list price outside it",
    );
    let ctx = sqlite_context(ServiceSettings::default()).await;
    let now = Utc::now();

    create_product(&ctx, draft("Cheap", "5"), 1).await;
    create_product(&ctx, draft("Middle", "50"), 1).await;
    create_product(&ctx, draft("Dear", "500"), 1).await;
    create_product(
        &ctx,
        ProductDraft {
            sale_price: Some(dec("40")),
            ..draft("Discounted", "500")
        },
        1,
    )
    .await;
    create_product(
        &ctx,
        ProductDraft {
            sale_price: Some(dec("1")),
            sale_starts_at: Some(now - Duration::days(10)),
            sale_ends_at: Some(now - Duration::days(1)),
            ..draft("Lapsed", "60")
        },
        1,
    )
    .await;

    let filter = ProductFilter {
        min_price: Some(dec("10")),
        max_price: Some(dec("100")),
        sort: ProductSort::PriceAsc,
        ..Default::default()
    };
    let page = ctx
        .service
        .list_products(&filter, PageRequest::new(None, None, 100))
        .await
        .expect("list");

    assert_eq!(page.total, 3);
    assert_eq!(names(&page.items), vec!["Discounted", "Middle", "Lapsed"]);

    let all = ctx
        .service
        .list_products(
            &ProductFilter {
                sort: ProductSort::PriceAsc,
                ..Default::default()
            },
            PageRequest::new(None, None, 100),
        )
        .await
        .expect("list");
    assert_eq!(all.total, 5);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    print_test_header(
        "test_search_is_case_insensitive",
        "Search matches name or description regardless of case",
    );
    let ctx = sqlite_context(ServiceSettings::default()).await;
    create_product(&ctx, draft("Aso Oke Wrap", "25000"), 2).await;
    create_product(&ctx, draft("Bronze Mask", "90000"), 1).await;

    let filter = ProductFilter {
        search: Some("ASO".to_string()),
        ..Default::default()
    };
    let page = ctx
        .service
        .list_products(&filter, PageRequest::new(None, None, 100))
        .await
        .expect("list");

    assert_eq!(names(&page.items), vec!["Aso Oke Wrap"]);
}

#[tokio::test]
async fn test_checkout_moves_stock_and_empties_cart() {
    print_test_header(
        "test_checkout_moves_stock_and_empties_cart",
        "Placing an order decrements stock and clears the cart in one transaction",
    );
    let ctx = sqlite_context(ServiceSettings::default()).await;
    let product = create_product(&ctx, draft("Gele", "1500"), 5).await;
    let buyer = customer("gele@example.com");

    ctx.service
        .add_to_cart(buyer.user_id, product, 2)
        .await
        .expect("add to cart");
    let order = ctx.service.checkout(&buyer, shipping()).await.expect("checkout");

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, dec("3000"));
    assert_eq!(ctx.stock(product).await, 3);
    let stocked = SeaOrmProductRepository::new(ctx.db.clone())
        .find_by_id(product)
        .await
        .expect("product lookup")
        .expect("product stored");
    assert_eq!(stocked.inventory.threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    let cart = ctx.service.get_cart(buyer.user_id).await.expect("cart");
    assert!(cart.lines.is_empty());

    let stored = ctx
        .service
        .get_user_order(buyer.user_id, order.id)
        .await
        .expect("order stored");
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.shipping, shipping());
}

#[tokio::test]
async fn test_stock_shortfall_rolls_back_whole_order() {
    print_test_header(
        "test_stock_shortfall_rolls_back_whole_order",
        "A line that can no longer be covered undoes the earlier decrements and the order insert",
    );
    let ctx = sqlite_context(ServiceSettings::default()).await;
    let plenty = create_product(&ctx, draft("Raffia Bag", "800"), 10).await;
    let scarce = create_product(&ctx, draft("Ivory Comb", "300"), 1).await;
    let buyer = customer("shortfall@example.com");

    ctx.service
        .add_to_cart(buyer.user_id, plenty, 3)
        .await
        .expect("add to cart");
    let cart_id = ctx
        .service
        .get_cart(buyer.user_id)
        .await
        .expect("cart")
        .cart
        .id;

    let now = Utc::now();
    let order_id = Uuid::new_v4();
    let line = |product_id: Uuid, name: &str, quantity: i32| OrderItem {
        id: Uuid::new_v4(),
        order_id,
        product_id,
        product_name: name.to_string(),
        category: "crafts".to_string(),
        quantity,
        price: dec("100"),
    };
    let order = Order {
        id: order_id,
        user_id: buyer.user_id,
        customer_email: buyer.email.clone(),
        status: OrderStatus::Pending,
        total: dec("500"),
        shipping: ShippingAddress::default(),
        items: vec![line(plenty, "Raffia Bag", 3), line(scarce, "Ivory Comb", 2)],
        restocked: false,
        created_at: now,
        updated_at: now,
    };

    let orders = SeaOrmOrderRepository::new(ctx.db.clone());
    let err = orders.place(&order, cart_id).await.expect_err("shortfall");
    let conflict = err
        .downcast_ref::<StockConflict>()
        .expect("stock conflict surfaces");
    assert_eq!(conflict.product_id, scarce);

    assert_eq!(ctx.stock(plenty).await, 10);
    assert_eq!(ctx.stock(scarce).await, 1);
    assert!(orders.find(order_id).await.expect("lookup").is_none());
    let cart = ctx.service.get_cart(buyer.user_id).await.expect("cart");
    assert_eq!(cart.lines.len(), 1);
}

#[tokio::test]
async fn test_second_buyer_gets_insufficient_stock() {
    print_test_header(
        "test_second_buyer_gets_insufficient_stock",
        "Two carts competing for the last units: the later checkout is refused",
    );
    let ctx = sqlite_context(ServiceSettings::default()).await;
    let product = create_product(&ctx, draft("Talking Drum", "12000"), 3).await;
    let first = customer("first@example.com");
    let second = customer("second@example.com");

    for buyer in [&first, &second] {
        ctx.service
            .add_to_cart(buyer.user_id, product, 2)
            .await
            .expect("add to cart");
    }
    ctx.service.checkout(&first, shipping()).await.expect("first checkout");
    let err = ctx
        .service
        .checkout(&second, shipping())
        .await
        .expect_err("second checkout");

    assert!(matches!(
        err,
        CommerceError::InsufficientStock { available: 1, requested: 2, .. }
    ));
    assert_eq!(ctx.stock(product).await, 1);
}

#[tokio::test]
async fn test_cancel_restocks_once_in_storage() {
    print_test_header(
        "test_cancel_restocks_once_in_storage",
        "The restocked flag persists, so re-entering CANCELLED or REFUNDED returns nothing more",
    );
    let ctx = sqlite_context(ServiceSettings {
        enforce_status_transitions: false,
        ..Default::default()
    })
    .await;
    let product = create_product(&ctx, draft("Adire Scarf", "4000"), 5).await;
    let buyer = customer("restock@example.com");
    let actor = admin().user_id;

    ctx.service
        .add_to_cart(buyer.user_id, product, 2)
        .await
        .expect("add to cart");
    let order = ctx.service.checkout(&buyer, shipping()).await.expect("checkout");
    assert_eq!(ctx.stock(product).await, 3);

    let mut seen = Vec::new();
    for status in ["CANCELLED", "PENDING", "CANCELLED", "PAID", "REFUNDED"] {
        let updated = ctx
            .service
            .update_order_status(actor, order.id, status)
            .await
            .expect("status change");
        assert!(updated.restocked);
        seen.push(ctx.stock(product).await);
    }

    assert_eq!(seen, vec![5, 5, 5, 5, 5]);
}
