//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - the REST layer owns its DTOs.

pub mod error;
pub mod model;

pub use error::CommerceError;
pub use model::{
    AnalyticsKind, AnalyticsReport, Cart, CartItem, CartLine, CartView, CatalogItem,
    CategorySales, DailyRevenue, Inventory, Order, OrderFilter, OrderItem, OrderStatus, Overview,
    Payment, PaymentFilter, PaymentInit, PaymentProvider, PaymentRequest, PaymentStatus, Period,
    Product, ProductDraft, ProductFilter, ProductSales, ProductSort, ProviderStats,
    ShippingAddress, StockFilter, StockStatus, WishlistEntry, WishlistItem,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
