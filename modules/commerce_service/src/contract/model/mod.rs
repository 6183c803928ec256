//! Commerce domain models

mod analytics;
mod cart;
mod catalog;
mod order;
mod payment;

pub use analytics::{
    AnalyticsKind, AnalyticsReport, CategorySales, DailyRevenue, Overview, Period, ProductSales,
    ProviderStats,
};
pub use cart::{Cart, CartItem, CartLine, CartView, WishlistEntry, WishlistItem};
pub use catalog::{
    CatalogItem, Inventory, Product, ProductDraft, ProductFilter, ProductSort, StockFilter,
    StockStatus, DEFAULT_LOW_STOCK_THRESHOLD,
};
pub use order::{Order, OrderFilter, OrderItem, OrderStatus, ShippingAddress};
pub use payment::{
    Payment, PaymentFilter, PaymentInit, PaymentProvider, PaymentRequest, PaymentStatus,
};
