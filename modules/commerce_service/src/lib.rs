//! Commerce Service Module
//!
//! Storefront catalog with flash-sale pricing and derived stock levels,
//! per-user carts and wishlists, checkout into orders guarded by a status
//! machine, payment initialization and verification against Paystack and
//! Flutterwave, and the admin sales analytics built from those records.

// Public exports
pub mod contract;
pub use contract::{
    error::CommerceError, Order, OrderStatus, Payment, PaymentProvider, PaymentStatus, Product,
};

pub mod module;
pub use module::CommerceServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
