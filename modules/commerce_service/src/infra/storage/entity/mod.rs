//! SeaORM entities for database tables

pub mod cart;
pub mod cart_item;
pub mod inventory;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod wishlist_item;
