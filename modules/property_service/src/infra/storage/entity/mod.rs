//! SeaORM entities for database tables

pub mod lease;
pub mod property;
pub mod unit;
