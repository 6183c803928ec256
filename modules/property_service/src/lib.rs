//! Property Service Module
//!
//! Rental listings for the property side of the business: properties with
//! their rentable units, and the leases that occupy them. A unit is occupied
//! exactly while it has an ACTIVE lease, and it never has more than one.

// Public exports
pub mod contract;
pub use contract::{
    error::PropertyError, Lease, LeaseStatus, Property, PropertyType, Unit,
};

pub mod module;
pub use module::PropertyServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
