//! Identity Service Module
//!
//! User accounts, credential login and cookie sessions. Login first asks the
//! external auth backend (when configured) and falls back to the locally
//! stored password hash.

// Public exports
pub mod contract;
pub use contract::{client::IdentityApi, error::IdentityError, SessionToken, User, UserFilter};

pub mod module;
pub use module::IdentityServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
