//! Shared REST plumbing for IDGM modules
//!
//! Every module crate renders errors as RFC-9457 problem details, pages its
//! list endpoints the same way and authenticates callers through the same
//! session extractors. Those pieces live here so the modules stay decoupled
//! from each other.

pub mod auth;
pub mod contracts;
pub mod extract;
pub mod pagination;
pub mod problem;
pub mod validation;

pub use auth::{AdminUser, AuthUser, Principal, Role, SessionResolver, SESSION_COOKIE};
pub use contracts::{DbModule, RestfulModule};
pub use extract::JsonBody;
pub use pagination::{Page, PageRequest};
pub use problem::{map_anyhow_error, FieldError, Problem};
