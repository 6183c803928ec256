//! Domain layer - business logic and services

pub mod backend;
pub mod password;
pub mod repository;
pub mod service;
pub mod validation;

pub use backend::{BackendUser, CredentialBackend};
pub use repository::{SessionRepository, UserRepository};
pub use service::Service;
