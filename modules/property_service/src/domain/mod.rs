//! Domain layer - business logic and services

pub mod events;
pub mod repository;
pub mod service;
pub mod validation;

pub use events::{EventPublisher, LoggingEventPublisher, NoOpEventPublisher, PropertyEvent};
pub use repository::{LeaseRepository, PropertyRepository, UnitRepository};
pub use service::{Repositories, Service};
