//! Domain layer - business logic and services

pub mod analytics;
pub mod events;
pub mod gateway;
pub mod reference;
pub mod repository;
pub mod service;
pub mod validation;

pub use events::{CommerceEvent, EventPublisher, LoggingEventPublisher, NoOpEventPublisher};
pub use gateway::{ChargeRequest, ChargeSession, GatewayError, PaymentGateway, Verification};
pub use repository::{
    CartRepository, OrderRepository, PaymentRepository, ProductRepository, StockConflict,
    WishlistRepository,
};
pub use service::{Repositories, Service, ServiceSettings};
