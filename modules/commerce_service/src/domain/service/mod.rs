//! Domain service - storefront, checkout, payments and reporting
//!
//! One `Service` owns every repository handle; its operations are split by
//! area across the submodules.

mod cart;
mod catalog;
mod orders;
mod payments;
mod reports;
mod wishlist;

use super::events::{CommerceEvent, EventPublisher};
use super::gateway::PaymentGateway;
use super::repository::{
    CartRepository, OrderRepository, PaymentRepository, ProductRepository, WishlistRepository,
};
use crate::contract::{CommerceError, PaymentProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Storage handles used by the service
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub wishlists: Arc<dyn WishlistRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

/// Behaviour switches taken from module configuration
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Reject order status changes outside the transition table
    pub enforce_status_transitions: bool,
    pub default_currency: String,
    pub top_products_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            enforce_status_transitions: true,
            default_currency: "NGN".to_string(),
            top_products_limit: 5,
        }
    }
}

/// Domain service for commerce
pub struct Service {
    repos: Repositories,
    gateways: HashMap<PaymentProvider, Arc<dyn PaymentGateway>>,
    events: Arc<dyn EventPublisher>,
    settings: ServiceSettings,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        gateways: Vec<Arc<dyn PaymentGateway>>,
        events: Arc<dyn EventPublisher>,
        settings: ServiceSettings,
    ) -> Self {
        let gateways = gateways
            .into_iter()
            .map(|gateway| (gateway.provider(), gateway))
            .collect();

        Self {
            repos,
            gateways,
            events,
            settings,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    // ===== Helper Methods =====

    /// Event delivery never fails the operation that produced it
    async fn publish(&self, event: CommerceEvent) {
        let name = event.name();
        if let Err(e) = self.events.publish(event).await {
            tracing::warn!(event = name, error = ?e, "Failed to publish commerce event");
        }
    }
}

pub(crate) fn internal(e: anyhow::Error) -> CommerceError {
    tracing::error!(error = ?e, "Commerce storage error");
    CommerceError::Internal
}
