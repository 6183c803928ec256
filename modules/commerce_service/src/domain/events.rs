//! Domain events for commerce service

use crate::contract::{Order, OrderStatus, Payment};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Domain event types for commerce
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum CommerceEvent {
    OrderPlaced(OrderPlacedEvent),
    OrderStatusChanged(OrderStatusChangedEvent),
    PaymentCompleted(PaymentCompletedEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPlacedEvent {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub total: Decimal,
    pub item_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStatusChangedEvent {
    pub order_id: Uuid,
    pub from: String,
    pub to: String,
    pub restocked: bool,
    /// Admin who made the change
    pub actor_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentCompletedEvent {
    pub payment_id: Uuid,
    pub reference: String,
    pub provider: String,
    pub status: String,
    pub order_id: Option<Uuid>,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl CommerceEvent {
    pub fn order_placed(order: &Order) -> Self {
        Self::OrderPlaced(OrderPlacedEvent {
            order_id: order.id,
            user_id: order.user_id,
            total: order.total,
            item_count: order.items.len(),
            timestamp: Utc::now(),
        })
    }

    pub fn status_changed(
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        restocked: bool,
        actor_id: Uuid,
    ) -> Self {
        Self::OrderStatusChanged(OrderStatusChangedEvent {
            order_id,
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
            restocked,
            actor_id,
            timestamp: Utc::now(),
        })
    }

    pub fn payment_completed(payment: &Payment) -> Self {
        Self::PaymentCompleted(PaymentCompletedEvent {
            payment_id: payment.id,
            reference: payment.reference.clone(),
            provider: payment.provider.as_str().to_string(),
            status: payment.status.as_str().to_string(),
            order_id: payment.order_id,
            amount: payment.amount,
            timestamp: Utc::now(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderPlaced(_) => "order_placed",
            Self::OrderStatusChanged(_) => "order_status_changed",
            Self::PaymentCompleted(_) => "payment_completed",
        }
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: CommerceEvent) -> anyhow::Result<()>;
}

/// Emits events as structured `tracing` records
pub struct LoggingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: CommerceEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "idgm::events", event = event.name(), %payload, "Commerce event");
        Ok(())
    }
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: CommerceEvent) -> anyhow::Result<()> {
        Ok(())
    }
}
