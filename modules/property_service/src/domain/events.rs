//! Domain events for property service

use crate::contract::{Lease, LeaseStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PropertyEvent {
    LeaseCreated(LeaseCreatedEvent),
    LeaseClosed(LeaseClosedEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseCreatedEvent {
    pub lease_id: Uuid,
    pub unit_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseClosedEvent {
    pub lease_id: Uuid,
    pub unit_id: Uuid,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl PropertyEvent {
    pub fn lease_created(lease: &Lease) -> Self {
        Self::LeaseCreated(LeaseCreatedEvent {
            lease_id: lease.id,
            unit_id: lease.unit_id,
            start_date: lease.start_date,
            end_date: lease.end_date,
            timestamp: Utc::now(),
        })
    }

    pub fn lease_closed(lease: &Lease, status: LeaseStatus) -> Self {
        Self::LeaseClosed(LeaseClosedEvent {
            lease_id: lease.id,
            unit_id: lease.unit_id,
            status: status.as_str().to_string(),
            timestamp: Utc::now(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LeaseCreated(_) => "lease_created",
            Self::LeaseClosed(_) => "lease_closed",
        }
    }
}

#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: PropertyEvent) -> anyhow::Result<()>;
}

/// Emits events as structured `tracing` records
pub struct LoggingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: PropertyEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "idgm::events", event = event.name(), %payload, "Property event");
        Ok(())
    }
}

pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: PropertyEvent) -> anyhow::Result<()> {
        Ok(())
    }
}
