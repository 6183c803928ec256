//! Repository traits for data access
//!
//! Implementations are in infra/storage/repositories/

use crate::contract::{Lease, LeaseFilter, LeaseStatus, Property, PropertyFilter, Unit};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use uuid::Uuid;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<()>;

    async fn update(&self, property: &Property) -> Result<()>;

    /// Removes the property with its units and leases
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn find(&self, id: Uuid) -> Result<Option<Property>>;

    /// Newest first
    async fn list(&self, filter: &PropertyFilter, page: PageRequest)
        -> Result<(Vec<Property>, u64)>;
}

#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn create(&self, unit: &Unit) -> Result<()>;

    async fn find(&self, id: Uuid) -> Result<Option<Unit>>;

    /// Units of every listed property, ordered by label
    async fn for_properties(&self, property_ids: &[Uuid]) -> Result<Vec<Unit>>;
}

#[async_trait]
pub trait LeaseRepository: Send + Sync {
    /// Insert `lease` unless its unit already has an ACTIVE lease
    ///
    /// The check and the insert run in one transaction; `false` means the
    /// unit was taken and nothing was written.
    async fn create_if_unit_free(&self, lease: &Lease) -> Result<bool>;

    async fn find(&self, id: Uuid) -> Result<Option<Lease>>;

    async fn active_for_units(&self, unit_ids: &[Uuid]) -> Result<Vec<Lease>>;

    /// Move an ACTIVE lease to `to`; `false` when it was no longer ACTIVE
    async fn close(&self, id: Uuid, to: LeaseStatus, now: DateTime<Utc>) -> Result<bool>;

    /// Newest first
    async fn list(&self, filter: &LeaseFilter, page: PageRequest) -> Result<(Vec<Lease>, u64)>;
}
