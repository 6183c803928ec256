//! Domain service - listings, units and the lease lifecycle

use super::events::{EventPublisher, PropertyEvent};
use super::repository::{LeaseRepository, PropertyRepository, UnitRepository};
use super::validation::{validate_lease, validate_property, validate_unit};
use crate::contract::{
    Lease, LeaseDraft, LeaseFilter, LeaseStatus, Property, PropertyDetail, PropertyDraft,
    PropertyError, PropertyFilter, PropertySummary, Unit, UnitDraft, UnitOccupancy,
};
use chrono::Utc;
use idgm_kit::{Page, PageRequest};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct Repositories {
    pub properties: Arc<dyn PropertyRepository>,
    pub units: Arc<dyn UnitRepository>,
    pub leases: Arc<dyn LeaseRepository>,
}

/// Domain service for properties and leasing
pub struct Service {
    repos: Repositories,
    events: Arc<dyn EventPublisher>,
}

impl Service {
    pub fn new(repos: Repositories, events: Arc<dyn EventPublisher>) -> Self {
        Self { repos, events }
    }

    // ===== Properties =====

    /// Public listing with per-property occupancy counts
    pub async fn list_properties(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<PropertySummary>, PropertyError> {
        let (properties, total) = self
            .repos
            .properties
            .list(filter, page)
            .await
            .map_err(internal)?;

        let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let mut counts: HashMap<Uuid, (u64, u64)> = HashMap::new();
        for unit in self.occupancy(&ids).await? {
            let entry = counts.entry(unit.unit.property_id).or_default();
            entry.0 += 1;
            if unit.occupied() {
                entry.1 += 1;
            }
        }

        let items = properties
            .into_iter()
            .map(|property| {
                let (unit_count, occupied_units) =
                    counts.get(&property.id).copied().unwrap_or_default();
                PropertySummary {
                    property,
                    unit_count,
                    occupied_units,
                }
            })
            .collect();
        Ok(Page::new(items, total, page))
    }

    pub async fn get_property(&self, id: Uuid) -> Result<PropertyDetail, PropertyError> {
        let property = self.property(id).await?;
        let units = self.occupancy(&[id]).await?;
        Ok(PropertyDetail { property, units })
    }

    pub async fn create_property(&self, draft: PropertyDraft) -> Result<Property, PropertyError> {
        let property_type =
            validate_property(&draft).map_err(|errors| PropertyError::Validation { errors })?;

        let now = Utc::now();
        let property = Property {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            property_type,
            address: draft.address.trim().to_string(),
            city: draft.city.trim().to_string(),
            state: draft.state.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.repos
            .properties
            .create(&property)
            .await
            .map_err(internal)?;
        tracing::info!(property_id = %property.id, city = %property.city, "Property created");

        Ok(property)
    }

    /// Replace every editable field
    pub async fn update_property(
        &self,
        id: Uuid,
        draft: PropertyDraft,
    ) -> Result<Property, PropertyError> {
        let property_type =
            validate_property(&draft).map_err(|errors| PropertyError::Validation { errors })?;
        let mut property = self.property(id).await?;

        property.title = draft.title.trim().to_string();
        property.description = draft.description;
        property.property_type = property_type;
        property.address = draft.address.trim().to_string();
        property.city = draft.city.trim().to_string();
        property.state = draft.state.trim().to_string();
        property.updated_at = Utc::now();

        self.repos
            .properties
            .update(&property)
            .await
            .map_err(internal)?;
        tracing::info!(property_id = %id, "Property updated");

        Ok(property)
    }

    /// Hard delete; refused while any unit is leased
    pub async fn delete_property(&self, id: Uuid) -> Result<(), PropertyError> {
        self.property(id).await?;
        let occupied = self
            .occupancy(&[id])
            .await?
            .iter()
            .filter(|u| u.occupied())
            .count();
        if occupied > 0 {
            return Err(PropertyError::conflict(format!(
                "Property has {} unit(s) with an active lease",
                occupied
            )));
        }

        self.repos.properties.delete(id).await.map_err(internal)?;
        tracing::info!(property_id = %id, "Property deleted");
        Ok(())
    }

    // ===== Units =====

    pub async fn add_unit(
        &self,
        property_id: Uuid,
        draft: UnitDraft,
    ) -> Result<UnitOccupancy, PropertyError> {
        let errors = validate_unit(&draft);
        if !errors.is_empty() {
            return Err(PropertyError::Validation { errors });
        }
        self.property(property_id).await?;

        let unit = Unit {
            id: Uuid::new_v4(),
            property_id,
            label: draft.label.trim().to_string(),
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            monthly_rent: draft.monthly_rent,
            created_at: Utc::now(),
        };
        self.repos.units.create(&unit).await.map_err(internal)?;
        tracing::info!(property_id = %property_id, unit_id = %unit.id, "Unit added");

        Ok(UnitOccupancy {
            unit,
            active_lease_id: None,
        })
    }

    // ===== Leases =====

    /// Open an ACTIVE lease on a vacant unit
    pub async fn create_lease(&self, draft: LeaseDraft) -> Result<Lease, PropertyError> {
        let errors = validate_lease(&draft);
        if !errors.is_empty() {
            return Err(PropertyError::Validation { errors });
        }
        let unit = self
            .repos
            .units
            .find(draft.unit_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| PropertyError::not_found("Unit", draft.unit_id))?;

        let now = Utc::now();
        let lease = Lease {
            id: Uuid::new_v4(),
            unit_id: unit.id,
            tenant_name: draft.tenant_name.trim().to_string(),
            tenant_email: draft.tenant_email.trim().to_lowercase(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            monthly_rent: draft.monthly_rent.unwrap_or(unit.monthly_rent),
            status: LeaseStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .repos
            .leases
            .create_if_unit_free(&lease)
            .await
            .map_err(internal)?;
        if !created {
            return Err(PropertyError::conflict(format!(
                "Unit '{}' already has an active lease",
                unit.label
            )));
        }

        tracing::info!(
            lease_id = %lease.id,
            unit_id = %lease.unit_id,
            start_date = %lease.start_date,
            end_date = %lease.end_date,
            "Lease created"
        );
        self.publish(PropertyEvent::lease_created(&lease)).await;
        Ok(lease)
    }

    /// Close an ACTIVE lease as ENDED or TERMINATED
    pub async fn update_lease_status(
        &self,
        lease_id: Uuid,
        raw_status: &str,
    ) -> Result<Lease, PropertyError> {
        let next = LeaseStatus::parse(raw_status).ok_or_else(|| {
            PropertyError::validation(
                "status",
                &format!("must be one of {}", LeaseStatus::VALUES),
            )
        })?;
        let mut lease = self.lease(lease_id).await?;
        if !lease.status.can_transition_to(next) {
            return Err(PropertyError::InvalidTransition {
                from: lease.status,
                to: next,
            });
        }

        let now = Utc::now();
        let applied = self
            .repos
            .leases
            .close(lease_id, next, now)
            .await
            .map_err(internal)?;
        if !applied {
            return Err(PropertyError::conflict(
                "Lease status changed concurrently; reload and retry",
            ));
        }

        lease.status = next;
        lease.updated_at = now;
        tracing::info!(lease_id = %lease_id, status = %next, "Lease closed");
        self.publish(PropertyEvent::lease_closed(&lease, next)).await;
        Ok(lease)
    }

    pub async fn list_leases(
        &self,
        filter: &LeaseFilter,
        page: PageRequest,
    ) -> Result<Page<Lease>, PropertyError> {
        let (items, total) = self
            .repos
            .leases
            .list(filter, page)
            .await
            .map_err(internal)?;
        Ok(Page::new(items, total, page))
    }

    // ===== Helper Methods =====

    async fn property(&self, id: Uuid) -> Result<Property, PropertyError> {
        self.repos
            .properties
            .find(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| PropertyError::not_found("Property", id))
    }

    async fn lease(&self, id: Uuid) -> Result<Lease, PropertyError> {
        self.repos
            .leases
            .find(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| PropertyError::not_found("Lease", id))
    }

    /// Units of the given properties joined with their ACTIVE lease, if any
    async fn occupancy(&self, property_ids: &[Uuid]) -> Result<Vec<UnitOccupancy>, PropertyError> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        let units = self
            .repos
            .units
            .for_properties(property_ids)
            .await
            .map_err(internal)?;
        let unit_ids: Vec<Uuid> = units.iter().map(|u| u.id).collect();
        let active: HashMap<Uuid, Uuid> = self
            .repos
            .leases
            .active_for_units(&unit_ids)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|lease| (lease.unit_id, lease.id))
            .collect();

        Ok(units
            .into_iter()
            .map(|unit| UnitOccupancy {
                active_lease_id: active.get(&unit.id).copied(),
                unit,
            })
            .collect())
    }

    /// Event delivery never fails the operation that produced it
    async fn publish(&self, event: PropertyEvent) {
        let name = event.name();
        if let Err(e) = self.events.publish(event).await {
            tracing::warn!(event = name, error = ?e, "Failed to publish property event");
        }
    }
}

fn internal(e: anyhow::Error) -> PropertyError {
    tracing::error!(error = ?e, "Property storage error");
    PropertyError::Internal
}
