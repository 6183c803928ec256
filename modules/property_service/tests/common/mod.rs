//! Shared in-memory repositories and fixtures for property tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use idgm_kit::{PageRequest, Principal, Role};
use parking_lot::RwLock;
use property_service::contract::{
    Lease, LeaseDraft, LeaseFilter, LeaseStatus, Property, PropertyFilter, PropertyType, Unit,
};
use property_service::domain::{
    LeaseRepository, NoOpEventPublisher, PropertyRepository, Repositories, Service,
    UnitRepository,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

pub fn dec(raw: &str) -> Decimal {
    raw.parse().expect("decimal literal")
}

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("ISO date literal")
}

// ===== In-memory store =====

#[derive(Default)]
pub struct MockDb {
    pub properties: RwLock<HashMap<Uuid, Property>>,
    pub units: RwLock<HashMap<Uuid, Unit>>,
    pub leases: RwLock<HashMap<Uuid, Lease>>,
}

impl MockDb {
    pub fn lease(&self, id: Uuid) -> Option<Lease> {
        self.leases.read().get(&id).cloned()
    }

    pub fn lease_count(&self) -> usize {
        self.leases.read().len()
    }

    pub fn active_leases_for(&self, unit_id: Uuid) -> usize {
        self.leases
            .read()
            .values()
            .filter(|l| l.unit_id == unit_id && l.status == LeaseStatus::Active)
            .count()
    }
}

fn paginate<T>(mut rows: Vec<T>, page: PageRequest) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let start = (page.offset() as usize).min(rows.len());
    let end = (start + page.limit as usize).min(rows.len());
    (rows.drain(start..end).collect(), total)
}

pub struct MockPropertyRepo(pub Arc<MockDb>);

#[async_trait]
impl PropertyRepository for MockPropertyRepo {
    async fn create(&self, property: &Property) -> anyhow::Result<()> {
        self.0
            .properties
            .write()
            .insert(property.id, property.clone());
        Ok(())
    }

    async fn update(&self, property: &Property) -> anyhow::Result<()> {
        self.0
            .properties
            .write()
            .insert(property.id, property.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let unit_ids: Vec<Uuid> = {
            let mut units = self.0.units.write();
            let ids = units
                .values()
                .filter(|u| u.property_id == id)
                .map(|u| u.id)
                .collect::<Vec<_>>();
            units.retain(|_, u| u.property_id != id);
            ids
        };
        self.0
            .leases
            .write()
            .retain(|_, l| !unit_ids.contains(&l.unit_id));
        Ok(self.0.properties.write().remove(&id).is_some())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Property>> {
        Ok(self.0.properties.read().get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Property>, u64)> {
        let city = filter.city.as_deref().map(str::to_lowercase);
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut rows: Vec<Property> = self
            .0
            .properties
            .read()
            .values()
            .filter(|p| city.as_deref().is_none_or(|c| p.city.to_lowercase() == c))
            .filter(|p| filter.property_type.is_none_or(|t| p.property_type == t))
            .filter(|p| {
                search.as_deref().is_none_or(|s| {
                    [&p.title, &p.description, &p.address]
                        .iter()
                        .any(|field| field.to_lowercase().contains(s))
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }
}

pub struct MockUnitRepo(pub Arc<MockDb>);

#[async_trait]
impl UnitRepository for MockUnitRepo {
    async fn create(&self, unit: &Unit) -> anyhow::Result<()> {
        self.0.units.write().insert(unit.id, unit.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Unit>> {
        Ok(self.0.units.read().get(&id).cloned())
    }

    async fn for_properties(&self, property_ids: &[Uuid]) -> anyhow::Result<Vec<Unit>> {
        let mut units: Vec<Unit> = self
            .0
            .units
            .read()
            .values()
            .filter(|u| property_ids.contains(&u.property_id))
            .cloned()
            .collect();
        units.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        Ok(units)
    }
}

pub struct MockLeaseRepo(pub Arc<MockDb>);

#[async_trait]
impl LeaseRepository for MockLeaseRepo {
    async fn create_if_unit_free(&self, lease: &Lease) -> anyhow::Result<bool> {
        // One write guard covers the check and the insert
        let mut leases = self.0.leases.write();
        let taken = leases
            .values()
            .any(|l| l.unit_id == lease.unit_id && l.status == LeaseStatus::Active);
        if taken {
            return Ok(false);
        }
        leases.insert(lease.id, lease.clone());
        Ok(true)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Lease>> {
        Ok(self.0.lease(id))
    }

    async fn active_for_units(&self, unit_ids: &[Uuid]) -> anyhow::Result<Vec<Lease>> {
        Ok(self
            .0
            .leases
            .read()
            .values()
            .filter(|l| unit_ids.contains(&l.unit_id) && l.status == LeaseStatus::Active)
            .cloned()
            .collect())
    }

    async fn close(
        &self,
        id: Uuid,
        to: LeaseStatus,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut leases = self.0.leases.write();
        match leases.get_mut(&id) {
            Some(lease) if lease.status == LeaseStatus::Active => {
                lease.status = to;
                lease.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list(
        &self,
        filter: &LeaseFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Lease>, u64)> {
        let mut rows: Vec<Lease> = self
            .0
            .leases
            .read()
            .values()
            .filter(|l| filter.status.is_none_or(|s| l.status == s))
            .filter(|l| filter.unit_id.is_none_or(|u| l.unit_id == u))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(rows, page))
    }
}

// ===== Fixtures =====

pub struct TestContext {
    pub service: Arc<Service>,
    pub db: Arc<MockDb>,
}

pub fn create_test_context() -> TestContext {
    let db = Arc::new(MockDb::default());
    let repos = Repositories {
        properties: Arc::new(MockPropertyRepo(db.clone())),
        units: Arc::new(MockUnitRepo(db.clone())),
        leases: Arc::new(MockLeaseRepo(db.clone())),
    };
    let service = Arc::new(Service::new(repos, Arc::new(NoOpEventPublisher)));
    TestContext { service, db }
}

pub fn admin() -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
    }
}

pub fn customer(email: &str) -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Test Customer".to_string(),
        role: Role::Customer,
    }
}

pub fn seed_property(db: &MockDb, title: &str, city: &str, property_type: PropertyType) -> Uuid {
    let now = Utc::now();
    let property = Property {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{} description", title),
        property_type,
        address: "12 Admiralty Way".to_string(),
        city: city.to_string(),
        state: "Lagos".to_string(),
        created_at: now,
        updated_at: now,
    };
    let id = property.id;
    db.properties.write().insert(id, property);
    id
}

pub fn seed_unit(db: &MockDb, property_id: Uuid, label: &str, rent: &str) -> Uuid {
    let unit = Unit {
        id: Uuid::new_v4(),
        property_id,
        label: label.to_string(),
        bedrooms: 2,
        bathrooms: 1,
        monthly_rent: dec(rent),
        created_at: Utc::now(),
    };
    let id = unit.id;
    db.units.write().insert(id, unit);
    id
}

pub fn lease_draft(unit_id: Uuid) -> LeaseDraft {
    LeaseDraft {
        unit_id,
        tenant_name: "Ngozi Adeyemi".to_string(),
        tenant_email: "Ngozi@Example.com".to_string(),
        start_date: date("2025-02-01"),
        end_date: date("2026-01-31"),
        monthly_rent: None,
    }
}
