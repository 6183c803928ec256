//! SeaORM repositories against an in-memory SQLite database

mod common;

use common::{dec, lease_draft, print_test_header};
use idgm_kit::PageRequest;
use property_service::contract::{
    LeaseFilter, LeaseStatus, PropertyDraft, PropertyFilter, UnitDraft,
};
use property_service::domain::{NoOpEventPublisher, Repositories, Service};
use property_service::infra::storage::migrations::Migrator;
use property_service::infra::storage::repositories::{
    SeaOrmLeaseRepository, SeaOrmPropertyRepository, SeaOrmUnitRepository,
};
use property_service::PropertyError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use uuid::Uuid;

async fn sqlite_service() -> (Arc<Service>, Arc<DatabaseConnection>) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Arc::new(Database::connect(options).await.expect("sqlite connects"));
    Migrator::up(&*db, None).await.expect("migrations apply");

    let repos = Repositories {
        properties: Arc::new(SeaOrmPropertyRepository::new(db.clone())),
        units: Arc::new(SeaOrmUnitRepository::new(db.clone())),
        leases: Arc::new(SeaOrmLeaseRepository::new(db.clone())),
    };
    (
        Arc::new(Service::new(repos, Arc::new(NoOpEventPublisher))),
        db,
    )
}

fn property_draft(title: &str, city: &str) -> PropertyDraft {
    PropertyDraft {
        title: title.to_string(),
        description: "Serviced, with 24h power".to_string(),
        property_type: "apartment".to_string(),
        address: "4 Bourdillon Road".to_string(),
        city: city.to_string(),
        state: "Lagos".to_string(),
    }
}

async fn property_with_unit(service: &Service, title: &str, city: &str) -> (Uuid, Uuid) {
    let property = service
        .create_property(property_draft(title, city))
        .await
        .expect("create property");
    let unit = service
        .add_unit(
            property.id,
            UnitDraft {
                label: "A1".to_string(),
                bedrooms: 3,
                bathrooms: 2,
                monthly_rent: dec("450000"),
            },
        )
        .await
        .expect("add unit");
    (property.id, unit.unit.id)
}

#[tokio::test]
async fn test_migrations_record_distinct_names() {
    print_test_header(
        "test_migrations_record_distinct_names",
        "A second migration run finds both migrations applied under their own names",
    );
    let (_, db) = sqlite_service().await;

    Migrator::up(&*db, None).await.expect("rerun is a no-op");
    let applied = Migrator::get_applied_migrations(&*db)
        .await
        .expect("history readable");
    let applied: Vec<&str> = applied.iter().map(|m| m.name()).collect();

    assert_eq!(
        applied,
        vec![
            "m20250315_000001_create_properties",
            "m20250315_000002_create_leases",
        ]
    );
}

#[tokio::test]
async fn test_one_active_lease_per_unit() {
    print_test_header(
        "test_one_active_lease_per_unit",
        "A leased unit refuses a second lease until the first one closes",
    );
    let (service, _db) = sqlite_service().await;
    let (_, unit_id) = property_with_unit(&service, "Palm Court", "Ikoyi").await;

    let first = service
        .create_lease(lease_draft(unit_id))
        .await
        .expect("first lease");
    assert_eq!(first.monthly_rent, dec("450000"));

    let err = service
        .create_lease(lease_draft(unit_id))
        .await
        .expect_err("unit is taken");
    assert!(matches!(err, PropertyError::Conflict { .. }));

    service
        .update_lease_status(first.id, "ENDED")
        .await
        .expect("end lease");
    let second = service
        .create_lease(lease_draft(unit_id))
        .await
        .expect("unit is free again");

    let active = service
        .list_leases(
            &LeaseFilter {
                status: Some(LeaseStatus::Active),
                unit_id: Some(unit_id),
            },
            PageRequest::new(None, None, 100),
        )
        .await
        .expect("list leases");
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].id, second.id);
}

#[tokio::test]
async fn test_occupancy_counts_and_city_filter() {
    print_test_header(
        "test_occupancy_counts_and_city_filter",
        "Listing counts occupied units and matches the city without regard to case",
    );
    let (service, _db) = sqlite_service().await;
    let (ikoyi, unit_id) = property_with_unit(&service, "Palm Court", "Ikoyi").await;
    property_with_unit(&service, "Harbour View", "Lekki").await;
    service
        .create_lease(lease_draft(unit_id))
        .await
        .expect("lease");

    let page = service
        .list_properties(
            &PropertyFilter {
                city: Some("IKOYI".to_string()),
                ..Default::default()
            },
            PageRequest::new(None, None, 100),
        )
        .await
        .expect("list properties");

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].property.id, ikoyi);
    assert_eq!(page.items[0].unit_count, 1);
    assert_eq!(page.items[0].occupied_units, 1);
}

#[tokio::test]
async fn test_delete_removes_units_and_closed_leases() {
    print_test_header(
        "test_delete_removes_units_and_closed_leases",
        "Deleting a vacant property clears its units and lease history",
    );
    let (service, _db) = sqlite_service().await;
    let (property_id, unit_id) = property_with_unit(&service, "Palm Court", "Ikoyi").await;
    let lease = service
        .create_lease(lease_draft(unit_id))
        .await
        .expect("lease");

    let err = service
        .delete_property(property_id)
        .await
        .expect_err("leased property");
    assert!(matches!(err, PropertyError::Conflict { .. }));

    service
        .update_lease_status(lease.id, "TERMINATED")
        .await
        .expect("terminate");
    service
        .delete_property(property_id)
        .await
        .expect("vacant property deletes");

    assert!(matches!(
        service.get_property(property_id).await,
        Err(PropertyError::NotFound { .. })
    ));
    let leases = service
        .list_leases(
            &LeaseFilter {
                unit_id: Some(unit_id),
                ..Default::default()
            },
            PageRequest::new(None, None, 100),
        )
        .await
        .expect("list leases");
    assert_eq!(leases.total, 0);
}
