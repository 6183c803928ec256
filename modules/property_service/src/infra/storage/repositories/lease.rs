use super::super::entity::lease;
use crate::contract::{Lease, LeaseFilter, LeaseStatus};
use crate::domain::repository::LeaseRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmLeaseRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLeaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Insert `lease`; `false` when `idx_leases_one_active` already holds an
/// ACTIVE lease for its unit
async fn insert_unless_taken<C: ConnectionTrait>(db: &C, lease: &Lease) -> Result<bool> {
    match lease::Entity::insert(lease::ActiveModel::from(lease))
        .exec(db)
        .await
    {
        Ok(_) => Ok(true),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!(unit_id = %lease.unit_id, "Lease insert lost the race for its unit");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl LeaseRepository for SeaOrmLeaseRepository {
    async fn create_if_unit_free(&self, lease: &Lease) -> Result<bool> {
        let txn = self.db.begin().await?;

        let active = lease::Entity::find()
            .filter(lease::Column::UnitId.eq(lease.unit_id))
            .filter(lease::Column::Status.eq(LeaseStatus::Active.as_str()))
            .count(&txn)
            .await?;
        if active > 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        if !insert_unless_taken(&txn, lease).await? {
            txn.rollback().await?;
            return Ok(false);
        }
        txn.commit().await?;

        Ok(true)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Lease>> {
        lease::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn active_for_units(&self, unit_ids: &[Uuid]) -> Result<Vec<Lease>> {
        if unit_ids.is_empty() {
            return Ok(Vec::new());
        }
        lease::Entity::find()
            .filter(lease::Column::UnitId.is_in(unit_ids.to_vec()))
            .filter(lease::Column::Status.eq(LeaseStatus::Active.as_str()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn close(&self, id: Uuid, to: LeaseStatus, now: DateTime<Utc>) -> Result<bool> {
        let result = lease::Entity::update_many()
            .col_expr(lease::Column::Status, Expr::value(to.as_str()))
            .col_expr(lease::Column::UpdatedAt, Expr::value(now))
            .filter(lease::Column::Id.eq(id))
            .filter(lease::Column::Status.eq(LeaseStatus::Active.as_str()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, filter: &LeaseFilter, page: PageRequest) -> Result<(Vec<Lease>, u64)> {
        let mut query = lease::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(lease::Column::Status.eq(status.as_str()));
        }
        if let Some(unit_id) = filter.unit_id {
            query = query.filter(lease::Column::UnitId.eq(unit_id));
        }

        let total = query.clone().count(&*self.db).await?;

        let leases = query
            .order_by_desc(lease::Column::CreatedAt)
            .order_by_asc(lease::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Lease>>>()?;

        Ok((leases, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Property, PropertyType, Unit};
    use crate::domain::repository::{PropertyRepository, UnitRepository};
    use crate::infra::storage::migrations::Migrator;
    use crate::infra::storage::repositories::{SeaOrmPropertyRepository, SeaOrmUnitRepository};
    use rust_decimal::Decimal;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn unit_in_memory_db() -> (Arc<DatabaseConnection>, Uuid) {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Arc::new(Database::connect(options).await.unwrap());
        Migrator::up(&*db, None).await.unwrap();

        let now = Utc::now();
        let property = Property {
            id: Uuid::new_v4(),
            title: "Palm Court".to_string(),
            description: "Serviced flats".to_string(),
            property_type: PropertyType::Apartment,
            address: "3 Bourdillon Road".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            created_at: now,
            updated_at: now,
        };
        SeaOrmPropertyRepository::new(db.clone())
            .create(&property)
            .await
            .unwrap();
        let unit = Unit {
            id: Uuid::new_v4(),
            property_id: property.id,
            label: "A1".to_string(),
            bedrooms: 2,
            bathrooms: 2,
            monthly_rent: Decimal::from(350_000),
            created_at: now,
        };
        SeaOrmUnitRepository::new(db.clone())
            .create(&unit)
            .await
            .unwrap();

        (db, unit.id)
    }

    fn active_lease(unit_id: Uuid, tenant: &str) -> Lease {
        let now = Utc::now();
        Lease {
            id: Uuid::new_v4(),
            unit_id,
            tenant_name: tenant.to_string(),
            tenant_email: format!("{}@example.com", tenant.to_lowercase()),
            start_date: "2025-02-01".parse().unwrap(),
            end_date: "2026-01-31".parse().unwrap(),
            monthly_rent: Decimal::from(350_000),
            status: LeaseStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_unique_violation_on_active_lease_reports_taken() {
        let (db, unit_id) = unit_in_memory_db().await;

        // Both inserts skip the ACTIVE count, as two racing transactions would
        assert!(insert_unless_taken(&*db, &active_lease(unit_id, "Amaka"))
            .await
            .unwrap());
        assert!(!insert_unless_taken(&*db, &active_lease(unit_id, "Tunde"))
            .await
            .unwrap());

        let repo = SeaOrmLeaseRepository::new(db);
        assert_eq!(repo.active_for_units(&[unit_id]).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_lease_frees_the_unit_index() {
        let (db, unit_id) = unit_in_memory_db().await;
        let repo = SeaOrmLeaseRepository::new(db.clone());

        let first = active_lease(unit_id, "Amaka");
        assert!(repo.create_if_unit_free(&first).await.unwrap());
        assert!(!repo
            .create_if_unit_free(&active_lease(unit_id, "Tunde"))
            .await
            .unwrap());
        assert!(repo
            .close(first.id, LeaseStatus::Ended, Utc::now())
            .await
            .unwrap());
        assert!(insert_unless_taken(&*db, &active_lease(unit_id, "Tunde"))
            .await
            .unwrap());
    }
}
