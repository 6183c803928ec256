use super::super::entity::{lease, property, unit};
use crate::contract::{Property, PropertyFilter, Unit};
use crate::domain::repository::{PropertyRepository, UnitRepository};
use anyhow::Result;
use async_trait::async_trait;
use idgm_kit::PageRequest;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmPropertyRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn lower(col: property::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col(col)))
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn create(&self, property: &Property) -> Result<()> {
        property::Entity::insert(property::ActiveModel::from(property))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn update(&self, property: &Property) -> Result<()> {
        property::Entity::update(property::ActiveModel::from(property))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        // Children first, so the delete does not depend on FK cascade support
        let txn = self.db.begin().await?;
        let unit_ids: Vec<Uuid> = unit::Entity::find()
            .filter(unit::Column::PropertyId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();
        if !unit_ids.is_empty() {
            lease::Entity::delete_many()
                .filter(lease::Column::UnitId.is_in(unit_ids))
                .exec(&txn)
                .await?;
            unit::Entity::delete_many()
                .filter(unit::Column::PropertyId.eq(id))
                .exec(&txn)
                .await?;
        }
        let result = property::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Property>> {
        property::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<(Vec<Property>, u64)> {
        let mut query = property::Entity::find();

        if let Some(city) = filter.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            query = query.filter(lower(property::Column::City).eq(city.to_lowercase()));
        }
        if let Some(property_type) = filter.property_type {
            query = query.filter(property::Column::PropertyType.eq(property_type.as_str()));
        }
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(lower(property::Column::Title).like(pattern.clone()))
                    .add(lower(property::Column::Description).like(pattern.clone()))
                    .add(lower(property::Column::Address).like(pattern)),
            );
        }

        let total = query.clone().count(&*self.db).await?;

        let properties = query
            .order_by_desc(property::Column::CreatedAt)
            .order_by_asc(property::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Property>>>()?;

        Ok((properties, total))
    }
}

pub struct SeaOrmUnitRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUnitRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitRepository for SeaOrmUnitRepository {
    async fn create(&self, unit: &Unit) -> Result<()> {
        unit::Entity::insert(unit::ActiveModel::from(unit))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Unit>> {
        Ok(unit::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Unit::from))
    }

    async fn for_properties(&self, property_ids: &[Uuid]) -> Result<Vec<Unit>> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        let units = unit::Entity::find()
            .filter(unit::Column::PropertyId.is_in(property_ids.to_vec()))
            .order_by_asc(unit::Column::Label)
            .order_by_asc(unit::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(units.into_iter().map(Unit::from).collect())
    }
}
