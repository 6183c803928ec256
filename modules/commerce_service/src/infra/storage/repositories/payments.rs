use super::super::entity::payment;
use crate::contract::{Payment, PaymentFilter};
use crate::domain::repository::PaymentRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;

pub struct SeaOrmPaymentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<()> {
        payment::Entity::insert(payment::ActiveModel::from(payment))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<()> {
        payment::Entity::update(payment::ActiveModel::from(payment))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>> {
        payment::Entity::find()
            .filter(payment::Column::Reference.eq(reference))
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list(&self, filter: &PaymentFilter, page: PageRequest) -> Result<(Vec<Payment>, u64)> {
        let mut query = payment::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(payment::Column::Status.eq(status.as_str()));
        }
        if let Some(provider) = filter.provider {
            query = query.filter(payment::Column::Provider.eq(provider.as_str()));
        }

        let total = query.clone().count(&*self.db).await?;

        let payments = query
            .order_by_desc(payment::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Payment>>>()?;

        Ok((payments, total))
    }

    async fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Payment>> {
        payment::Entity::find()
            .filter(payment::Column::CreatedAt.gte(start))
            .filter(payment::Column::CreatedAt.lt(end))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
