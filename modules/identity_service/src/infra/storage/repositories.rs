//! SeaORM repository implementations

use super::entity;
use crate::contract::{Session, User, UserFilter};
use crate::domain::repository::{SessionRepository, UserRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

// ===== User Repository =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let active: entity::ActiveModel = user.into();
        let result = entity::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn update(&self, user: &User) -> Result<User> {
        let active: entity::ActiveModel = user.into();
        let result = entity::Entity::update(active).exec(&*self.db).await?;

        result.try_into()
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> Result<(Vec<User>, u64)> {
        let mut query = entity::Entity::find();

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(entity::Column::Email.like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(entity::Column::Name))).like(pattern)),
            );
        }

        if let Some(role) = filter.role {
            query = query.filter(entity::Column::Role.eq(role.as_str()));
        }

        let total = query.clone().count(&*self.db).await?;

        let users = query
            .order_by_desc(entity::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<User>>>()?;

        Ok((users, total))
    }
}

// ===== Session Repository =====

pub struct SeaOrmSessionRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSessionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SeaOrmSessionRepository {
    async fn create(&self, session: &Session) -> Result<()> {
        let active: entity::session::ActiveModel = session.into();
        entity::session::Entity::insert(active)
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<Session>> {
        let result = entity::session::Entity::find_by_id(token_hash)
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, token_hash: &str) -> Result<()> {
        entity::session::Entity::delete_by_id(token_hash)
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = entity::session::Entity::delete_many()
            .filter(entity::session::Column::ExpiresAt.lte(now))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
