use super::super::entity::{cart_item, inventory, order, order_item};
use super::super::mapper::order_from_entities;
use super::like_pattern;
use crate::contract::{Order, OrderFilter, OrderStatus};
use crate::domain::repository::{OrderRepository, StockConflict};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Load the items of `rows` in one query and assemble orders in row order
async fn with_items<C: ConnectionTrait>(db: &C, rows: Vec<order::Model>) -> Result<Vec<Order>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|o| o.id).collect();
    let mut items: HashMap<Uuid, Vec<order_item::Model>> = HashMap::new();
    for item in order_item::Entity::find()
        .filter(order_item::Column::OrderId.is_in(ids))
        .order_by_asc(order_item::Column::ProductName)
        .all(db)
        .await?
    {
        items.entry(item.order_id).or_default().push(item);
    }

    rows.into_iter()
        .map(|row| {
            let lines = items.remove(&row.id).unwrap_or_default();
            order_from_entities(row, lines)
        })
        .collect()
}

/// Add `delta` to a product's stock; negative deltas only apply while enough stock remains
async fn adjust_stock<C: ConnectionTrait>(db: &C, product_id: Uuid, delta: i32) -> Result<bool> {
    let mut update = inventory::Entity::update_many()
        .col_expr(
            inventory::Column::Quantity,
            Expr::col(inventory::Column::Quantity).add(delta),
        )
        .filter(inventory::Column::ProductId.eq(product_id));
    if delta < 0 {
        update = update.filter(inventory::Column::Quantity.gte(-delta));
    }

    let result = update.exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn place(&self, order: &Order, cart_id: Uuid) -> Result<()> {
        let txn = self.db.begin().await?;

        order::Entity::insert(order::ActiveModel::from(order))
            .exec(&txn)
            .await?;
        if !order.items.is_empty() {
            order_item::Entity::insert_many(order.items.iter().map(order_item::ActiveModel::from))
                .exec(&txn)
                .await?;
        }

        for item in &order.items {
            if !adjust_stock(&txn, item.product_id, -item.quantity).await? {
                txn.rollback().await?;
                return Err(StockConflict {
                    product_id: item.product_id,
                }
                .into());
            }
        }

        cart_item::Entity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Order>> {
        let Some(row) = order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        Ok(with_items(&*self.db, vec![row]).await?.pop())
    }

    async fn list(&self, filter: &OrderFilter, page: PageRequest) -> Result<(Vec<Order>, u64)> {
        let mut query = order::Entity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(order::Column::UserId.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(order::Column::Status.eq(status.as_str()));
        }
        if let Some(pattern) = like_pattern(filter.search.as_deref()) {
            let prefix = format!("{}%", pattern.trim_start_matches('%').trim_end_matches('%'));
            query = query.filter(
                Condition::any()
                    .add(order::Column::IdText.like(prefix))
                    .add(order::Column::CustomerEmail.like(pattern)),
            );
        }

        let total = query.clone().count(&*self.db).await?;

        let rows = query
            .order_by_desc(order::Column::CreatedAt)
            .order_by_asc(order::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .all(&*self.db)
            .await?;

        Ok((with_items(&*self.db, rows).await?, total))
    }

    async fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        restock: bool,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self.db.begin().await?;

        let mut update = order::Entity::update_many()
            .col_expr(order::Column::Status, Expr::value(to.as_str()))
            .col_expr(order::Column::UpdatedAt, Expr::value(now))
            .filter(order::Column::Id.eq(id))
            .filter(order::Column::Status.eq(from.as_str()));
        if restock {
            update = update
                .col_expr(order::Column::Restocked, Expr::value(true))
                .filter(order::Column::Restocked.eq(false));
        }

        let result = update.exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        if restock {
            let items = order_item::Entity::find()
                .filter(order_item::Column::OrderId.eq(id))
                .all(&txn)
                .await?;
            for item in items {
                adjust_stock(&txn, item.product_id, item.quantity).await?;
            }
        }

        txn.commit().await?;
        Ok(true)
    }

    async fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Order>> {
        let rows = order::Entity::find()
            .filter(order::Column::CreatedAt.gte(start))
            .filter(order::Column::CreatedAt.lt(end))
            .order_by_asc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        with_items(&*self.db, rows).await
    }
}
