use super::super::entity::{inventory, product};
use super::like_pattern;
use crate::contract::{
    CatalogItem, Inventory, Product, ProductFilter, ProductSort, StockFilter,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
use crate::domain::repository::ProductRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use idgm_kit::PageRequest;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmProductRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn sale_window(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(product::Column::SalePrice.is_not_null())
        .add(
            Condition::any()
                .add(product::Column::SaleStartsAt.is_null())
                .add(product::Column::SaleStartsAt.lte(now)),
        )
        .add(
            Condition::any()
                .add(product::Column::SaleEndsAt.is_null())
                .add(product::Column::SaleEndsAt.gt(now)),
        )
}

/// `CASE WHEN <sale window open> THEN sale_price ELSE price END`
fn effective_price(now: DateTime<Utc>) -> SimpleExpr {
    Expr::case(
        sale_window(now),
        Expr::col((product::Entity, product::Column::SalePrice)),
    )
    .finally(Expr::col((product::Entity, product::Column::Price)))
    .into()
}

/// Bounds the effective price one branch at a time so each comparison
/// runs against a typed column. SQLite gives a CASE expression no
/// affinity and would compare the bound decimal as text.
fn effective_price_bound<F>(now: DateTime<Utc>, bound: F) -> Condition
where
    F: Fn(product::Column) -> SimpleExpr,
{
    Condition::any()
        .add(sale_window(now).add(bound(product::Column::SalePrice)))
        .add(
            Condition::all()
                .add(sale_window(now).not())
                .add(bound(product::Column::Price)),
        )
}

fn join(row: (product::Model, Option<inventory::Model>)) -> CatalogItem {
    let (product, inventory) = row;
    let inventory = inventory.map(Inventory::from).unwrap_or(Inventory {
        product_id: product.id,
        quantity: 0,
        threshold: DEFAULT_LOW_STOCK_THRESHOLD,
    });
    CatalogItem {
        product: Product::from(product),
        inventory,
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create(&self, product: &Product, inventory: &Inventory) -> Result<()> {
        let txn = self.db.begin().await?;
        product::Entity::insert(product::ActiveModel::from(product))
            .exec(&txn)
            .await?;
        inventory::Entity::insert(inventory::ActiveModel::from(inventory))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        product::Entity::update(product::ActiveModel::from(product))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CatalogItem>> {
        let row = product::Entity::find_by_id(id)
            .find_also_related(inventory::Entity)
            .one(&*self.db)
            .await?;

        Ok(row.map(join))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogItem>> {
        let row = product::Entity::find()
            .filter(product::Column::Slug.eq(slug))
            .find_also_related(inventory::Entity)
            .one(&*self.db)
            .await?;

        Ok(row.map(join))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<CatalogItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = product::Entity::find()
            .filter(product::Column::Id.is_in(ids.to_vec()))
            .find_also_related(inventory::Entity)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(join).collect())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<(Vec<CatalogItem>, u64)> {
        let price = effective_price(now);
        let mut query = product::Entity::find().filter(product::Column::IsActive.eq(true));

        if let Some(category) = filter.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            query = query.filter(product::Column::Category.eq(category));
        }
        if let Some(pattern) = like_pattern(filter.search.as_deref()) {
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(product::Column::Description))).like(pattern)),
            );
        }
        if let Some(min) = filter.min_price {
            query = query.filter(effective_price_bound(now, |col| col.gte(min)));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(effective_price_bound(now, |col| col.lte(max)));
        }

        let total = query.clone().count(&*self.db).await?;

        query = match filter.sort {
            ProductSort::Newest => query.order_by_desc(product::Column::CreatedAt),
            ProductSort::PriceAsc => query.order_by(price, Order::Asc),
            ProductSort::PriceDesc => query.order_by(price, Order::Desc),
            ProductSort::Name => query.order_by_asc(product::Column::Name),
        };

        let rows = query
            .order_by_asc(product::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .find_also_related(inventory::Entity)
            .all(&*self.db)
            .await?;

        Ok((rows.into_iter().map(join).collect(), total))
    }

    async fn update_inventory(&self, inventory: &Inventory) -> Result<()> {
        inventory::Entity::update(inventory::ActiveModel::from(inventory))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn list_inventory(
        &self,
        filter: Option<StockFilter>,
        page: PageRequest,
    ) -> Result<(Vec<CatalogItem>, u64)> {
        let quantity = Expr::col((inventory::Entity, inventory::Column::Quantity));
        let mut query = inventory::Entity::find()
            .find_also_related(product::Entity)
            .filter(product::Column::IsActive.eq(true));

        query = match filter {
            Some(StockFilter::Low) => query.filter(
                quantity
                    .clone()
                    .lte(Expr::col((inventory::Entity, inventory::Column::Threshold))),
            ),
            Some(StockFilter::Out) => query.filter(quantity.clone().lte(0)),
            None => query,
        };

        let total = query.clone().count(&*self.db).await?;

        let rows = query
            .order_by_asc(inventory::Column::Quantity)
            .order_by_asc(inventory::Column::ProductId)
            .offset(page.offset())
            .limit(page.limit)
            .all(&*self.db)
            .await?;

        let items = rows
            .into_iter()
            .filter_map(|(stock, product)| {
                product.map(|product| CatalogItem {
                    product: product.into(),
                    inventory: stock.into(),
                })
            })
            .collect();

        Ok((items, total))
    }
}
