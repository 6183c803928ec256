use super::super::entity::{cart, cart_item, wishlist_item};
use crate::contract::{Cart, CartItem, WishlistItem};
use crate::domain::repository::{CartRepository, WishlistRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

// ===== Cart Repository =====

pub struct SeaOrmCartRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCartRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_cart(&self, user_id: Uuid) -> Result<Option<Cart>> {
        let found = cart::Entity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?;

        Ok(found.map(Into::into))
    }
}

#[async_trait]
impl CartRepository for SeaOrmCartRepository {
    async fn get_or_create(&self, user_id: Uuid) -> Result<Cart> {
        if let Some(existing) = self.find_cart(user_id).await? {
            return Ok(existing);
        }

        let cart = Cart {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };
        let active = cart::ActiveModel {
            id: Set(cart.id),
            user_id: Set(cart.user_id),
            created_at: Set(cart.created_at),
        };

        match cart::Entity::insert(active).exec(&*self.db).await {
            Ok(_) => Ok(cart),
            // A concurrent first request won the unique index on user_id
            Err(insert_error) => match self.find_cart(user_id).await? {
                Some(existing) => Ok(existing),
                None => Err(insert_error.into()),
            },
        }
    }

    async fn items(&self, cart_id: Uuid) -> Result<Vec<CartItem>> {
        let rows = cart_item::Entity::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .order_by_asc(cart_item::Column::CreatedAt)
            .order_by_asc(cart_item::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_item(&self, item_id: Uuid) -> Result<Option<CartItem>> {
        let row = cart_item::Entity::find_by_id(item_id)
            .one(&*self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_item(&self, item: &CartItem) -> Result<()> {
        cart_item::Entity::insert(cart_item::ActiveModel::from(item))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn set_quantity(&self, item_id: Uuid, quantity: i32) -> Result<()> {
        cart_item::Entity::update_many()
            .col_expr(cart_item::Column::Quantity, Expr::value(quantity))
            .filter(cart_item::Column::Id.eq(item_id))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<()> {
        cart_item::Entity::delete_by_id(item_id)
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn clear(&self, cart_id: Uuid) -> Result<u64> {
        let result = cart_item::Entity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

// ===== Wishlist Repository =====

pub struct SeaOrmWishlistRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmWishlistRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WishlistRepository for SeaOrmWishlistRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<WishlistItem>> {
        let rows = wishlist_item::Entity::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .order_by_desc(wishlist_item::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, user_id: Uuid, product_id: Uuid) -> Result<Option<WishlistItem>> {
        let row = wishlist_item::Entity::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .filter(wishlist_item::Column::ProductId.eq(product_id))
            .one(&*self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, item: &WishlistItem) -> Result<()> {
        wishlist_item::Entity::insert(wishlist_item::ActiveModel::from(item))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> Result<bool> {
        let result = wishlist_item::Entity::delete_many()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .filter(wishlist_item::Column::ProductId.eq(product_id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
