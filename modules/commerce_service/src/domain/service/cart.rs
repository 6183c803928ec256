use super::{internal, Service};
use crate::contract::{Cart, CartItem, CartLine, CartView, CatalogItem, CommerceError};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

impl Service {
    /// The caller's cart, created on first access
    pub async fn get_cart(&self, user_id: Uuid) -> Result<CartView, CommerceError> {
        let cart = self.cart_for(user_id).await?;
        self.cart_view(cart).await
    }

    /// Add a product; repeated adds sum quantities and keep the first price
    pub async fn add_to_cart(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartView, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::validation("quantity", "must be at least 1"));
        }

        let product = self
            .repos
            .products
            .find_by_id(product_id)
            .await
            .map_err(internal)?
            .filter(|item| item.product.is_active)
            .ok_or_else(|| CommerceError::not_found("Product", product_id))?;

        let cart = self.cart_for(user_id).await?;
        let items = self.repos.carts.items(cart.id).await.map_err(internal)?;

        match items.iter().find(|i| i.product_id == product_id) {
            Some(existing) => {
                let total = existing.quantity.saturating_add(quantity);
                ensure_in_stock(&product, total)?;
                self.repos
                    .carts
                    .set_quantity(existing.id, total)
                    .await
                    .map_err(internal)?;
                tracing::info!(user_id = %user_id, product_id = %product_id, quantity = total, "Cart line merged");
            }
            None => {
                ensure_in_stock(&product, quantity)?;
                let now = Utc::now();
                let item = CartItem {
                    id: Uuid::new_v4(),
                    cart_id: cart.id,
                    product_id,
                    quantity,
                    price: product.product.effective_price(now),
                    created_at: now,
                };
                self.repos.carts.insert_item(&item).await.map_err(internal)?;
                tracing::info!(user_id = %user_id, product_id = %product_id, quantity, "Cart line added");
            }
        }

        self.cart_view(cart).await
    }

    /// Set a line's quantity; zero or below removes the line
    pub async fn update_cart_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartView, CommerceError> {
        let cart = self.cart_for(user_id).await?;
        let item = self.owned_item(&cart, item_id).await?;

        if quantity <= 0 {
            self.repos.carts.delete_item(item.id).await.map_err(internal)?;
            tracing::info!(user_id = %user_id, item_id = %item_id, "Cart line removed by quantity");
        } else {
            let product = self
                .repos
                .products
                .find_by_id(item.product_id)
                .await
                .map_err(internal)?
                .ok_or_else(|| CommerceError::not_found("Product", item.product_id))?;
            ensure_in_stock(&product, quantity)?;
            self.repos
                .carts
                .set_quantity(item.id, quantity)
                .await
                .map_err(internal)?;
        }

        self.cart_view(cart).await
    }

    pub async fn remove_cart_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<CartView, CommerceError> {
        let cart = self.cart_for(user_id).await?;
        let item = self.owned_item(&cart, item_id).await?;
        self.repos.carts.delete_item(item.id).await.map_err(internal)?;
        tracing::info!(user_id = %user_id, item_id = %item_id, "Cart line removed");

        self.cart_view(cart).await
    }

    pub async fn clear_cart(&self, user_id: Uuid) -> Result<CartView, CommerceError> {
        let cart = self.cart_for(user_id).await?;
        let removed = self.repos.carts.clear(cart.id).await.map_err(internal)?;
        tracing::info!(user_id = %user_id, removed, "Cart cleared");

        self.cart_view(cart).await
    }

    // ===== Helper Methods =====

    pub(super) async fn cart_for(&self, user_id: Uuid) -> Result<Cart, CommerceError> {
        self.repos
            .carts
            .get_or_create(user_id)
            .await
            .map_err(internal)
    }

    /// Lines of `cart` joined with their products, in insertion order
    pub(super) async fn cart_lines(&self, cart: &Cart) -> Result<Vec<CartLine>, CommerceError> {
        let items = self.repos.carts.items(cart.id).await.map_err(internal)?;
        let ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        let mut products: HashMap<Uuid, CatalogItem> = self
            .repos
            .products
            .find_many(&ids)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|p| (p.product.id, p))
            .collect();

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            match products.remove(&item.product_id) {
                Some(product) => lines.push(CartLine { item, product }),
                None => tracing::warn!(item_id = %item.id, product_id = %item.product_id, "Cart line references a missing product"),
            }
        }
        Ok(lines)
    }

    async fn cart_view(&self, cart: Cart) -> Result<CartView, CommerceError> {
        let lines = self.cart_lines(&cart).await?;
        Ok(CartView { cart, lines })
    }

    async fn owned_item(&self, cart: &Cart, item_id: Uuid) -> Result<CartItem, CommerceError> {
        self.repos
            .carts
            .find_item(item_id)
            .await
            .map_err(internal)?
            .filter(|item| item.cart_id == cart.id)
            .ok_or_else(|| CommerceError::not_found("Cart item", item_id))
    }
}

pub(super) fn ensure_in_stock(product: &CatalogItem, requested: i32) -> Result<(), CommerceError> {
    let available = product.inventory.quantity;
    if requested > available {
        return Err(CommerceError::InsufficientStock {
            product_id: product.product.id,
            requested,
            available,
        });
    }
    Ok(())
}
