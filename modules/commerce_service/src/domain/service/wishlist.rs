use super::{internal, Service};
use crate::contract::{CatalogItem, CommerceError, WishlistEntry, WishlistItem};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

impl Service {
    pub async fn list_wishlist(&self, user_id: Uuid) -> Result<Vec<WishlistEntry>, CommerceError> {
        let items = self
            .repos
            .wishlists
            .list(user_id)
            .await
            .map_err(internal)?;
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

        Ok(items
            .into_iter()
            .filter_map(|item| {
                products
                    .remove(&item.product_id)
                    .map(|product| WishlistEntry { item, product })
            })
            .collect())
    }

    /// Idempotent; adding an already listed product returns the existing entry
    pub async fn add_to_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistEntry, CommerceError> {
        let product = self
            .repos
            .products
            .find_by_id(product_id)
            .await
            .map_err(internal)?
            .filter(|item| item.product.is_active)
            .ok_or_else(|| CommerceError::not_found("Product", product_id))?;

        let existing = self
            .repos
            .wishlists
            .find(user_id, product_id)
            .await
            .map_err(internal)?;
        let item = match existing {
            Some(item) => item,
            None => {
                let item = WishlistItem {
                    id: Uuid::new_v4(),
                    user_id,
                    product_id,
                    created_at: Utc::now(),
                };
                self.repos.wishlists.insert(&item).await.map_err(internal)?;
                tracing::info!(user_id = %user_id, product_id = %product_id, "Wishlist item added");
                item
            }
        };

        Ok(WishlistEntry { item, product })
    }

    /// Removing a product that is not listed is a no-op
    pub async fn remove_from_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), CommerceError> {
        let removed = self
            .repos
            .wishlists
            .remove(user_id, product_id)
            .await
            .map_err(internal)?;
        if removed {
            tracing::info!(user_id = %user_id, product_id = %product_id, "Wishlist item removed");
        }
        Ok(())
    }
}
