use super::{internal, Service};
use crate::contract::{
    CatalogItem, CommerceError, Inventory, Product, ProductDraft, ProductFilter, StockFilter,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
use crate::domain::validation::{validate_product, validate_stock_levels};
use chrono::Utc;
use idgm_kit::{validation::slugify, Page, PageRequest};
use uuid::Uuid;

impl Service {
    // ===== Storefront =====

    /// Active products for the storefront
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<CatalogItem>, CommerceError> {
        let (items, total) = self
            .repos
            .products
            .list(filter, Utc::now(), page)
            .await
            .map_err(internal)?;
        Ok(Page::new(items, total, page))
    }

    /// Look a product up by id or slug; inactive products are hidden
    pub async fn get_product(&self, id_or_slug: &str) -> Result<CatalogItem, CommerceError> {
        let found = match Uuid::parse_str(id_or_slug) {
            Ok(id) => self.repos.products.find_by_id(id).await,
            Err(_) => self.repos.products.find_by_slug(id_or_slug).await,
        }
        .map_err(internal)?;

        found
            .filter(|item| item.product.is_active)
            .ok_or_else(|| CommerceError::not_found("Product", id_or_slug))
    }

    // ===== Admin =====

    pub async fn create_product(
        &self,
        draft: ProductDraft,
        quantity: Option<i32>,
        threshold: Option<i32>,
    ) -> Result<CatalogItem, CommerceError> {
        let mut errors = validate_product(&draft);
        errors.extend(validate_stock_levels(quantity, threshold));
        let slug = slugify(&draft.name);
        if slug.is_empty() && errors.is_empty() {
            errors.push(idgm_kit::FieldError::new(
                "name",
                "must contain at least one letter or digit",
            ));
        }
        if !errors.is_empty() {
            return Err(CommerceError::Validation { errors });
        }
        self.ensure_slug_free(&slug, None).await?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            slug,
            description: draft.description,
            category: draft.category.trim().to_string(),
            price: draft.price,
            sale_price: draft.sale_price,
            sale_starts_at: draft.sale_starts_at,
            sale_ends_at: draft.sale_ends_at,
            image_url: draft.image_url.filter(|u| !u.trim().is_empty()),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let inventory = Inventory {
            product_id: product.id,
            quantity: quantity.unwrap_or(0),
            threshold: threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
        };

        self.repos
            .products
            .create(&product, &inventory)
            .await
            .map_err(internal)?;
        tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");

        Ok(CatalogItem { product, inventory })
    }

    /// Replace a product's editable fields; `active` toggles visibility
    pub async fn update_product(
        &self,
        id: Uuid,
        draft: ProductDraft,
        active: Option<bool>,
    ) -> Result<CatalogItem, CommerceError> {
        let errors = validate_product(&draft);
        if !errors.is_empty() {
            return Err(CommerceError::Validation { errors });
        }
        let mut item = self.admin_product(id).await?;

        let slug = slugify(&draft.name);
        if slug.is_empty() {
            return Err(CommerceError::validation(
                "name",
                "must contain at least one letter or digit",
            ));
        }
        if slug != item.product.slug {
            self.ensure_slug_free(&slug, Some(id)).await?;
        }

        let product = &mut item.product;
        product.name = draft.name.trim().to_string();
        product.slug = slug;
        product.description = draft.description;
        product.category = draft.category.trim().to_string();
        product.price = draft.price;
        product.sale_price = draft.sale_price;
        product.sale_starts_at = draft.sale_starts_at;
        product.sale_ends_at = draft.sale_ends_at;
        product.image_url = draft.image_url.filter(|u| !u.trim().is_empty());
        if let Some(active) = active {
            product.is_active = active;
        }
        product.updated_at = Utc::now();

        self.repos.products.update(product).await.map_err(internal)?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(item)
    }

    /// Soft delete: the product disappears from the storefront only
    pub async fn delete_product(&self, id: Uuid) -> Result<(), CommerceError> {
        let mut item = self.admin_product(id).await?;
        if !item.product.is_active {
            return Ok(());
        }
        item.product.is_active = false;
        item.product.updated_at = Utc::now();
        self.repos
            .products
            .update(&item.product)
            .await
            .map_err(internal)?;
        tracing::info!(product_id = %id, "Product deactivated");
        Ok(())
    }

    pub async fn update_inventory(
        &self,
        product_id: Uuid,
        quantity: Option<i32>,
        threshold: Option<i32>,
    ) -> Result<CatalogItem, CommerceError> {
        let errors = validate_stock_levels(quantity, threshold);
        if !errors.is_empty() {
            return Err(CommerceError::Validation { errors });
        }
        let mut item = self.admin_product(product_id).await?;
        if let Some(quantity) = quantity {
            item.inventory.quantity = quantity;
        }
        if let Some(threshold) = threshold {
            item.inventory.threshold = threshold;
        }

        self.repos
            .products
            .update_inventory(&item.inventory)
            .await
            .map_err(internal)?;
        tracing::info!(
            product_id = %product_id,
            quantity = item.inventory.quantity,
            threshold = item.inventory.threshold,
            "Inventory updated"
        );
        Ok(item)
    }

    pub async fn list_inventory(
        &self,
        filter: Option<StockFilter>,
        page: PageRequest,
    ) -> Result<Page<CatalogItem>, CommerceError> {
        let (items, total) = self
            .repos
            .products
            .list_inventory(filter, page)
            .await
            .map_err(internal)?;
        Ok(Page::new(items, total, page))
    }

    // ===== Helper Methods =====

    /// Any product, active or not
    async fn admin_product(&self, id: Uuid) -> Result<CatalogItem, CommerceError> {
        self.repos
            .products
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| CommerceError::not_found("Product", id))
    }

    async fn ensure_slug_free(&self, slug: &str, owner: Option<Uuid>) -> Result<(), CommerceError> {
        let existing = self
            .repos
            .products
            .find_by_slug(slug)
            .await
            .map_err(internal)?;
        match existing {
            Some(item) if Some(item.product.id) != owner => Err(CommerceError::conflict(format!(
                "A product with slug '{}' already exists",
                slug
            ))),
            _ => Ok(()),
        }
    }
}
