use super::cart::ensure_in_stock;
use super::{internal, Service};
use crate::contract::{CommerceError, Order, OrderFilter, OrderItem, OrderStatus, ShippingAddress};
use crate::domain::events::CommerceEvent;
use crate::domain::repository::StockConflict;
use crate::domain::validation::validate_shipping;
use chrono::Utc;
use idgm_kit::{Page, PageRequest, Principal};
use rust_decimal::Decimal;
use uuid::Uuid;

impl Service {
    /// Turn the caller's cart into a PENDING order
    ///
    /// Stock is decremented and the cart emptied in the same transaction
    /// that inserts the order.
    pub async fn checkout(
        &self,
        principal: &Principal,
        shipping: ShippingAddress,
    ) -> Result<Order, CommerceError> {
        let errors = validate_shipping(&shipping);
        if !errors.is_empty() {
            return Err(CommerceError::Validation { errors });
        }

        let cart = self.cart_for(principal.user_id).await?;
        let lines = self.cart_lines(&cart).await?;
        if lines.is_empty() {
            return Err(CommerceError::validation("cart", "must contain at least one item"));
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            if !line.product.product.is_active {
                return Err(CommerceError::conflict(format!(
                    "Product '{}' is no longer available",
                    line.product.product.name
                )));
            }
            ensure_in_stock(&line.product, line.item.quantity)?;
            items.push(OrderItem {
                id: Uuid::new_v4(),
                order_id,
                product_id: line.item.product_id,
                product_name: line.product.product.name.clone(),
                category: line.product.product.category.clone(),
                quantity: line.item.quantity,
                price: line.item.price,
            });
        }

        let order = Order {
            id: order_id,
            user_id: principal.user_id,
            customer_email: principal.email.clone(),
            status: OrderStatus::Pending,
            total: items.iter().map(OrderItem::line_total).sum::<Decimal>(),
            shipping,
            items,
            restocked: false,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.repos.orders.place(&order, cart.id).await {
            let Some(conflict) = e.downcast_ref::<StockConflict>().copied() else {
                return Err(internal(e));
            };
            tracing::warn!(product_id = %conflict.product_id, "Stock changed during checkout");
            let requested = order
                .items
                .iter()
                .find(|i| i.product_id == conflict.product_id)
                .map_or(0, |i| i.quantity);
            let available = self
                .repos
                .products
                .find_by_id(conflict.product_id)
                .await
                .map_err(internal)?
                .map_or(0, |p| p.inventory.quantity);
            return Err(CommerceError::InsufficientStock {
                product_id: conflict.product_id,
                requested,
                available,
            });
        }

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total = %order.total,
            items = order.items.len(),
            "Order placed"
        );
        self.publish(CommerceEvent::order_placed(&order)).await;
        Ok(order)
    }

    /// The caller's own orders, newest first
    pub async fn list_user_orders(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Order>, CommerceError> {
        let filter = OrderFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        self.list_orders(&filter, page).await
    }

    /// One of the caller's orders; other users' orders read as missing
    pub async fn get_user_order(&self, user_id: Uuid, order_id: Uuid) -> Result<Order, CommerceError> {
        self.get_order(order_id)
            .await?
            .filter(|o| o.user_id == user_id)
            .ok_or_else(|| CommerceError::not_found("Order", order_id))
    }

    /// Admin listing
    pub async fn list_orders(
        &self,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<Page<Order>, CommerceError> {
        let (items, total) = self
            .repos
            .orders
            .list(filter, page)
            .await
            .map_err(internal)?;
        Ok(Page::new(items, total, page))
    }

    /// Admin status change
    ///
    /// `raw_status` must be one of the five wire values. Re-applying the
    /// current status is a no-op; moves outside the transition table are
    /// refused unless enforcement is switched off.
    pub async fn update_order_status(
        &self,
        actor_id: Uuid,
        order_id: Uuid,
        raw_status: &str,
    ) -> Result<Order, CommerceError> {
        let next = OrderStatus::parse(raw_status).ok_or_else(|| {
            CommerceError::validation(
                "status",
                &format!("must be one of {}", OrderStatus::accepted_values()),
            )
        })?;

        let order = self
            .get_order(order_id)
            .await?
            .ok_or_else(|| CommerceError::not_found("Order", order_id))?;
        let current = order.status;
        if current == next {
            return Ok(order);
        }
        if self.settings.enforce_status_transitions && !current.can_transition_to(next) {
            return Err(CommerceError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let restock = next.restocks() && !order.restocked;
        let applied = self
            .repos
            .orders
            .transition(order_id, current, next, restock, Utc::now())
            .await
            .map_err(internal)?;
        if !applied {
            return Err(CommerceError::conflict(
                "Order status changed concurrently; reload and retry",
            ));
        }

        tracing::info!(
            order_id = %order_id,
            from = %current,
            to = %next,
            restock,
            actor_id = %actor_id,
            "Order status changed"
        );
        self.publish(CommerceEvent::status_changed(
            order_id, current, next, restock, actor_id,
        ))
        .await;

        self.get_order(order_id)
            .await?
            .ok_or_else(|| CommerceError::not_found("Order", order_id))
    }

    // ===== Helper Methods =====

    pub(super) async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, CommerceError> {
        self.repos.orders.find(order_id).await.map_err(internal)
    }
}
