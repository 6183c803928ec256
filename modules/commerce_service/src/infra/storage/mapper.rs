//! Entity to model mappers

use super::entity::{cart, cart_item, inventory, order, order_item, payment, product, wishlist_item};
use crate::contract::{
    Cart, CartItem, Inventory, Order, OrderItem, OrderStatus, Payment, PaymentProvider,
    PaymentStatus, Product, ShippingAddress, WishlistItem,
};
use anyhow::anyhow;
use sea_orm::ActiveValue::Set;
use serde_json::{json, Value};

// ===== Catalog =====

impl From<product::Model> for Product {
    fn from(e: product::Model) -> Self {
        Self {
            id: e.id,
            name: e.name,
            slug: e.slug,
            description: e.description,
            category: e.category,
            price: e.price,
            sale_price: e.sale_price,
            sale_starts_at: e.sale_starts_at,
            sale_ends_at: e.sale_ends_at,
            image_url: e.image_url,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<&Product> for product::ActiveModel {
    fn from(m: &Product) -> Self {
        Self {
            id: Set(m.id),
            name: Set(m.name.clone()),
            slug: Set(m.slug.clone()),
            description: Set(m.description.clone()),
            category: Set(m.category.clone()),
            price: Set(m.price),
            sale_price: Set(m.sale_price),
            sale_starts_at: Set(m.sale_starts_at),
            sale_ends_at: Set(m.sale_ends_at),
            image_url: Set(m.image_url.clone()),
            is_active: Set(m.is_active),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        }
    }
}

impl From<inventory::Model> for Inventory {
    fn from(e: inventory::Model) -> Self {
        Self {
            product_id: e.product_id,
            quantity: e.quantity,
            threshold: e.threshold,
        }
    }
}

impl From<&Inventory> for inventory::ActiveModel {
    fn from(m: &Inventory) -> Self {
        Self {
            product_id: Set(m.product_id),
            quantity: Set(m.quantity),
            threshold: Set(m.threshold),
        }
    }
}

// ===== Cart & Wishlist =====

impl From<cart::Model> for Cart {
    fn from(e: cart::Model) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            created_at: e.created_at,
        }
    }
}

impl From<cart_item::Model> for CartItem {
    fn from(e: cart_item::Model) -> Self {
        Self {
            id: e.id,
            cart_id: e.cart_id,
            product_id: e.product_id,
            quantity: e.quantity,
            price: e.price,
            created_at: e.created_at,
        }
    }
}

impl From<&CartItem> for cart_item::ActiveModel {
    fn from(m: &CartItem) -> Self {
        Self {
            id: Set(m.id),
            cart_id: Set(m.cart_id),
            product_id: Set(m.product_id),
            quantity: Set(m.quantity),
            price: Set(m.price),
            created_at: Set(m.created_at),
        }
    }
}

impl From<wishlist_item::Model> for WishlistItem {
    fn from(e: wishlist_item::Model) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            product_id: e.product_id,
            created_at: e.created_at,
        }
    }
}

impl From<&WishlistItem> for wishlist_item::ActiveModel {
    fn from(m: &WishlistItem) -> Self {
        Self {
            id: Set(m.id),
            user_id: Set(m.user_id),
            product_id: Set(m.product_id),
            created_at: Set(m.created_at),
        }
    }
}

// ===== Orders =====

pub fn shipping_to_json(s: &ShippingAddress) -> Value {
    json!({
        "name": s.name,
        "phone": s.phone,
        "address": s.address,
        "city": s.city,
        "state": s.state,
        "country": s.country,
    })
}

pub fn shipping_from_json(v: &Value) -> ShippingAddress {
    let field = |key: &str| {
        v.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    ShippingAddress {
        name: field("name"),
        phone: field("phone"),
        address: field("address"),
        city: field("city"),
        state: field("state"),
        country: field("country"),
    }
}

/// Assemble an order from its row and item rows
pub fn order_from_entities(
    e: order::Model,
    items: Vec<order_item::Model>,
) -> anyhow::Result<Order> {
    let status = OrderStatus::parse(&e.status)
        .ok_or_else(|| anyhow!("Unknown order status '{}' for order {}", e.status, e.id))?;

    Ok(Order {
        id: e.id,
        user_id: e.user_id,
        customer_email: e.customer_email,
        status,
        total: e.total,
        shipping: shipping_from_json(&e.shipping),
        items: items.into_iter().map(Into::into).collect(),
        restocked: e.restocked,
        created_at: e.created_at,
        updated_at: e.updated_at,
    })
}

impl From<&Order> for order::ActiveModel {
    fn from(m: &Order) -> Self {
        Self {
            id: Set(m.id),
            id_text: Set(m.id.to_string()),
            user_id: Set(m.user_id),
            customer_email: Set(m.customer_email.clone()),
            status: Set(m.status.as_str().to_string()),
            total: Set(m.total),
            shipping: Set(shipping_to_json(&m.shipping)),
            restocked: Set(m.restocked),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        }
    }
}

impl From<order_item::Model> for OrderItem {
    fn from(e: order_item::Model) -> Self {
        Self {
            id: e.id,
            order_id: e.order_id,
            product_id: e.product_id,
            product_name: e.product_name,
            category: e.category,
            quantity: e.quantity,
            price: e.price,
        }
    }
}

impl From<&OrderItem> for order_item::ActiveModel {
    fn from(m: &OrderItem) -> Self {
        Self {
            id: Set(m.id),
            order_id: Set(m.order_id),
            product_id: Set(m.product_id),
            product_name: Set(m.product_name.clone()),
            category: Set(m.category.clone()),
            quantity: Set(m.quantity),
            price: Set(m.price),
        }
    }
}

// ===== Payments =====

impl TryFrom<payment::Model> for Payment {
    type Error = anyhow::Error;

    fn try_from(e: payment::Model) -> Result<Self, Self::Error> {
        let provider = PaymentProvider::parse(&e.provider)
            .ok_or_else(|| anyhow!("Unknown provider '{}' for payment {}", e.provider, e.id))?;
        let status = PaymentStatus::parse(&e.status)
            .ok_or_else(|| anyhow!("Unknown status '{}' for payment {}", e.status, e.id))?;

        Ok(Self {
            id: e.id,
            order_id: e.order_id,
            user_id: e.user_id,
            provider,
            reference: e.reference,
            provider_reference: e.provider_reference,
            email: e.email,
            amount: e.amount,
            currency: e.currency,
            status,
            metadata: e.metadata,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

impl From<&Payment> for payment::ActiveModel {
    fn from(m: &Payment) -> Self {
        Self {
            id: Set(m.id),
            order_id: Set(m.order_id),
            user_id: Set(m.user_id),
            provider: Set(m.provider.as_str().to_string()),
            reference: Set(m.reference.clone()),
            provider_reference: Set(m.provider_reference.clone()),
            email: Set(m.email.clone()),
            amount: Set(m.amount),
            currency: Set(m.currency.clone()),
            status: Set(m.status.as_str().to_string()),
            metadata: Set(m.metadata.clone()),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        }
    }
}
