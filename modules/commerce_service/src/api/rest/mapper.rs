//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{
    AnalyticsReport, CartView, CatalogItem, Order, Payment, PaymentInit, ProductDraft,
    ShippingAddress, WishlistEntry,
};
use chrono::{DateTime, Utc};

impl ProductDto {
    /// Render a product with its price as of `now`
    pub fn at(item: CatalogItem, now: DateTime<Utc>) -> Self {
        let CatalogItem { product, inventory } = item;
        Self {
            effective_price: product.effective_price(now),
            on_sale: product.on_sale(now),
            stock_status: inventory.status().as_str().to_string(),
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            category: product.category,
            price: product.price,
            sale_price: product.sale_price,
            sale_starts_at: product.sale_starts_at,
            sale_ends_at: product.sale_ends_at,
            image_url: product.image_url,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<CatalogItem> for ProductDto {
    fn from(item: CatalogItem) -> Self {
        Self::at(item, Utc::now())
    }
}

impl From<CatalogItem> for InventoryDto {
    fn from(item: CatalogItem) -> Self {
        Self {
            product_id: item.product.id,
            status: item.inventory.status().as_str().to_string(),
            product_name: item.product.name,
            slug: item.product.slug,
            category: item.product.category,
            quantity: item.inventory.quantity,
            threshold: item.inventory.threshold,
        }
    }
}

impl From<&ProductRequest> for ProductDraft {
    fn from(req: &ProductRequest) -> Self {
        Self {
            name: req.name.clone(),
            description: req.description.clone(),
            category: req.category.clone(),
            price: req.price,
            sale_price: req.sale_price,
            sale_starts_at: req.sale_starts_at,
            sale_ends_at: req.sale_ends_at,
            image_url: req.image_url.clone(),
        }
    }
}

impl From<CartView> for CartDto {
    fn from(view: CartView) -> Self {
        let now = Utc::now();
        let subtotal = view.subtotal();
        let item_count = view.item_count();

        Self {
            id: view.cart.id,
            items: view
                .lines
                .into_iter()
                .map(|line| CartItemDto {
                    id: line.item.id,
                    product_id: line.item.product_id,
                    line_total: line.item.line_total(),
                    current_price: line.product.product.effective_price(now),
                    stock_status: line.product.inventory.status().as_str().to_string(),
                    name: line.product.product.name,
                    slug: line.product.product.slug,
                    image_url: line.product.product.image_url,
                    quantity: line.item.quantity,
                    price: line.item.price,
                })
                .collect(),
            subtotal,
            item_count,
        }
    }
}

impl From<WishlistEntry> for WishlistItemDto {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            id: entry.item.id,
            product: entry.product.into(),
            created_at: entry.item.created_at,
        }
    }
}

impl From<ShippingDto> for ShippingAddress {
    fn from(dto: ShippingDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            country: dto.country,
        }
    }
}

impl From<ShippingAddress> for ShippingDto {
    fn from(s: ShippingAddress) -> Self {
        Self {
            name: s.name,
            phone: s.phone,
            address: s.address,
            city: s.city,
            state: s.state,
            country: s.country,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            customer_email: order.customer_email,
            status: order.status.as_str().to_string(),
            allowed_next: order
                .status
                .allowed_next()
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            total: order.total,
            shipping: order.shipping.into(),
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemDto {
                    line_total: item.line_total(),
                    id: item.id,
                    product_id: item.product_id,
                    product_name: item.product_name,
                    category: item.category,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<PaymentInit> for PaymentInitDto {
    fn from(init: PaymentInit) -> Self {
        Self {
            reference: init.payment.reference,
            authorization_url: init.authorization_url,
            provider: init.payment.provider.as_str().to_string(),
            payment_id: init.payment.id,
        }
    }
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            user_id: p.user_id,
            provider: p.provider.as_str().to_string(),
            reference: p.reference,
            provider_reference: p.provider_reference,
            email: p.email,
            amount: p.amount,
            currency: p.currency,
            status: p.status.as_str().to_string(),
            metadata: p.metadata,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<AnalyticsReport> for AnalyticsData {
    fn from(report: AnalyticsReport) -> Self {
        match report {
            AnalyticsReport::Overview(o) => AnalyticsData::Overview(OverviewDto {
                revenue: o.revenue,
                orders: o.orders,
                average_order_value: o.average_order_value,
                customers: o.customers,
                payments_succeeded: o.payments_succeeded,
                payments_failed: o.payments_failed,
            }),
            AnalyticsReport::Revenue(days) => AnalyticsData::Revenue(
                days.into_iter()
                    .map(|d| DailyRevenueDto {
                        date: d.date,
                        revenue: d.revenue,
                        orders: d.orders,
                    })
                    .collect(),
            ),
            AnalyticsReport::Categories(rows) => AnalyticsData::Categories(
                rows.into_iter()
                    .map(|c| CategorySalesDto {
                        category: c.category,
                        revenue: c.revenue,
                        quantity: c.quantity,
                    })
                    .collect(),
            ),
            AnalyticsReport::Providers(rows) => AnalyticsData::Providers(
                rows.into_iter()
                    .map(|p| ProviderStatsDto {
                        provider: p.provider.as_str().to_string(),
                        succeeded: p.succeeded,
                        failed: p.failed,
                        initiated: p.initiated,
                        amount: p.amount,
                    })
                    .collect(),
            ),
            AnalyticsReport::TopProducts(rows) => AnalyticsData::TopProducts(
                rows.into_iter()
                    .map(|p| ProductSalesDto {
                        product_id: p.product_id,
                        product_name: p.product_name,
                        quantity: p.quantity,
                        revenue: p.revenue,
                    })
                    .collect(),
            ),
        }
    }
}
