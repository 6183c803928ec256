//! Sales analytics aggregation over raw order and payment rows
//!
//! Repositories return everything created inside the window; the figures are
//! computed here so they are identical on every database backend.

use crate::contract::{
    CategorySales, DailyRevenue, Order, Overview, Payment, PaymentProvider, PaymentStatus,
    ProductSales, ProviderStats,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

pub fn overview(orders: &[Order], payments: &[Payment]) -> Overview {
    let revenue_orders: Vec<&Order> = revenue_orders(orders).collect();
    let revenue: Decimal = revenue_orders.iter().map(|o| o.total).sum();
    let average_order_value = if revenue_orders.is_empty() {
        Decimal::ZERO
    } else {
        (revenue / Decimal::from(revenue_orders.len())).round_dp(2)
    };
    let customers = orders.iter().map(|o| o.user_id).collect::<HashSet<_>>().len();

    Overview {
        revenue,
        orders: orders.len() as u64,
        average_order_value,
        customers: customers as u64,
        payments_succeeded: count_status(payments, PaymentStatus::Success),
        payments_failed: count_status(payments, PaymentStatus::Failed),
    }
}

/// One entry per calendar day from `start` to `end` inclusive, zero-filled
pub fn daily_revenue(
    orders: &[Order],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<NaiveDate, (Decimal, u64)> = start
        .date_naive()
        .iter_days()
        .take_while(|d| *d <= end.date_naive())
        .map(|d| (d, (Decimal::ZERO, 0)))
        .collect();

    for order in revenue_orders(orders) {
        if let Some(day) = days.get_mut(&order.created_at.date_naive()) {
            day.0 += order.total;
            day.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (revenue, orders))| DailyRevenue {
            date,
            revenue,
            orders,
        })
        .collect()
}

/// Revenue and units per category, highest revenue first
pub fn categories(orders: &[Order]) -> Vec<CategorySales> {
    let mut totals: HashMap<&str, (Decimal, i64)> = HashMap::new();
    for item in revenue_orders(orders).flat_map(|o| o.items.iter()) {
        let entry = totals.entry(item.category.as_str()).or_default();
        entry.0 += item.line_total();
        entry.1 += i64::from(item.quantity);
    }

    let mut rows: Vec<CategorySales> = totals
        .into_iter()
        .map(|(category, (revenue, quantity))| CategorySales {
            category: category.to_string(),
            revenue,
            quantity,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.category.cmp(&b.category)));
    rows
}

/// Per-provider payment outcome counts; every provider is listed
pub fn providers(payments: &[Payment]) -> Vec<ProviderStats> {
    PaymentProvider::ALL
        .into_iter()
        .map(|provider| {
            let mut stats = ProviderStats {
                provider,
                succeeded: 0,
                failed: 0,
                initiated: 0,
                amount: Decimal::ZERO,
            };
            for payment in payments.iter().filter(|p| p.provider == provider) {
                match payment.status {
                    PaymentStatus::Success => {
                        stats.succeeded += 1;
                        stats.amount += payment.amount;
                    }
                    PaymentStatus::Failed => stats.failed += 1,
                    PaymentStatus::Initiated => stats.initiated += 1,
                }
            }
            stats
        })
        .collect()
}

/// Best sellers by units, then revenue, then name
pub fn top_products(orders: &[Order], limit: usize) -> Vec<ProductSales> {
    let mut totals: HashMap<Uuid, ProductSales> = HashMap::new();
    for item in revenue_orders(orders).flat_map(|o| o.items.iter()) {
        let entry = totals.entry(item.product_id).or_insert_with(|| ProductSales {
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            quantity: 0,
            revenue: Decimal::ZERO,
        });
        entry.quantity += i64::from(item.quantity);
        entry.revenue += item.line_total();
    }

    let mut rows: Vec<ProductSales> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| b.revenue.cmp(&a.revenue))
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    rows.truncate(limit);
    rows
}

fn revenue_orders(orders: &[Order]) -> impl Iterator<Item = &Order> {
    orders.iter().filter(|o| o.status.counts_as_revenue())
}

fn count_status(payments: &[Payment], status: PaymentStatus) -> u64 {
    payments.iter().filter(|p| p.status == status).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{OrderItem, OrderStatus, ShippingAddress};
    use chrono::Duration;

    fn order(status: OrderStatus, total: i64, created_at: DateTime<Utc>) -> Order {
        let id = Uuid::new_v4();
        Order {
            id,
            user_id: Uuid::new_v4(),
            customer_email: "buyer@example.com".to_string(),
            status,
            total: Decimal::from(total),
            shipping: ShippingAddress::default(),
            items: Vec::new(),
            restocked: false,
            created_at,
            updated_at: created_at,
        }
    }

    fn item(product_id: Uuid, name: &str, category: &str, quantity: i32, price: i64) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            product_id,
            product_name: name.to_string(),
            category: category.to_string(),
            quantity,
            price: Decimal::from(price),
        }
    }

    #[test]
    fn test_overview_counts_only_paid_and_fulfilled_revenue() {
        let now = Utc::now();
        let orders = vec![
            order(OrderStatus::Paid, 100, now),
            order(OrderStatus::Fulfilled, 300, now),
            order(OrderStatus::Pending, 1_000, now),
            order(OrderStatus::Cancelled, 1_000, now),
            order(OrderStatus::Refunded, 1_000, now),
        ];

        let summary = overview(&orders, &[]);
        assert_eq!(summary.revenue, Decimal::from(400));
        assert_eq!(summary.orders, 5);
        assert_eq!(summary.average_order_value, Decimal::from(200));
        assert_eq!(summary.customers, 5);
    }

    #[test]
    fn test_overview_without_revenue_has_zero_average() {
        let summary = overview(&[order(OrderStatus::Pending, 50, Utc::now())], &[]);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.average_order_value, Decimal::ZERO);
    }

    #[test]
    fn test_daily_revenue_zero_fills() {
        let end = Utc::now();
        let start = end - Duration::days(6);
        let orders = vec![
            order(OrderStatus::Paid, 120, end - Duration::days(2)),
            order(OrderStatus::Pending, 999, end - Duration::days(2)),
        ];

        let series = daily_revenue(&orders, start, end);
        assert_eq!(series.len(), 7);
        assert_eq!(series.first().map(|d| d.date), Some(start.date_naive()));
        assert_eq!(series.last().map(|d| d.date), Some(end.date_naive()));

        let busy: Vec<_> = series.iter().filter(|d| d.orders > 0).collect();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].revenue, Decimal::from(120));
        assert_eq!(busy[0].date, (end - Duration::days(2)).date_naive());
        assert_eq!(
            series.iter().filter(|d| d.revenue.is_zero()).count(),
            6
        );
    }

    #[test]
    fn test_categories_sorted_by_revenue() {
        let now = Utc::now();
        let mut paid = order(OrderStatus::Paid, 0, now);
        paid.items = vec![
            item(Uuid::new_v4(), "Scarf", "Fashion", 2, 10),
            item(Uuid::new_v4(), "Lamp", "Home", 1, 90),
            item(Uuid::new_v4(), "Belt", "Fashion", 1, 5),
        ];
        let mut cancelled = order(OrderStatus::Cancelled, 0, now);
        cancelled.items = vec![item(Uuid::new_v4(), "Sofa", "Furniture", 1, 5_000)];

        let rows = categories(&[paid, cancelled]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Home");
        assert_eq!(rows[1].category, "Fashion");
        assert_eq!(rows[1].revenue, Decimal::from(25));
        assert_eq!(rows[1].quantity, 3);
    }

    #[test]
    fn test_top_products_tie_break() {
        let now = Utc::now();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut paid = order(OrderStatus::Fulfilled, 0, now);
        paid.items = vec![
            item(a, "Beads", "Fashion", 3, 10),
            item(b, "Anklet", "Fashion", 3, 10),
            item(c, "Mat", "Home", 3, 20),
        ];

        let rows = top_products(&[paid], 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, c);
        assert_eq!(rows[1].product_name, "Anklet");
    }
}
