use super::{internal, Service};
use crate::contract::{AnalyticsKind, AnalyticsReport, CommerceError, Period};
use crate::domain::analytics;
use chrono::Utc;

const MAX_TOP_PRODUCTS: usize = 50;

impl Service {
    /// Admin sales report for the window ending now
    pub async fn analytics(
        &self,
        kind: AnalyticsKind,
        period: Period,
        limit: Option<usize>,
    ) -> Result<AnalyticsReport, CommerceError> {
        let (start, end) = period.window(Utc::now());

        let report = match kind {
            AnalyticsKind::Overview => {
                let orders = self.repos.orders.in_range(start, end).await.map_err(internal)?;
                let payments = self
                    .repos
                    .payments
                    .in_range(start, end)
                    .await
                    .map_err(internal)?;
                AnalyticsReport::Overview(analytics::overview(&orders, &payments))
            }
            AnalyticsKind::Revenue => {
                let orders = self.repos.orders.in_range(start, end).await.map_err(internal)?;
                AnalyticsReport::Revenue(analytics::daily_revenue(&orders, start, end))
            }
            AnalyticsKind::Categories => {
                let orders = self.repos.orders.in_range(start, end).await.map_err(internal)?;
                AnalyticsReport::Categories(analytics::categories(&orders))
            }
            AnalyticsKind::Providers => {
                let payments = self
                    .repos
                    .payments
                    .in_range(start, end)
                    .await
                    .map_err(internal)?;
                AnalyticsReport::Providers(analytics::providers(&payments))
            }
            AnalyticsKind::TopProducts => {
                let limit = limit
                    .unwrap_or(self.settings.top_products_limit)
                    .clamp(1, MAX_TOP_PRODUCTS);
                let orders = self.repos.orders.in_range(start, end).await.map_err(internal)?;
                AnalyticsReport::TopProducts(analytics::top_products(&orders, limit))
            }
        };

        tracing::debug!(?kind, period = period.as_str(), "Analytics report computed");
        Ok(report)
    }
}
