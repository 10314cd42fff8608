//! Product and category performance.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use maison_shared::types::Cents;

use super::growth::share_percentage;
use crate::charts::{ChartKind, ChartSpec};

/// Response of the product endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalytics {
    /// Best performing products.
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    /// Revenue per category.
    #[serde(default)]
    pub category_performance: Vec<CategoryPerformance>,
    /// Annualized inventory turns.
    #[serde(default)]
    pub inventory_turns: Decimal,
}

/// A product ranked by revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    /// Catalog id (upstream sends it as a string or a number).
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Product name.
    pub name: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Units sold.
    pub sales: u64,
    /// Growth in percent.
    #[serde(default)]
    pub growth: Decimal,
}

/// Revenue for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    /// Category name.
    pub category: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Share reported upstream, in percent.
    #[serde(default)]
    pub percentage: Decimal,
    /// Chart colour suggested upstream.
    #[serde(default)]
    pub color: Option<String>,
}

fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// A category with its recomputed share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category name.
    pub category: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Revenue / total category revenue, in percent.
    pub share: Decimal,
    /// Chart colour.
    pub color: Option<String>,
}

/// Product view derived from [`ProductAnalytics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Revenue across the top products.
    pub total_revenue: Cents,
    /// Units sold across the top products.
    pub total_sales: u64,
    /// Product with the highest revenue.
    pub best_seller: Option<TopProduct>,
    /// Top products ordered by revenue, highest first.
    pub top_products: Vec<TopProduct>,
    /// Category breakdown.
    pub categories: Vec<CategoryShare>,
    /// Annualized inventory turns.
    pub inventory_turns: Decimal,
}

impl ProductSummary {
    /// Builds the summary. Ties on revenue keep upstream order.
    #[must_use]
    pub fn from_analytics(analytics: &ProductAnalytics) -> Self {
        let mut top_products = analytics.top_products.clone();
        top_products.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        let category_total: Cents = analytics
            .category_performance
            .iter()
            .map(|c| c.revenue)
            .sum();
        let categories = analytics
            .category_performance
            .iter()
            .map(|c| CategoryShare {
                category: c.category.clone(),
                revenue: c.revenue,
                share: share_percentage(
                    Decimal::from(c.revenue.get()),
                    Decimal::from(category_total.get()),
                ),
                color: c.color.clone(),
            })
            .collect();

        Self {
            total_revenue: top_products.iter().map(|p| p.revenue).sum(),
            total_sales: top_products.iter().map(|p| p.sales).sum(),
            best_seller: top_products.first().cloned(),
            top_products,
            categories,
            inventory_turns: analytics.inventory_turns,
        }
    }

    /// Product performance bar chart (revenue in dollars per product).
    #[must_use]
    pub fn performance_chart(&self) -> ChartSpec {
        ChartSpec::new(
            ChartKind::Bar,
            "Product Performance",
            self.top_products.iter().map(|p| p.name.clone()).collect(),
        )
        .with_dataset(
            "Revenue",
            self.top_products
                .iter()
                .map(|p| p.revenue.to_dollars())
                .collect(),
        )
        .with_dataset(
            "Units Sold",
            self.top_products
                .iter()
                .map(|p| Decimal::from(p.sales))
                .collect(),
        )
    }

    /// Category doughnut chart; upstream colours win over the palette.
    #[must_use]
    pub fn category_chart(&self) -> ChartSpec {
        let chart = ChartSpec::new(
            ChartKind::Doughnut,
            "Sales by Category",
            self.categories.iter().map(|c| c.category.clone()).collect(),
        )
        .with_slices(
            "Revenue",
            self.categories
                .iter()
                .map(|c| c.revenue.to_dollars())
                .collect(),
        );
        let overrides: Vec<Option<String>> =
            self.categories.iter().map(|c| c.color.clone()).collect();
        chart.with_slice_colors(&overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn analytics() -> ProductAnalytics {
        serde_json::from_str(
            r##"{
                "topProducts": [
                    {"id": "7", "name": "Pearl Drop", "revenue": 50000, "sales": 2, "growth": 19.0},
                    {"id": 3, "name": "Solitaire", "revenue": 150000, "sales": 1, "growth": 25.0}
                ],
                "categoryPerformance": [
                    {"category": "Fine Jewelry", "revenue": 90000, "percentage": 45, "color": "#D4AF37"},
                    {"category": "Wedding Bands", "revenue": 30000, "percentage": 15}
                ],
                "inventoryTurns": 2.4
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        assert_eq!(analytics().top_products[1].id, "3");
    }

    #[test]
    fn test_summary_orders_by_revenue_and_totals() {
        let summary = ProductSummary::from_analytics(&analytics());
        assert_eq!(summary.total_revenue, Cents(200_000));
        assert_eq!(summary.total_sales, 3);
        assert_eq!(summary.best_seller.as_ref().unwrap().name, "Solitaire");
        assert_eq!(summary.top_products[1].name, "Pearl Drop");
        assert_eq!(summary.inventory_turns, dec!(2.4));
    }

    #[test]
    fn test_category_shares_are_recomputed() {
        let summary = ProductSummary::from_analytics(&analytics());
        assert_eq!(summary.categories[0].share, dec!(75));
        assert_eq!(summary.categories[1].share, dec!(25));
    }

    #[test]
    fn test_empty_analytics() {
        let summary = ProductSummary::from_analytics(&ProductAnalytics::default());
        assert!(summary.best_seller.is_none());
        assert_eq!(summary.total_revenue, Cents::ZERO);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn test_category_chart_prefers_upstream_colors() {
        let chart = ProductSummary::from_analytics(&analytics()).category_chart();
        let colors = &chart.datasets[0].colors;
        assert_eq!(colors[0], "#D4AF37");
        assert_eq!(colors[1], crate::charts::palette_color(1));
    }
}
