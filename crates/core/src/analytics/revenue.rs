//! Daily revenue series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::{Cents, DateRange};

use super::growth::{Change, growth_percentage};
use crate::charts::{ChartKind, ChartSpec};

/// One day of revenue as returned by the revenue endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDataPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Revenue for the day.
    pub revenue: Cents,
    /// Completed orders for the day.
    pub orders: u64,
    /// Average order value for the day.
    pub avg_order_value: Cents,
    /// Period growth reported upstream (percent).
    #[serde(default)]
    pub growth: Option<Decimal>,
}

/// Totals over a revenue series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Sum of daily revenue.
    pub total_revenue: Cents,
    /// Sum of daily orders.
    pub total_orders: u64,
    /// Mean of the daily average order values, in cents.
    pub average_order_value: Decimal,
    /// Growth versus the previous period (percent).
    pub growth: Decimal,
    /// Number of days with data.
    pub days: usize,
}

impl RevenueSummary {
    /// Summarizes a series. An empty series yields all zeros.
    #[must_use]
    pub fn from_points(points: &[RevenueDataPoint]) -> Self {
        let total_revenue: Cents = points.iter().map(|p| p.revenue).sum();
        let total_orders: u64 = points.iter().map(|p| p.orders).sum();
        let average_order_value = if points.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = points
                .iter()
                .map(|p| Decimal::from(p.avg_order_value.get()))
                .sum();
            sum / Decimal::from(points.len())
        };
        // Upstream repeats the period growth on every day.
        let growth = points
            .first()
            .and_then(|p| p.growth)
            .unwrap_or(Decimal::ZERO);

        Self {
            total_revenue,
            total_orders,
            average_order_value,
            growth,
            days: points.len(),
        }
    }

    /// Average order value in dollars.
    #[must_use]
    pub fn average_order_value_dollars(&self) -> Decimal {
        self.average_order_value / Decimal::ONE_HUNDRED
    }

    /// Revenue change relative to an earlier summary.
    #[must_use]
    pub fn change_from(&self, previous: &Self) -> Change {
        Change::from_growth(growth_percentage(
            Decimal::from(self.total_revenue.get()),
            Decimal::from(previous.total_revenue.get()),
        ))
    }

    /// The upstream-reported growth as a metric change.
    #[must_use]
    pub fn reported_change(&self) -> Change {
        Change::from_growth(self.growth)
    }
}

/// Keeps the points whose day falls inside `range`.
#[must_use]
pub fn filter_by_range(points: &[RevenueDataPoint], range: &DateRange) -> Vec<RevenueDataPoint> {
    points
        .iter()
        .filter(|p| range.contains(p.date))
        .cloned()
        .collect()
}

/// Splits a long series into the current window and the one before it, then
/// compares their revenue totals.
#[must_use]
pub fn period_over_period(points: &[RevenueDataPoint], range: &DateRange) -> Change {
    let current = RevenueSummary::from_points(&filter_by_range(points, range));
    let previous = RevenueSummary::from_points(&filter_by_range(points, &range.previous()));
    current.change_from(&previous)
}

/// Revenue-over-time chart: a dollars-per-day line with the order count as bars.
#[must_use]
pub fn revenue_chart(points: &[RevenueDataPoint]) -> ChartSpec {
    let labels = points
        .iter()
        .map(|p| p.date.format("%b %d").to_string())
        .collect();
    ChartSpec::new(ChartKind::Line, "Revenue Over Time", labels)
        .with_dataset("Revenue", points.iter().map(|p| p.revenue.to_dollars()).collect())
        .with_dataset_as(
            ChartKind::Bar,
            "Orders",
            points.iter().map(|p| Decimal::from(p.orders)).collect(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};
    use maison_shared::types::TimeRange;
    use rust_decimal_macros::dec;

    fn point(day: u32, revenue: i64, orders: u64, aov: i64) -> RevenueDataPoint {
        RevenueDataPoint {
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            revenue: Cents(revenue),
            orders,
            avg_order_value: Cents(aov),
            growth: Some(dec!(12.5)),
        }
    }

    #[test]
    fn test_summary_totals_and_mean_aov() {
        let points = vec![point(1, 10_000, 2, 5_000), point(2, 30_000, 3, 10_000)];
        let summary = RevenueSummary::from_points(&points);

        assert_eq!(summary.total_revenue, Cents(40_000));
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.average_order_value, dec!(7500));
        assert_eq!(summary.average_order_value_dollars(), dec!(75));
        assert_eq!(summary.growth, dec!(12.5));
        assert_eq!(summary.days, 2);
    }

    #[test]
    fn test_summary_of_empty_series_is_zero() {
        let summary = RevenueSummary::from_points(&[]);
        assert_eq!(summary.total_revenue, Cents::ZERO);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_order_value, Decimal::ZERO);
        assert_eq!(summary.growth, Decimal::ZERO);
    }

    #[test]
    fn test_deserializes_upstream_shape() {
        let json = r#"[{"date":"2026-03-01","revenue":12550,"orders":1,"avgOrderValue":12550,"growth":12.5},
                       {"date":"2026-03-02","revenue":0,"orders":0,"avgOrderValue":0}]"#;
        let points: Vec<RevenueDataPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].revenue, Cents(12550));
        assert_eq!(points[0].growth, Some(dec!(12.5)));
        assert_eq!(points[1].growth, None);
    }

    #[test]
    fn test_filter_by_range_drops_outside_days() {
        let points = vec![point(1, 100, 1, 100), point(15, 200, 1, 200), point(31, 300, 1, 300)];
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap(),
        )
        .unwrap();

        let filtered = filter_by_range(&points, &range);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date.day0(), 14);
    }

    #[test]
    fn test_period_over_period_compares_adjacent_windows() {
        let points = vec![point(2, 10_000, 1, 10_000), point(12, 15_000, 1, 15_000)];
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap(),
        )
        .unwrap();

        let change = period_over_period(&points, &range);
        assert_eq!(change.display(), "+50.0%");
    }

    #[test]
    fn test_revenue_chart_uses_dollars() {
        let chart = revenue_chart(&[point(1, 12550, 1, 12550)]);
        assert_eq!(chart.labels, vec!["Mar 01".to_string()]);
        assert_eq!(chart.datasets[0].data, vec![dec!(125.50)]);
        assert_eq!(chart.datasets[1].data, vec![dec!(1)]);
    }

    #[test]
    fn test_revenue_chart_draws_orders_as_bars() {
        let chart = revenue_chart(&[point(1, 12550, 1, 12550), point(2, 100, 3, 33)]);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.datasets[0].label, "Revenue");
        assert_eq!(chart.datasets[0].kind, None);
        assert_eq!(chart.datasets[1].label, "Orders");
        assert_eq!(chart.datasets[1].kind, Some(ChartKind::Bar));
    }

    #[test]
    fn test_period_over_period_counts_boundary_day_once() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let range = TimeRange::Week.date_range(now);
        // Mar 24 opens the current week; Mar 20 sits in the week before.
        let points = vec![point(20, 5_000, 1, 5_000), point(24, 10_000, 1, 10_000)];

        let change = period_over_period(&points, &range);
        assert_eq!(change.display(), "+100.0%");

        let previous = filter_by_range(&points, &range.previous());
        assert_eq!(previous.len(), 1);
        assert_eq!(previous[0].date.day(), 20);
    }
}
