//! Property-based tests for the analytics summaries.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use maison_shared::types::Cents;

use super::growth::{Change, ChangeType, growth_percentage};
use super::revenue::{RevenueDataPoint, RevenueSummary};

fn points_strategy() -> impl Strategy<Value = Vec<(i64, u64, i64)>> {
    prop::collection::vec((0i64..10_000_000, 0u64..500, 0i64..1_000_000), 0..60)
}

fn to_points(raw: &[(i64, u64, i64)]) -> Vec<RevenueDataPoint> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    raw.iter()
        .enumerate()
        .map(|(i, &(revenue, orders, aov))| RevenueDataPoint {
            date: start + chrono::Duration::days(i as i64),
            revenue: Cents(revenue),
            orders,
            avg_order_value: Cents(aov),
            growth: None,
        })
        .collect()
}

proptest! {
    /// Total revenue is the sum of each day's revenue.
    #[test]
    fn test_total_revenue_is_sum(raw in points_strategy()) {
        let points = to_points(&raw);
        let expected: i64 = raw.iter().map(|(r, _, _)| *r).sum();
        let summary = RevenueSummary::from_points(&points);
        prop_assert_eq!(summary.total_revenue, Cents(expected));
        prop_assert_eq!(summary.days, raw.len());
    }

    /// Average order value is the mean of the daily averages, zero when empty.
    #[test]
    fn test_average_order_value_is_mean(raw in points_strategy()) {
        let points = to_points(&raw);
        let summary = RevenueSummary::from_points(&points);
        if raw.is_empty() {
            prop_assert_eq!(summary.average_order_value, Decimal::ZERO);
        } else {
            let sum: i64 = raw.iter().map(|(_, _, aov)| *aov).sum();
            let expected = Decimal::from(sum) / Decimal::from(raw.len());
            prop_assert_eq!(summary.average_order_value, expected);
        }
    }

    /// Growth has the sign of the difference, and the change type follows it.
    #[test]
    fn test_growth_direction(current in 0i64..1_000_000, previous in 1i64..1_000) {
        let growth = growth_percentage(Decimal::from(current), Decimal::from(previous));
        let change = Change::from_growth(growth);
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => {
                prop_assert!(growth > Decimal::ZERO);
                prop_assert_eq!(change.change_type, ChangeType::Increase);
                prop_assert!(change.display().starts_with('+'));
            }
            std::cmp::Ordering::Less => {
                prop_assert!(growth <= Decimal::ZERO);
                prop_assert!(change.change_type != ChangeType::Increase);
            }
            std::cmp::Ordering::Equal => {
                prop_assert_eq!(change.change_type, ChangeType::Neutral);
            }
        }
    }
}
