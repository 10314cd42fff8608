//! Customer acquisition and retention.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::Cents;

use super::growth::share_percentage;
use crate::charts::{ChartKind, ChartSpec};

/// Response of the customer endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAnalytics {
    /// Unique customers (registered and guest) in the period.
    pub total_customers: u64,
    /// Customers whose first order fell in the period.
    pub new_customers: u64,
    /// Customers who had ordered before the period.
    pub returning_customers: u64,
    /// Returning / total, in percent.
    #[serde(default)]
    pub customer_retention_rate: Decimal,
    /// Average lifetime value (LTV).
    #[serde(default)]
    pub average_lifetime_value: Cents,
    /// Optional named segments; derived from new/returning when absent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<CustomerSegment>,
}

/// A named group of customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSegment {
    /// Segment label.
    pub name: String,
    /// Customers in the segment.
    pub count: u64,
}

/// A segment with its share of all customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentShare {
    /// Segment label.
    pub name: String,
    /// Customers in the segment.
    pub count: u64,
    /// Share of the segment total, in percent.
    pub percentage: Decimal,
}

/// Customer view derived from [`CustomerAnalytics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Unique customers.
    pub total_customers: u64,
    /// New customers.
    pub new_customers: u64,
    /// Returning customers.
    pub returning_customers: u64,
    /// Retention rate in percent.
    pub retention_rate: Decimal,
    /// Average lifetime value.
    pub average_lifetime_value: Cents,
    /// Segment breakdown.
    pub segments: Vec<SegmentShare>,
}

impl CustomerSummary {
    /// Builds the summary; segment shares are zero when there are no customers.
    #[must_use]
    pub fn from_analytics(analytics: &CustomerAnalytics) -> Self {
        let raw: Vec<CustomerSegment> = if analytics.segments.is_empty() {
            vec![
                CustomerSegment {
                    name: "New".to_string(),
                    count: analytics.new_customers,
                },
                CustomerSegment {
                    name: "Returning".to_string(),
                    count: analytics.returning_customers,
                },
            ]
        } else {
            analytics.segments.clone()
        };
        let total: u64 = raw.iter().map(|s| s.count).sum();
        let segments = raw
            .into_iter()
            .map(|s| SegmentShare {
                percentage: share_percentage(Decimal::from(s.count), Decimal::from(total)),
                name: s.name,
                count: s.count,
            })
            .collect();

        Self {
            total_customers: analytics.total_customers,
            new_customers: analytics.new_customers,
            returning_customers: analytics.returning_customers,
            retention_rate: analytics.customer_retention_rate,
            average_lifetime_value: analytics.average_lifetime_value,
            segments,
        }
    }

    /// Customer segments pie chart.
    #[must_use]
    pub fn segment_chart(&self) -> ChartSpec {
        ChartSpec::new(
            ChartKind::Pie,
            "Customer Segments",
            self.segments.iter().map(|s| s.name.clone()).collect(),
        )
        .with_slices(
            "Customers",
            self.segments.iter().map(|s| Decimal::from(s.count)).collect(),
        )
    }
}
