//! Admin analytics dashboard.
//!
//! The dashboard shell routes between five tabs. Each tab renders from the
//! slices the loader managed to fetch; a missing slice renders an empty state.

pub mod tables;
pub mod view;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use maison_shared::types::TimeRange;

use crate::analytics::{
    AnalyticsError, AnalyticsKind, CustomerAnalytics, GeographicAnalytics, ProductAnalytics,
    RevenueDataPoint,
};

pub use view::{DashboardResponse, DashboardView, EmptyState, render};

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    /// Headline metrics across every domain.
    #[default]
    Overview,
    /// Revenue detail.
    Revenue,
    /// Customer detail.
    Customers,
    /// Product detail.
    Products,
    /// Geographic detail.
    Geographic,
}

impl DashboardTab {
    /// Tabs in display order.
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Revenue,
        Self::Customers,
        Self::Products,
        Self::Geographic,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Revenue => "revenue",
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Geographic => "geographic",
        }
    }

    /// Tab caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Revenue => "Revenue",
            Self::Customers => "Customers",
            Self::Products => "Products",
            Self::Geographic => "Geographic",
        }
    }

    /// Detail tab for one analytics domain.
    #[must_use]
    pub const fn for_kind(kind: AnalyticsKind) -> Self {
        match kind {
            AnalyticsKind::Revenue => Self::Revenue,
            AnalyticsKind::Customer => Self::Customers,
            AnalyticsKind::Product => Self::Products,
            AnalyticsKind::Geographic => Self::Geographic,
        }
    }

    /// The slices this tab needs; overview needs them all.
    #[must_use]
    pub fn required_kinds(self) -> &'static [AnalyticsKind] {
        match self {
            Self::Overview => &AnalyticsKind::ALL,
            Self::Revenue => &[AnalyticsKind::Revenue],
            Self::Customers => &[AnalyticsKind::Customer],
            Self::Products => &[AnalyticsKind::Product],
            Self::Geographic => &[AnalyticsKind::Geographic],
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardTab {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "revenue" => Ok(Self::Revenue),
            "customers" => Ok(Self::Customers),
            "products" => Ok(Self::Products),
            "geographic" => Ok(Self::Geographic),
            _ => Err(AnalyticsError::UnknownTab(s.to_string())),
        }
    }
}

/// Everything the dashboard loader fetched for one time range.
///
/// Each slice is independent: `None` means it was not loaded or its fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Selected window.
    pub time_range: TimeRange,
    /// Daily revenue.
    pub revenue: Option<Vec<RevenueDataPoint>>,
    /// Customer metrics.
    pub customer: Option<CustomerAnalytics>,
    /// Product metrics.
    pub product: Option<ProductAnalytics>,
    /// Geographic metrics.
    pub geographic: Option<GeographicAnalytics>,
    /// A fetch is still in flight.
    pub loading: bool,
    /// Error text per failed slice.
    pub errors: BTreeMap<AnalyticsKind, String>,
}

impl DashboardData {
    /// True when none of the overview slices is present.
    #[must_use]
    pub fn has_no_overview_data(&self) -> bool {
        self.revenue.is_none() && self.customer.is_none() && self.product.is_none()
    }

    /// Error text for a slice, if its fetch failed.
    #[must_use]
    pub fn error_for(&self, kind: AnalyticsKind) -> Option<&str> {
        self.errors.get(&kind).map(String::as_str)
    }
}
