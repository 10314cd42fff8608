//! Analytics datasets and summaries.
//!
//! This module reshapes the upstream analytics responses:
//! - Revenue time series
//! - Customer acquisition and retention
//! - Product and category performance
//! - Geographic distribution
//!
//! Every computation is a single pass over the response; nothing here holds state.

pub mod customer;
pub mod error;
pub mod geographic;
pub mod growth;
pub mod product;
pub mod revenue;

#[cfg(test)]
mod tests;

pub use customer::{CustomerAnalytics, CustomerSummary};
pub use error::AnalyticsError;
pub use geographic::{CityData, CountryData, GeographicAnalytics, GeographicSummary, RegionData};
pub use growth::{Change, ChangeType, growth_percentage, share_percentage};
pub use product::{CategoryPerformance, ProductAnalytics, ProductSummary, TopProduct};
pub use revenue::{RevenueDataPoint, RevenueSummary};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four analytics domains served by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsKind {
    /// Daily revenue series.
    Revenue,
    /// Customer metrics.
    Customer,
    /// Product and category performance.
    Product,
    /// Sales by region, city and country.
    Geographic,
}

impl AnalyticsKind {
    /// All kinds in dashboard order.
    pub const ALL: [Self; 4] = [Self::Revenue, Self::Customer, Self::Product, Self::Geographic];

    /// Path segment used by the upstream endpoints.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Customer => "customer",
            Self::Product => "product",
            Self::Geographic => "geographic",
        }
    }
}

impl fmt::Display for AnalyticsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "customer" | "customers" => Ok(Self::Customer),
            "product" | "products" => Ok(Self::Product),
            "geographic" | "geography" => Ok(Self::Geographic),
            _ => Err(AnalyticsError::UnknownKind(s.to_string())),
        }
    }
}
