//! Sales by region, city and country.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::Cents;

use super::growth::share_percentage;
use crate::charts::{ChartKind, ChartSpec};

/// Response of the geographic endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicAnalytics {
    /// Revenue and orders per sales region.
    #[serde(default)]
    pub sales_by_region: Vec<RegionData>,
    /// Highest revenue cities.
    #[serde(default)]
    pub top_cities: Vec<CityData>,
    /// Revenue per country.
    #[serde(default)]
    pub country_breakdown: Vec<CountryData>,
}

/// One sales region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionData {
    /// Region name.
    pub region: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Orders in the period.
    pub orders: u64,
    /// Share reported upstream, in percent.
    #[serde(default)]
    pub percentage: Decimal,
}

/// One city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityData {
    /// City name.
    pub city: String,
    /// State or province code.
    #[serde(default)]
    pub state: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Orders in the period.
    pub orders: u64,
}

/// One country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryData {
    /// Country name.
    pub country: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Share reported upstream, in percent.
    #[serde(default)]
    pub percentage: Decimal,
}

/// A named slice of revenue with its share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueShare {
    /// Region or country name.
    pub name: String,
    /// Revenue in the period.
    pub revenue: Cents,
    /// Revenue / total, in percent.
    pub share: Decimal,
}

/// Geographic view derived from [`GeographicAnalytics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicSummary {
    /// Revenue across all regions.
    pub total_revenue: Cents,
    /// Orders across all regions.
    pub total_orders: u64,
    /// Region with the highest revenue.
    pub top_region: Option<String>,
    /// Region shares.
    pub regions: Vec<RevenueShare>,
    /// Country shares.
    pub countries: Vec<RevenueShare>,
    /// Cities, highest revenue first.
    pub cities: Vec<CityData>,
}

fn shares<'a>(items: impl Iterator<Item = (&'a str, Cents)>) -> Vec<RevenueShare> {
    let items: Vec<(&str, Cents)> = items.collect();
    let total: Cents = items.iter().map(|(_, revenue)| *revenue).sum();
    items
        .into_iter()
        .map(|(name, revenue)| RevenueShare {
            name: name.to_string(),
            revenue,
            share: share_percentage(Decimal::from(revenue.get()), Decimal::from(total.get())),
        })
        .collect()
}

impl GeographicSummary {
    /// Builds the summary. An empty response gives an empty summary.
    #[must_use]
    pub fn from_analytics(analytics: &GeographicAnalytics) -> Self {
        let top_region = analytics
            .sales_by_region
            .iter()
            .fold(None::<&RegionData>, |best, r| match best {
                Some(b) if b.revenue >= r.revenue => Some(b),
                _ => Some(r),
            })
            .map(|r| r.region.clone());

        let mut cities = analytics.top_cities.clone();
        cities.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        Self {
            total_revenue: analytics.sales_by_region.iter().map(|r| r.revenue).sum(),
            total_orders: analytics.sales_by_region.iter().map(|r| r.orders).sum(),
            top_region,
            regions: shares(
                analytics
                    .sales_by_region
                    .iter()
                    .map(|r| (r.region.as_str(), r.revenue)),
            ),
            countries: shares(
                analytics
                    .country_breakdown
                    .iter()
                    .map(|c| (c.country.as_str(), c.revenue)),
            ),
            cities,
        }
    }

    /// Sales by region bar chart.
    #[must_use]
    pub fn region_chart(&self) -> ChartSpec {
        ChartSpec::new(
            ChartKind::Bar,
            "Sales by Region",
            self.regions.iter().map(|r| r.name.clone()).collect(),
        )
        .with_dataset(
            "Revenue",
            self.regions.iter().map(|r| r.revenue.to_dollars()).collect(),
        )
    }

    /// Country breakdown pie chart.
    #[must_use]
    pub fn country_chart(&self) -> ChartSpec {
        ChartSpec::new(
            ChartKind::Pie,
            "Country Breakdown",
            self.countries.iter().map(|c| c.name.clone()).collect(),
        )
        .with_slices(
            "Revenue",
            self.countries
                .iter()
                .map(|c| c.revenue.to_dollars())
                .collect(),
        )
    }
}
