//! CSV export.
//!
//! Each dataset has a fixed column order. Money columns are written in dollars
//! with two decimals; a file with N rows has exactly N+1 lines.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    AnalyticsError, AnalyticsKind, CategoryPerformance, CityData, CustomerAnalytics, RegionData,
    RevenueDataPoint, TopProduct,
};
use crate::dashboard::DashboardData;

/// Exportable datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDataset {
    /// Daily revenue.
    Revenue,
    /// Top products.
    Products,
    /// Category performance.
    Categories,
    /// Sales by region.
    Regions,
    /// Top cities.
    Cities,
    /// Customer metrics.
    Customers,
}

impl ExportDataset {
    /// Header row for the dataset.
    #[must_use]
    pub const fn header(self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &["Date", "Revenue", "Orders", "Average Order Value", "Growth"],
            Self::Products => &["Product", "Revenue", "Sales", "Growth"],
            Self::Categories => &["Category", "Revenue", "Percentage"],
            Self::Regions => &["Region", "Revenue", "Orders", "Percentage"],
            Self::Cities => &["City", "State", "Revenue", "Orders"],
            Self::Customers => &["Metric", "Value"],
        }
    }

    /// Analytics domain the rows come from.
    #[must_use]
    pub const fn kind(self) -> AnalyticsKind {
        match self {
            Self::Revenue => AnalyticsKind::Revenue,
            Self::Products | Self::Categories => AnalyticsKind::Product,
            Self::Regions | Self::Cities => AnalyticsKind::Geographic,
            Self::Customers => AnalyticsKind::Customer,
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Regions => "regions",
            Self::Cities => "cities",
            Self::Customers => "customers",
        }
    }
}

impl fmt::Display for ExportDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportDataset {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "products" => Ok(Self::Products),
            "categories" => Ok(Self::Categories),
            "regions" => Ok(Self::Regions),
            "cities" => Ok(Self::Cities),
            "customers" => Ok(Self::Customers),
            _ => Err(AnalyticsError::UnknownDataset(s.to_string())),
        }
    }
}

/// A CSV document ready to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download name.
    pub filename: String,
    /// Header fields.
    pub header: Vec<String>,
    /// Data rows.
    pub rows: Vec<Vec<String>>,
}

impl CsvExport {
    /// Creates an export for `dataset` dated `today`.
    #[must_use]
    pub fn new(dataset: ExportDataset, today: NaiveDate, rows: Vec<Vec<String>>) -> Self {
        Self {
            filename: format!("{dataset}-analytics-{}.csv", today.format("%Y-%m-%d")),
            header: dataset.header().iter().map(ToString::to_string).collect(),
            rows,
        }
    }

    /// Renders the document. Lines are joined with `\n`, no trailing newline.
    #[must_use]
    pub fn to_csv(&self) -> String {
        std::iter::once(&self.header)
            .chain(&self.rows)
            .map(|row| {
                row.iter()
                    .map(|field| escape_field(field))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Quotes a field that contains a comma, quote or line break.
#[must_use]
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Rows for the revenue dataset.
#[must_use]
pub fn revenue_rows(points: &[RevenueDataPoint]) -> Vec<Vec<String>> {
    points
        .iter()
        .map(|p| {
            vec![
                p.date.to_string(),
                p.revenue.to_dollars().to_string(),
                p.orders.to_string(),
                p.avg_order_value.to_dollars().to_string(),
                p.growth.unwrap_or_default().to_string(),
            ]
        })
        .collect()
}

/// Rows for the products dataset.
#[must_use]
pub fn product_rows(products: &[TopProduct]) -> Vec<Vec<String>> {
    products
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.revenue.to_dollars().to_string(),
                p.sales.to_string(),
                p.growth.to_string(),
            ]
        })
        .collect()
}

/// Rows for the categories dataset.
#[must_use]
pub fn category_rows(categories: &[CategoryPerformance]) -> Vec<Vec<String>> {
    categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                c.revenue.to_dollars().to_string(),
                c.percentage.to_string(),
            ]
        })
        .collect()
}

/// Rows for the regions dataset.
#[must_use]
pub fn region_rows(regions: &[RegionData]) -> Vec<Vec<String>> {
    regions
        .iter()
        .map(|r| {
            vec![
                r.region.clone(),
                r.revenue.to_dollars().to_string(),
                r.orders.to_string(),
                r.percentage.to_string(),
            ]
        })
        .collect()
}

/// Rows for the cities dataset.
#[must_use]
pub fn city_rows(cities: &[CityData]) -> Vec<Vec<String>> {
    cities
        .iter()
        .map(|c| {
            vec![
                c.city.clone(),
                c.state.clone(),
                c.revenue.to_dollars().to_string(),
                c.orders.to_string(),
            ]
        })
        .collect()
}

/// Rows for the customers dataset.
#[must_use]
pub fn customer_rows(customers: &CustomerAnalytics) -> Vec<Vec<String>> {
    vec![
        vec!["Total Customers".to_string(), customers.total_customers.to_string()],
        vec!["New Customers".to_string(), customers.new_customers.to_string()],
        vec![
            "Returning Customers".to_string(),
            customers.returning_customers.to_string(),
        ],
        vec![
            "Retention Rate".to_string(),
            customers.customer_retention_rate.to_string(),
        ],
        vec![
            "Average Lifetime Value".to_string(),
            customers.average_lifetime_value.to_dollars().to_string(),
        ],
    ]
}

/// Builds the export for `dataset` from whatever the dashboard loaded.
pub fn export_dataset(
    dataset: ExportDataset,
    data: &DashboardData,
    today: NaiveDate,
) -> Result<CsvExport, AnalyticsError> {
    let rows = match dataset {
        ExportDataset::Revenue => revenue_rows(data.revenue.as_deref().ok_or(AnalyticsError::NoData("revenue"))?),
        ExportDataset::Products => product_rows(
            &data
                .product
                .as_ref()
                .ok_or(AnalyticsError::NoData("product"))?
                .top_products,
        ),
        ExportDataset::Categories => category_rows(
            &data
                .product
                .as_ref()
                .ok_or(AnalyticsError::NoData("product"))?
                .category_performance,
        ),
        ExportDataset::Regions => region_rows(
            &data
                .geographic
                .as_ref()
                .ok_or(AnalyticsError::NoData("geographic"))?
                .sales_by_region,
        ),
        ExportDataset::Cities => city_rows(
            &data
                .geographic
                .as_ref()
                .ok_or(AnalyticsError::NoData("geographic"))?
                .top_cities,
        ),
        ExportDataset::Customers => customer_rows(
            data.customer
                .as_ref()
                .ok_or(AnalyticsError::NoData("customer"))?,
        ),
    };
    Ok(CsvExport::new(dataset, today, rows))
}
