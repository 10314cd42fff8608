//! Table builders for the dashboard tabs.

use crate::analytics::geographic::RevenueShare;
use crate::analytics::{CityData, RevenueDataPoint, TopProduct};
use crate::table::{Cell, Column, DataTable};

/// Daily revenue, newest first.
#[must_use]
pub fn revenue_table(points: &[RevenueDataPoint]) -> DataTable {
    let mut table = DataTable::new(vec![
        Column::new("date", "Date"),
        Column::new("revenue", "Revenue"),
        Column::new("orders", "Orders"),
        Column::new("aov", "Avg. Order Value"),
    ]);
    for p in points.iter().rev() {
        table.push_row(vec![
            Cell::Text(p.date.to_string()),
            p.revenue.into(),
            p.orders.into(),
            p.avg_order_value.into(),
        ]);
    }
    table
}

/// Top products by revenue.
#[must_use]
pub fn top_products_table(products: &[TopProduct]) -> DataTable {
    let mut table = DataTable::new(vec![
        Column::new("name", "Product"),
        Column::new("revenue", "Revenue"),
        Column::new("sales", "Sales"),
        Column::new("growth", "Growth"),
    ]);
    for p in products {
        table.push_row(vec![
            p.name.as_str().into(),
            p.revenue.into(),
            p.sales.into(),
            Cell::Percent(p.growth),
        ]);
    }
    table
}

/// Top cities.
#[must_use]
pub fn cities_table(cities: &[CityData]) -> DataTable {
    let mut table = DataTable::new(vec![
        Column::new("city", "City"),
        Column::fixed("state", "State"),
        Column::new("revenue", "Revenue"),
        Column::new("orders", "Orders"),
    ]);
    for c in cities {
        table.push_row(vec![
            c.city.as_str().into(),
            c.state.as_str().into(),
            c.revenue.into(),
            c.orders.into(),
        ]);
    }
    table
}

/// Regions with their share of revenue.
#[must_use]
pub fn regions_table(regions: &[RevenueShare]) -> DataTable {
    let mut table = DataTable::new(vec![
        Column::new("region", "Region"),
        Column::new("revenue", "Revenue"),
        Column::new("share", "Share"),
    ]);
    for r in regions {
        table.push_row(vec![
            r.name.as_str().into(),
            r.revenue.into(),
            Cell::Percent(r.share),
        ]);
    }
    table
}
