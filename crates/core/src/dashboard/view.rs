//! Per-tab dashboard views.

use serde::{Deserialize, Serialize};

use maison_shared::types::TimeRange;

use super::tables::{cities_table, regions_table, revenue_table, top_products_table};
use super::{DashboardData, DashboardTab};
use crate::analytics::revenue::revenue_chart;
use crate::analytics::{
    AnalyticsError, AnalyticsKind, Change, CustomerSummary, GeographicSummary, ProductSummary, RevenueSummary,
};
use crate::charts::ChartSpec;
use crate::metrics::{MetricCard, MetricIcon};
use crate::table::{DataTable, TableQuery};

/// Title of the overview empty state.
pub const NO_DATA_TITLE: &str = "No Analytics Data Available";

/// Placeholder shown when a slice is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Error that caused the empty state, if any.
    pub error: Option<String>,
    /// Whether a retry button should be offered.
    pub retry: bool,
}

/// Overview tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewView {
    /// Headline cards.
    pub metrics: Vec<MetricCard>,
    /// Revenue over time, if revenue loaded.
    pub revenue_chart: Option<ChartSpec>,
    /// Customer segments, if customers loaded.
    pub customer_chart: Option<ChartSpec>,
    /// Top products, if products loaded.
    pub top_products: Option<DataTable>,
    /// Errors of slices that failed while others succeeded.
    pub errors: Vec<String>,
}

/// Revenue tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueView {
    /// Totals.
    pub summary: RevenueSummary,
    /// Headline cards.
    pub metrics: Vec<MetricCard>,
    /// Revenue over time.
    pub chart: ChartSpec,
    /// Daily breakdown.
    pub table: DataTable,
}

/// Customers tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerView {
    /// Derived figures.
    pub summary: CustomerSummary,
    /// Headline cards.
    pub metrics: Vec<MetricCard>,
    /// Segment pie.
    pub chart: ChartSpec,
}

/// Products tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    /// Derived figures.
    pub summary: ProductSummary,
    /// Headline cards.
    pub metrics: Vec<MetricCard>,
    /// Revenue per product.
    pub performance_chart: ChartSpec,
    /// Revenue per category.
    pub category_chart: ChartSpec,
    /// Top products.
    pub table: DataTable,
}

/// Geographic tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicView {
    /// Derived figures.
    pub summary: GeographicSummary,
    /// Headline cards.
    pub metrics: Vec<MetricCard>,
    /// Revenue per region.
    pub region_chart: ChartSpec,
    /// Revenue per country.
    pub country_chart: ChartSpec,
    /// Regions.
    pub regions: DataTable,
    /// Top cities.
    pub cities: DataTable,
}

/// What the selected tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum DashboardView {
    /// Fetches in flight.
    Loading,
    /// Nothing to show.
    Empty(EmptyState),
    /// Overview tab.
    Overview(OverviewView),
    /// Revenue tab.
    Revenue(RevenueView),
    /// Customers tab.
    Customers(CustomerView),
    /// Products tab.
    Products(ProductView),
    /// Geographic tab.
    Geographic(GeographicView),
}

impl DashboardView {
    /// The table a tab lists its detail rows in: daily revenue, top products
    /// or top cities. Other views have none.
    pub fn detail_table_mut(&mut self) -> Option<&mut DataTable> {
        match self {
            Self::Revenue(view) => Some(&mut view.table),
            Self::Products(view) => Some(&mut view.table),
            Self::Geographic(view) => Some(&mut view.cities),
            Self::Loading
            | Self::Empty(_)
            | Self::Overview(_)
            | Self::Customers(_) => None,
        }
    }

    /// Sorts and pages the detail table; a view without one ignores `query`.
    pub fn apply_table_query(&mut self, query: &TableQuery) -> Result<(), AnalyticsError> {
        match self.detail_table_mut() {
            Some(table) => table.apply(query),
            None => Ok(()),
        }
    }
}

/// Tab strip entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabLink {
    /// Tab id.
    pub id: DashboardTab,
    /// Caption.
    pub label: String,
    /// Currently selected.
    pub active: bool,
}

/// Full dashboard payload: tab strip, range picker and the active view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Selected tab.
    pub tab: DashboardTab,
    /// Selected window.
    pub time_range: TimeRange,
    /// Tab strip.
    pub tabs: Vec<TabLink>,
    /// Range options.
    pub time_ranges: Vec<TimeRange>,
    /// Active view.
    pub view: DashboardView,
}

impl DashboardResponse {
    /// Renders `tab` and wraps it with the shell.
    #[must_use]
    pub fn build(tab: DashboardTab, data: &DashboardData) -> Self {
        Self {
            tab,
            time_range: data.time_range,
            tabs: DashboardTab::ALL
                .iter()
                .map(|&t| TabLink {
                    id: t,
                    label: t.label().to_string(),
                    active: t == tab,
                })
                .collect(),
            time_ranges: TimeRange::ALL.to_vec(),
            view: render(tab, data),
        }
    }
}

fn missing(data: &DashboardData, kind: AnalyticsKind, title: &str) -> DashboardView {
    let error = data.error_for(kind).map(ToString::to_string);
    DashboardView::Empty(EmptyState {
        title: format!("No {title} Data Available"),
        message: match error {
            Some(_) => format!("{title} analytics could not be loaded."),
            None => format!("{title} analytics will appear once orders are placed."),
        },
        retry: error.is_some(),
        error,
    })
}

/// Renders one tab from the loaded slices.
#[must_use]
pub fn render(tab: DashboardTab, data: &DashboardData) -> DashboardView {
    if data.loading {
        return DashboardView::Loading;
    }

    match tab {
        DashboardTab::Overview => render_overview(data),
        DashboardTab::Revenue => data.revenue.as_deref().map_or_else(
            || missing(data, AnalyticsKind::Revenue, "Revenue"),
            |points| {
                let summary = RevenueSummary::from_points(points);
                DashboardView::Revenue(RevenueView {
                    metrics: revenue_metrics(&summary),
                    chart: revenue_chart(points),
                    table: revenue_table(points),
                    summary,
                })
            },
        ),
        DashboardTab::Customers => data.customer.as_ref().map_or_else(
            || missing(data, AnalyticsKind::Customer, "Customer"),
            |customer| {
                let summary = CustomerSummary::from_analytics(customer);
                DashboardView::Customers(CustomerView {
                    metrics: customer_metrics(&summary),
                    chart: summary.segment_chart(),
                    summary,
                })
            },
        ),
        DashboardTab::Products => data.product.as_ref().map_or_else(
            || missing(data, AnalyticsKind::Product, "Product"),
            |product| {
                let summary = ProductSummary::from_analytics(product);
                DashboardView::Products(ProductView {
                    metrics: product_metrics(&summary),
                    performance_chart: summary.performance_chart(),
                    category_chart: summary.category_chart(),
                    table: top_products_table(&summary.top_products),
                    summary,
                })
            },
        ),
        DashboardTab::Geographic => data.geographic.as_ref().map_or_else(
            || missing(data, AnalyticsKind::Geographic, "Geographic"),
            |geographic| {
                let summary = GeographicSummary::from_analytics(geographic);
                DashboardView::Geographic(GeographicView {
                    metrics: geographic_metrics(&summary),
                    region_chart: summary.region_chart(),
                    country_chart: summary.country_chart(),
                    regions: regions_table(&summary.regions),
                    cities: cities_table(&summary.cities),
                    summary,
                })
            },
        ),
    }
}

fn render_overview(data: &DashboardData) -> DashboardView {
    if data.has_no_overview_data() {
        let errors: Vec<&str> = data.errors.values().map(String::as_str).collect();
        return DashboardView::Empty(EmptyState {
            title: NO_DATA_TITLE.to_string(),
            message: "Analytics will appear here once your store starts receiving orders."
                .to_string(),
            error: (!errors.is_empty()).then(|| errors.join("; ")),
            retry: !errors.is_empty(),
        });
    }

    let revenue = RevenueSummary::from_points(data.revenue.as_deref().unwrap_or_default());
    let revenue_change = data.revenue.as_ref().map(|_| revenue.reported_change());
    let total_customers = data.customer.as_ref().map_or(0, |c| c.total_customers);

    let metrics = vec![
        MetricCard::currency(
            "Total Revenue",
            revenue.total_revenue,
            revenue_change,
            MetricIcon::DollarSign,
        ),
        MetricCard::count("Total Orders", revenue.total_orders, None, MetricIcon::ShoppingBag),
        MetricCard::average_currency(
            "Average Order Value",
            revenue.average_order_value,
            None,
            MetricIcon::TrendingUp,
        ),
        MetricCard::count("Total Customers", total_customers, None, MetricIcon::Users),
    ];

    DashboardView::Overview(OverviewView {
        metrics,
        revenue_chart: data.revenue.as_deref().map(revenue_chart),
        customer_chart: data
            .customer
            .as_ref()
            .map(|c| CustomerSummary::from_analytics(c).segment_chart()),
        top_products: data
            .product
            .as_ref()
            .map(|p| top_products_table(&ProductSummary::from_analytics(p).top_products)),
        errors: data.errors.values().cloned().collect(),
    })
}

fn revenue_metrics(summary: &RevenueSummary) -> Vec<MetricCard> {
    let change: Option<Change> = Some(summary.reported_change());
    vec![
        MetricCard::currency(
            "Total Revenue",
            summary.total_revenue,
            change,
            MetricIcon::DollarSign,
        ),
        MetricCard::count("Total Orders", summary.total_orders, None, MetricIcon::ShoppingBag),
        MetricCard::average_currency(
            "Average Order Value",
            summary.average_order_value,
            None,
            MetricIcon::TrendingUp,
        ),
    ]
}

fn customer_metrics(summary: &CustomerSummary) -> Vec<MetricCard> {
    vec![
        MetricCard::count("Total Customers", summary.total_customers, None, MetricIcon::Users),
        MetricCard::count("New Customers", summary.new_customers, None, MetricIcon::Users),
        MetricCard::percentage(
            "Retention Rate",
            summary.retention_rate,
            None,
            MetricIcon::Repeat,
        ),
        MetricCard::currency(
            "Avg. Lifetime Value",
            summary.average_lifetime_value,
            None,
            MetricIcon::DollarSign,
        ),
    ]
}

fn product_metrics(summary: &ProductSummary) -> Vec<MetricCard> {
    let mut metrics = vec![
        MetricCard::currency(
            "Top Product Revenue",
            summary.total_revenue,
            None,
            MetricIcon::DollarSign,
        ),
        MetricCard::count("Units Sold", summary.total_sales, None, MetricIcon::Package),
        MetricCard::decimal("Inventory Turns", summary.inventory_turns, MetricIcon::Repeat),
    ];
    if let Some(best) = &summary.best_seller {
        metrics.push(MetricCard::currency(
            &format!("Best Seller: {}", best.name),
            best.revenue,
            Some(Change::from_growth(best.growth)),
            MetricIcon::TrendingUp,
        ));
    }
    metrics
}

fn geographic_metrics(summary: &GeographicSummary) -> Vec<MetricCard> {
    vec![
        MetricCard::currency(
            "Regional Revenue",
            summary.total_revenue,
            None,
            MetricIcon::Globe,
        ),
        MetricCard::count("Regional Orders", summary.total_orders, None, MetricIcon::ShoppingBag),
    ]
}
