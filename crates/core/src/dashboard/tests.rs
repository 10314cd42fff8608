use chrono::NaiveDate;
use rust_decimal_macros::dec;

use maison_shared::types::{Cents, PageRequest, TimeRange};

use super::view::NO_DATA_TITLE;
use super::*;
use crate::analytics::{CustomerAnalytics, RevenueDataPoint};
use crate::metrics::MetricStatus;
use crate::table::{Cell, SortDirection, TableQuery};

fn revenue() -> Vec<RevenueDataPoint> {
    vec![
        RevenueDataPoint {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            revenue: Cents(10_000),
            orders: 1,
            avg_order_value: Cents(10_000),
            growth: Some(dec!(12.5)),
        },
        RevenueDataPoint {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            revenue: Cents(2_550),
            orders: 1,
            avg_order_value: Cents(2_550),
            growth: Some(dec!(12.5)),
        },
    ]
}

fn customers() -> CustomerAnalytics {
    CustomerAnalytics {
        total_customers: 1_200,
        new_customers: 900,
        returning_customers: 300,
        customer_retention_rate: dec!(25),
        average_lifetime_value: Cents(45_000),
        segments: vec![],
    }
}

#[test]
fn test_overview_empty_state_when_no_slices() {
    let data = DashboardData::default();
    match render(DashboardTab::Overview, &data) {
        DashboardView::Empty(state) => {
            assert_eq!(state.title, NO_DATA_TITLE);
            assert_eq!(state.title, "No Analytics Data Available");
            assert!(state.error.is_none());
            assert!(!state.retry);
        }
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn test_overview_empty_state_ignores_geographic_slice() {
    let data = DashboardData {
        geographic: Some(crate::analytics::GeographicAnalytics::default()),
        ..DashboardData::default()
    };
    assert!(matches!(
        render(DashboardTab::Overview, &data),
        DashboardView::Empty(_)
    ));
}

#[test]
fn test_overview_empty_state_offers_retry_on_errors() {
    let mut data = DashboardData::default();
    data.errors
        .insert(AnalyticsKind::Revenue, "connection refused".to_string());
    let DashboardView::Empty(state) = render(DashboardTab::Overview, &data) else {
        panic!("expected empty state");
    };
    assert!(state.retry);
    assert_eq!(state.error.as_deref(), Some("connection refused"));
}

#[test]
fn test_loading_wins_over_empty() {
    let data = DashboardData {
        loading: true,
        ..DashboardData::default()
    };
    assert_eq!(render(DashboardTab::Overview, &data), DashboardView::Loading);
}

#[test]
fn test_overview_metrics() {
    let data = DashboardData {
        revenue: Some(revenue()),
        customer: Some(customers()),
        ..DashboardData::default()
    };
    let DashboardView::Overview(view) = render(DashboardTab::Overview, &data) else {
        panic!("expected overview");
    };

    let values: Vec<&str> = view.metrics.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(values, vec!["$126", "2", "$62.75", "1,200"]);
    assert_eq!(view.metrics[0].change_label.as_deref(), Some("+12.5%"));
    assert_eq!(view.metrics[0].status, MetricStatus::Positive);
    assert!(view.revenue_chart.is_some());
    assert!(view.customer_chart.is_some());
    assert!(view.top_products.is_none());
}

#[test]
fn test_revenue_tab_missing_slice_shows_error() {
    let mut data = DashboardData::default();
    data.errors
        .insert(AnalyticsKind::Revenue, "HTTP 500".to_string());
    let DashboardView::Empty(state) = render(DashboardTab::Revenue, &data) else {
        panic!("expected empty state");
    };
    assert_eq!(state.title, "No Revenue Data Available");
    assert_eq!(state.error.as_deref(), Some("HTTP 500"));
    assert!(state.retry);
}

#[test]
fn test_revenue_tab_table_newest_first() {
    let data = DashboardData {
        revenue: Some(revenue()),
        ..DashboardData::default()
    };
    let DashboardView::Revenue(view) = render(DashboardTab::Revenue, &data) else {
        panic!("expected revenue view");
    };
    assert_eq!(view.summary.total_revenue, Cents(12_550));
    assert_eq!(view.table.rows[0][0].to_string(), "2026-03-02");
    assert_eq!(view.chart.labels.len(), 2);
}

#[test]
fn test_customers_tab() {
    let data = DashboardData {
        customer: Some(customers()),
        ..DashboardData::default()
    };
    let DashboardView::Customers(view) = render(DashboardTab::Customers, &data) else {
        panic!("expected customers view");
    };
    assert_eq!(view.metrics[2].value, "25.0%");
    assert_eq!(view.metrics[3].value, "$450");
}

#[test]
fn test_response_marks_active_tab() {
    let data = DashboardData {
        time_range: TimeRange::Quarter,
        ..DashboardData::default()
    };
    let response = DashboardResponse::build(DashboardTab::Products, &data);
    let active: Vec<DashboardTab> = response
        .tabs
        .iter()
        .filter(|t| t.active)
        .map(|t| t.id)
        .collect();
    assert_eq!(active, vec![DashboardTab::Products]);
    assert_eq!(response.time_range, TimeRange::Quarter);
    assert_eq!(response.tabs.len(), 5);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["timeRange"], "90d");
    assert_eq!(json["view"]["view"], "empty");
}

#[test]
fn test_parse_tab() {
    assert_eq!("Revenue".parse::<DashboardTab>().unwrap(), DashboardTab::Revenue);
    assert_eq!(
        "settings".parse::<DashboardTab>(),
        Err(AnalyticsError::UnknownTab("settings".to_string()))
    );
}

#[test]
fn test_table_query_sorts_and_pages_revenue_table() {
    let data = DashboardData {
        revenue: Some(revenue()),
        ..DashboardData::default()
    };
    let mut view = render(DashboardTab::Revenue, &data);
    view.apply_table_query(&TableQuery {
        sort: Some("revenue".to_string()),
        direction: SortDirection::Asc,
        page: Some(PageRequest::new(1, 1)),
    })
    .unwrap();

    let DashboardView::Revenue(view) = view else {
        panic!("expected revenue view");
    };
    assert_eq!(view.table.rows.len(), 1);
    assert_eq!(view.table.rows[0][1], Cell::Money(Cents(2_550)));
    let page = view.table.page.unwrap();
    assert_eq!(page.total, 2);
    assert!(page.has_next);
}

#[test]
fn test_table_query_rejects_unknown_column() {
    let data = DashboardData {
        revenue: Some(revenue()),
        ..DashboardData::default()
    };
    let mut view = render(DashboardTab::Revenue, &data);
    let query = TableQuery {
        sort: Some("margin".to_string()),
        ..TableQuery::default()
    };
    assert_eq!(
        view.apply_table_query(&query),
        Err(AnalyticsError::UnknownColumn("margin".to_string()))
    );
}

#[test]
fn test_table_query_ignored_by_customers_tab() {
    let data = DashboardData {
        customer: Some(customers()),
        ..DashboardData::default()
    };
    let mut view = render(DashboardTab::Customers, &data);
    let before = view.clone();
    let query = TableQuery {
        sort: Some("margin".to_string()),
        ..TableQuery::default()
    };
    assert!(view.apply_table_query(&query).is_ok());
    assert_eq!(view, before);
}
