//! Admin dashboard route.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use maison_core::dashboard::{DashboardResponse, DashboardTab};
use maison_core::table::{SortDirection, TableQuery};
use maison_shared::AppError;
use maison_shared::types::PageRequest;

use super::error_response;
use crate::AppState;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Tab id, defaults to the overview.
    pub tab: Option<String>,
    /// Time range (`7d`, `30d`, `90d`, `365d`).
    pub range: Option<String>,
    /// Column key of the tab's detail table to sort by.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub dir: Option<String>,
    /// Detail table page, 1-based.
    pub page: Option<u32>,
    /// Detail table page size.
    pub per_page: Option<u32>,
}

/// Builds a table query from the raw sort and page parameters.
pub(crate) fn table_query(
    sort: Option<&str>,
    dir: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<TableQuery, AppError> {
    let direction = match dir.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => raw.parse::<SortDirection>()?,
        None => SortDirection::default(),
    };
    Ok(TableQuery {
        sort: sort
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string),
        direction,
        page: PageRequest::from_query(page, per_page),
    })
}

/// GET /admin/dashboard
///
/// Failed slices render as empty states inside a 200 response. `sort`, `dir`,
/// `page` and `per_page` apply to the active tab's detail table.
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let tab = match parse_tab(query.tab.as_deref()) {
        Ok(tab) => tab,
        Err(e) => return error_response(e),
    };
    let time_range = match state.time_range(query.range.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(e),
    };
    let table = match table_query(
        query.sort.as_deref(),
        query.dir.as_deref(),
        query.page,
        query.per_page,
    ) {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    let data = state
        .dashboard
        .load_kinds(time_range, tab.required_kinds())
        .await;

    let mut response = DashboardResponse::build(tab, &data);
    if let Err(e) = response.view.apply_table_query(&table) {
        return error_response(AppError::from(e));
    }

    info!(
        tab = %tab,
        time_range = %time_range,
        failed = data.errors.len(),
        "Dashboard rendered"
    );

    Json(response).into_response()
}

fn parse_tab(raw: Option<&str>) -> Result<DashboardTab, AppError> {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(DashboardTab::default()),
    }
}
