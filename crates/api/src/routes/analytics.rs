//! Per-domain analytics routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;

use maison_core::analytics::AnalyticsKind;
use maison_core::dashboard::{DashboardData, DashboardTab, render};
use maison_shared::AppError;
use maison_shared::types::TimeRange;

use super::dashboard::table_query;
use super::error_response;
use crate::AppState;

/// Creates the analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/analytics/{kind}", get(get_analytics))
        .route("/admin/analytics/{kind}/refetch", post(refetch_analytics))
}

/// Query parameters of the export route.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Time range (`7d`, `30d`, `90d`, `365d`).
    pub range: Option<String>,
}

/// Query parameters of the analytics route.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Time range (`7d`, `30d`, `90d`, `365d`).
    pub range: Option<String>,
    /// Detail table column to sort by.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub dir: Option<String>,
    /// Detail table page, 1-based.
    pub page: Option<u32>,
    /// Detail table page size.
    pub per_page: Option<u32>,
}

fn parse_kind(raw: &str) -> Result<AnalyticsKind, AppError> {
    Ok(raw.parse::<AnalyticsKind>()?)
}

/// An upstream failure of the requested domain becomes `ExternalService`.
fn require_slice(kind: AnalyticsKind, data: DashboardData) -> Result<DashboardData, AppError> {
    match data.error_for(kind) {
        Some(message) => Err(AppError::ExternalService(message.to_string())),
        None => Ok(data),
    }
}

/// Loads one domain through the shared resources.
pub(crate) async fn load_kind(
    state: &AppState,
    kind: AnalyticsKind,
    time_range: TimeRange,
) -> Result<DashboardData, AppError> {
    let data = state.dashboard.load_kinds(time_range, &[kind]).await;
    require_slice(kind, data)
}

/// GET /admin/analytics/{kind}
async fn get_analytics(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
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

    let data = match load_kind(&state, kind, time_range).await {
        Ok(data) => data,
        Err(e) => return error_response(e),
    };
    let mut view = render(DashboardTab::for_kind(kind), &data);
    match view.apply_table_query(&table) {
        Ok(()) => Json(view).into_response(),
        Err(e) => error_response(AppError::from(e)),
    }
}

/// POST /admin/analytics/{kind}/refetch
///
/// Repeats the last load of one domain, e.g. behind an empty state's retry
/// button. A domain never loaded before uses the default range.
async fn refetch_analytics(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(e) => return error_response(e),
    };

    let data = state.dashboard.refetch(kind, state.default_range).await;
    info!(
        kind = %kind,
        time_range = %data.time_range,
        recovered = data.error_for(kind).is_none(),
        "Analytics refetched"
    );

    match require_slice(kind, data) {
        Ok(data) => Json(render(DashboardTab::for_kind(kind), &data)).into_response(),
        Err(e) => error_response(e),
    }
}
