//! CSV export route.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tracing::info;

use maison_core::export::{ExportDataset, export_dataset};
use maison_shared::AppError;

use super::analytics::{RangeQuery, load_kind};
use super::error_response;
use crate::AppState;

/// Creates the export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/analytics/export/{dataset}", get(export_csv))
}

/// GET /admin/analytics/export/{dataset}
async fn export_csv(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let dataset: ExportDataset = match dataset.parse() {
        Ok(dataset) => dataset,
        Err(e) => return error_response(AppError::from(e)),
    };
    let time_range = match state.time_range(query.range.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(e),
    };

    let data = match load_kind(&state, dataset.kind(), time_range).await {
        Ok(data) => data,
        Err(e) => return error_response(e),
    };
    let export = match export_dataset(dataset, &data, Utc::now().date_naive()) {
        Ok(export) => export,
        Err(e) => return error_response(AppError::from(e)),
    };

    info!(
        dataset = %dataset,
        time_range = %time_range,
        rows = export.rows.len(),
        "CSV exported"
    );

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.to_csv(),
    )
        .into_response()
}
