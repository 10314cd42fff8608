//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use maison_shared::AppError;

use crate::AppState;

pub mod analytics;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod products;
pub mod wishlist;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(analytics::routes())
        .merge(export::routes())
        .merge(products::routes())
        .merge(wishlist::routes())
}

/// Renders an error as `{ "error": code, "message": text }`.
pub(crate) fn error_response(err: AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, code = err.error_code(), "Request failed");
    }
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}
