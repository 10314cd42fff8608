//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Admin dashboard, analytics and CSV export routes
//! - Product detail and per-visitor wishlist routes
//! - Mapping of application errors to JSON responses

pub mod middleware;
pub mod routes;


use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use maison_client::{AnalyticsSource, CatalogSource, DashboardLoader};
use maison_core::catalog::{DetailContext, Wishlist};
use maison_shared::types::TimeRange;
use maison_shared::{AppConfig, AppError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Analytics resources, kept so a failed domain can be refetched.
    pub dashboard: Arc<DashboardLoader>,
    /// Product catalog.
    pub catalog: Arc<dyn CatalogSource>,
    /// Saved products per visitor id.
    pub wishlists: Arc<RwLock<HashMap<String, Wishlist>>>,
    /// Range used when a request names none.
    pub default_range: TimeRange,
    /// Product detail settings.
    pub detail: Arc<DetailContext>,
}

impl AppState {
    /// Builds the state from the upstream sources and configuration.
    pub fn new(
        analytics: Arc<dyn AnalyticsSource>,
        catalog: Arc<dyn CatalogSource>,
        config: &AppConfig,
    ) -> Result<Self, AppError> {
        Ok(Self {
            dashboard: Arc::new(DashboardLoader::new(analytics)),
            catalog,
            wishlists: Arc::new(RwLock::new(HashMap::new())),
            default_range: config.dashboard.default_range.parse()?,
            detail: Arc::new(DetailContext {
                storefront_url: config.catalog.storefront_url.clone(),
                related_limit: config.catalog.related_limit,
            }),
        })
    }

    /// Parses `raw`, falling back to the configured default.
    pub fn time_range(&self, raw: Option<&str>) -> Result<TimeRange, AppError> {
        match raw.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => raw.parse(),
            None => Ok(self.default_range),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
