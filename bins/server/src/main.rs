//! Maison API Server
//!
//! Main entry point for the storefront and admin analytics backend-for-frontend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maison_api::{AppState, create_router};
use maison_client::{AnalyticsClient, CatalogClient};
use maison_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maison=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let analytics = AnalyticsClient::new(&config.upstream)?;
    info!(
        base_url = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "Analytics upstream configured"
    );

    let catalog = CatalogClient::new(&config.catalog)?;
    info!(base_url = %config.catalog.base_url, "Catalog upstream configured");

    let state = AppState::new(Arc::new(analytics), Arc::new(catalog), &config)?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
