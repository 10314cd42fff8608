//! Maison Client - Upstream HTTP clients.
//!
//! This crate talks to the services the storefront depends on:
//! - `analytics` - Admin analytics API with fallback endpoints, plus the
//!   per-domain resources that track data, error and loading state
//! - `catalog` - Product catalog API
//!
//! Responses are decoded into `maison-core` types; nothing is cached.

pub mod analytics;
pub mod catalog;
pub mod error;

pub use analytics::{AnalyticsClient, AnalyticsResource, AnalyticsSource, DashboardLoader};
pub use catalog::{CatalogClient, CatalogSource};
pub use error::{ClientError, ClientResult};
