//! View-model logic for Maison.
//!
//! This crate contains pure presentation logic with ZERO web or HTTP dependencies.
//! Upstream JSON shapes, summaries, and the widgets built from them live here.
//!
//! # Modules
//!
//! - `analytics` - Revenue, customer, product and geographic datasets and summaries
//! - `metrics` - Metric cards and number formatting
//! - `charts` - Chart specifications with the brand palette
//! - `table` - Sortable, paginated data tables
//! - `export` - CSV export
//! - `dashboard` - Admin dashboard shell and per-tab views
//! - `catalog` - Product detail widgets

pub mod analytics;
pub mod catalog;
pub mod charts;
pub mod dashboard;
pub mod export;
pub mod metrics;
pub mod table;
