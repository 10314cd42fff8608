//! Shared types, errors, and configuration for Maison.
//!
//! This crate provides common types used across all other crates:
//! - Money in cents with display formatting
//! - Analytics time ranges and ISO date windows
//! - Pagination types for tables and list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
