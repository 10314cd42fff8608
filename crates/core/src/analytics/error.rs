//! Analytics error types.

use thiserror::Error;

use maison_shared::AppError;

/// Errors raised while building analytics views.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Unknown analytics domain.
    #[error("Unknown analytics kind: {0}")]
    UnknownKind(String),

    /// Unknown dashboard tab.
    #[error("Unknown dashboard tab: {0}")]
    UnknownTab(String),

    /// Unknown export dataset.
    #[error("Unknown export dataset: {0}")]
    UnknownDataset(String),

    /// Table column does not exist or cannot be sorted.
    #[error("Column cannot be sorted: {0}")]
    UnknownColumn(String),

    /// The slice needed for an export has not been loaded.
    #[error("No {0} data available")]
    NoData(&'static str),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::NoData(_) => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
