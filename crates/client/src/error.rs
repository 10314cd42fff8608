//! Client error types.

use thiserror::Error;

use maison_core::analytics::AnalyticsKind;
use maison_shared::AppError;

/// Result type alias using `ClientError`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors talking to an upstream service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or other transport failure.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Body did not match the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder message.
        message: String,
    },

    /// The requested resource does not exist upstream.
    #[error("{0} not found")]
    NotFound(String),

    /// Every endpoint in the fallback plan failed.
    #[error("all {kind} analytics endpoints failed: {}", attempts.join("; "))]
    AllEndpointsFailed {
        /// Analytics domain.
        kind: AnalyticsKind,
        /// One entry per attempt, in order.
        attempts: Vec<String>,
    },
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(what) => Self::NotFound(what),
            ClientError::Build(_) => Self::Internal(err.to_string()),
            other => Self::ExternalService(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_endpoints_failed_lists_attempts() {
        let err = ClientError::AllEndpointsFailed {
            kind: AnalyticsKind::Revenue,
            attempts: vec!["a: 500".to_string(), "b: 404".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "all revenue analytics endpoints failed: a: 500; b: 404"
        );
    }

    #[test]
    fn test_maps_to_app_error() {
        let not_found: AppError = ClientError::NotFound("product 9".to_string()).into();
        assert_eq!(not_found.status_code(), 404);

        let upstream: AppError = ClientError::Status {
            url: "http://upstream/x".to_string(),
            status: 503,
        }
        .into();
        assert_eq!(upstream.error_code(), "EXTERNAL_SERVICE_ERROR");
    }
}
