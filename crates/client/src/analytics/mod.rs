//! Upstream admin analytics API.
//!
//! The upstream service has moved its analytics routes over time, so each
//! domain is requested from an ordered list of endpoints and the first
//! successful, decodable response wins.

mod loader;
mod resource;


pub use loader::DashboardLoader;
pub use resource::{AnalyticsResource, AnalyticsSlice, ResourceState};

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use maison_core::analytics::{
    AnalyticsKind, CustomerAnalytics, GeographicAnalytics, ProductAnalytics, RevenueDataPoint,
};
use maison_shared::config::UpstreamConfig;
use maison_shared::types::{DateRange, TimeRange};

use crate::error::{ClientError, ClientResult};

/// Source of analytics responses.
///
/// Implemented by [`AnalyticsClient`]; route and resource tests substitute a mock.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Daily revenue series.
    async fn revenue(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<Vec<RevenueDataPoint>>;

    /// Customer acquisition and retention.
    async fn customer(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<CustomerAnalytics>;

    /// Product and category performance.
    async fn product(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<ProductAnalytics>;

    /// Regional, city and country breakdown.
    async fn geographic(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<GeographicAnalytics>;
}

/// One upstream endpoint in a fallback plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method; POST endpoints take the date range as the JSON body.
    pub method: Method,
    /// Path and query, relative to the base URL.
    pub path: String,
}

impl Endpoint {
    fn post(path: String) -> Self {
        Self {
            method: Method::POST,
            path,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Endpoints to try for `kind`, in order.
///
/// Geographic data is first requested by time range over GET; every domain
/// then falls back to the admin POST route and its versioned twin.
#[must_use]
pub fn endpoint_plan(kind: AnalyticsKind, time_range: TimeRange) -> Vec<Endpoint> {
    let mut plan = Vec::with_capacity(3);
    if kind == AnalyticsKind::Geographic {
        plan.push(Endpoint {
            method: Method::GET,
            path: format!("/api/admin/analytics/geographic?timeRange={time_range}"),
        });
    }
    plan.push(Endpoint::post(format!("/api/admin/analytics/{kind}")));
    plan.push(Endpoint::post(format!("/api/v1/admin/analytics/{kind}")));
    plan
}

/// HTTP client for the upstream analytics API.
#[derive(Clone)]
pub struct AnalyticsClient {
    base_url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl AnalyticsClient {
    /// Creates a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
            client,
        })
    }

    /// Walks the endpoint plan for `kind` until one succeeds.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        kind: AnalyticsKind,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<T> {
        let mut attempts = Vec::new();

        for endpoint in endpoint_plan(kind, time_range) {
            match self.attempt(&endpoint, dates).await {
                Ok(body) => {
                    debug!(kind = %kind, endpoint = %endpoint, "Analytics fetched");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(kind = %kind, endpoint = %endpoint, error = %e, "Analytics endpoint failed");
                    attempts.push(format!("{endpoint}: {e}"));
                }
            }
        }

        error!(kind = %kind, attempts = attempts.len(), "All analytics endpoints failed");
        Err(ClientError::AllEndpointsFailed { kind, attempts })
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        dates: &DateRange,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, endpoint.path);

        let mut request = self.client.request(endpoint.method.clone(), &url);
        if endpoint.method == Method::POST {
            request = request.json(dates);
        }
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AnalyticsSource for AnalyticsClient {
    async fn revenue(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<Vec<RevenueDataPoint>> {
        self.fetch(AnalyticsKind::Revenue, time_range, dates).await
    }

    async fn customer(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<CustomerAnalytics> {
        self.fetch(AnalyticsKind::Customer, time_range, dates).await
    }

    async fn product(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<ProductAnalytics> {
        self.fetch(AnalyticsKind::Product, time_range, dates).await
    }

    async fn geographic(
        &self,
        time_range: TimeRange,
        dates: &DateRange,
    ) -> ClientResult<GeographicAnalytics> {
        self.fetch(AnalyticsKind::Geographic, time_range, dates).await
    }
}
