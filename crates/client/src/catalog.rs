//! Product catalog API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use maison_core::catalog::{Product, ProductCard};
use maison_shared::config::CatalogConfig;

use crate::error::{ClientError, ClientResult};

/// Largest page the catalog list endpoint accepts.
const MAX_PAGE_SIZE: usize = 100;

/// Source of catalog products.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Full product record.
    async fn product(&self, id: i64) -> ClientResult<Product>;

    /// First `limit` products of a category, in catalog order.
    async fn products_in_category(&self, category: &str, limit: usize)
    -> ClientResult<Vec<ProductCard>>;
}

/// Paginated list response.
#[derive(Debug, Deserialize)]
struct ProductPage {
    products: Vec<ProductCard>,
}

/// HTTP client for the catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Creates a client from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
        missing: impl FnOnce() -> String,
    ) -> ClientResult<T> {
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ClientError::NotFound(missing())),
            status if !status.is_success() => {
                return Err(ClientError::Status {
                    url,
                    status: status.as_u16(),
                });
            }
            _ => {}
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
impl CatalogSource for CatalogClient {
    async fn product(&self, id: i64) -> ClientResult<Product> {
        let url = format!("{}/api/products/{id}", self.base_url);
        debug!(product_id = id, "Fetching product");
        self.get(url, &[], || format!("Product {id}")).await
    }

    async fn products_in_category(
        &self,
        category: &str,
        limit: usize,
    ) -> ClientResult<Vec<ProductCard>> {
        let url = format!("{}/api/products", self.base_url);
        let page_size = limit.clamp(1, MAX_PAGE_SIZE);
        let query = [
            ("category", category.to_string()),
            ("page_size", page_size.to_string()),
        ];
        let page: ProductPage = self
            .get(url, &query, || format!("Category {category}"))
            .await?;
        Ok(page.products)
    }
}
