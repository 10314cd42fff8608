//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream analytics API.
    pub upstream: UpstreamConfig,
    /// Product catalog API.
    pub catalog: CatalogConfig,
    /// Dashboard defaults.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Upstream analytics API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the analytics REST API (e.g. `https://api.example.com`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token forwarded to the admin endpoints, if any.
    #[serde(default)]
    pub api_token: Option<String>,
}

/// Product catalog API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of related products shown on a detail page.
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    /// Public storefront URL used to build share links.
    #[serde(default = "default_storefront_url")]
    pub storefront_url: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_related_limit() -> usize {
    4
}

fn default_storefront_url() -> String {
    "http://localhost:3000".to_string()
}

/// Dashboard defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Time range used when a request does not specify one.
    #[serde(default = "default_range")]
    pub default_range: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_range: default_range(),
        }
    }
}

fn default_range() -> String {
    "30d".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MAISON").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
