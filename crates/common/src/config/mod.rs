//! Configuration management for Rekayasa services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values
//!
//! Missing store credentials are not an error: the repository then runs
//! unconfigured and every read degrades to an empty result.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Content store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Content visibility configuration
    #[serde(default)]
    pub content: ContentConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

/// Which backend serves content reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted PostgREST endpoint (Supabase-style REST)
    Postgrest,
    /// Direct Postgres connection
    Postgres,
    /// In-memory collections, optionally seeded from a fixtures file
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: StoreBackend,

    /// Project URL for the PostgREST backend
    pub url: Option<String>,

    /// Anonymous (public, read-only) API key for the PostgREST backend
    pub anon_key: Option<String>,

    /// Connection string for the Postgres backend
    pub database_url: Option<String>,

    /// JSON fixtures file for the memory backend
    pub fixtures_path: Option<String>,

    /// Per-query timeout in seconds
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,

    /// Maximum pooled connections (Postgres backend)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Deployment environment: production, preview, development
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Explicit override for draft visibility
    pub include_drafts: Option<bool>,

    /// Destination used when a click-through has no resource of its own
    pub fallback_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error) or a full env-filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_enabled")]
    pub metrics_enabled: bool,

    /// Service name for logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per second (global)
    #[serde(default = "default_rate_limit")]
    pub requests_per_second: u32,

    /// Burst capacity
    #[serde(default = "default_burst")]
    pub burst: u32,

    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_concurrent() -> usize { 100 }
fn default_store_backend() -> StoreBackend { StoreBackend::Postgrest }
fn default_store_timeout() -> u64 { 10 }
fn default_max_connections() -> u32 { 10 }
fn default_environment() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "rekayasa".to_string() }
fn default_rate_limit() -> u32 { 50 }
fn default_burst() -> u32 { 100 }
fn default_enabled() -> bool { true }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_requests: default_max_concurrent(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            url: None,
            anon_key: None,
            database_url: None,
            fixtures_path: None,
            timeout_secs: default_store_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            include_drafts: None,
            fallback_link: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_enabled: default_enabled(),
            service_name: default_service_name(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rate_limit(),
            burst: default_burst(),
            enabled: default_enabled(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            content: ContentConfig::default(),
            observability: ObservabilityConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Whether the selected backend has what it needs to run
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StoreBackend::Postgrest => {
                non_empty(self.url.as_deref()) && non_empty(self.anon_key.as_deref())
            }
            StoreBackend::Postgres => non_empty(self.database_url.as_deref()),
            StoreBackend::Memory => true,
        }
    }

    /// Per-query timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ContentConfig {
    /// True when deployed to the production environment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Drafts are visible everywhere except production, unless overridden
    pub fn include_drafts(&self) -> bool {
        self.include_drafts.unwrap_or(!self.is_production())
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__STORE__URL=https://xyz.supabase.co
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Postgrest);
        assert!(!config.store.is_configured());
    }

    #[test]
    fn test_drafts_hidden_only_in_production() {
        let mut content = ContentConfig::default();
        assert!(content.include_drafts());

        content.environment = "Production".to_string();
        assert!(!content.include_drafts());

        content.include_drafts = Some(true);
        assert!(content.include_drafts());
    }

    #[test]
    fn test_postgrest_requires_url_and_key() {
        let mut store = StoreConfig::default();
        store.url = Some("https://example.supabase.co".into());
        assert!(!store.is_configured());

        store.anon_key = Some("   ".into());
        assert!(!store.is_configured());

        store.anon_key = Some("anon".into());
        assert!(store.is_configured());
    }

    #[test]
    fn test_memory_backend_is_always_configured() {
        let store = StoreConfig {
            backend: StoreBackend::Memory,
            ..StoreConfig::default()
        };
        assert!(store.is_configured());
    }
}
