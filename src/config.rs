//! Client configuration
//!
//! Everything a session needs that is not a credential: service base URLs,
//! payload format, registry persistence and HTTP behaviour. Loadable from
//! YAML; every field has a default.

use crate::decode::Format;
use crate::error::{Error, Result};
use crate::http::{HttpTransportConfig, RateLimiterConfig, DEFAULT_MAX_CACHED_BODIES};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of EVE-Central
    #[serde(default = "default_eve_central_url")]
    pub eve_central_url: String,

    /// Base URL of EVE-Marketdata
    #[serde(default = "default_eve_market_data_url")]
    pub eve_market_data_url: String,

    /// Payload format requested from the game API
    #[serde(default)]
    pub format: Format,

    /// Character name EVE-Marketdata expects on every call
    #[serde(default = "default_char_name")]
    pub market_data_char_name: String,

    /// Registry persistence
    #[serde(default)]
    pub cache: CacheConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            eve_central_url: default_eve_central_url(),
            eve_market_data_url: default_eve_market_data_url(),
            format: Format::default(),
            market_data_char_name: default_char_name(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.eveonline.com".to_string()
}

fn default_eve_central_url() -> String {
    "http://api.eve-central.com".to_string()
}

fn default_eve_market_data_url() -> String {
    "http://api.eve-marketdata.com".to_string()
}

fn default_char_name() -> String {
    "evelib".to_string()
}

impl ClientConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("api_url", &self.api_url),
            ("eve_central_url", &self.eve_central_url),
            ("eve_market_data_url", &self.eve_market_data_url),
        ] {
            if url.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
            url::Url::parse(url)
                .map_err(|e| Error::invalid_value(field, format!("'{url}' is not a URL: {e}")))?;
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.cache.io_timeout_ms == 0 {
            return Err(Error::invalid_value(
                "cache.io_timeout_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Transport settings derived from the HTTP section
    pub fn transport_config(&self) -> HttpTransportConfig {
        let http = &self.http;
        let mut builder = HttpTransportConfig::builder()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .max_retries(http.max_retries)
            .backoff(
                http.backoff.backoff_type,
                Duration::from_millis(http.backoff.initial_ms),
                Duration::from_millis(http.backoff.max_ms),
            )
            .cache_bodies(http.cache_bodies)
            .max_cached_bodies(http.max_cached_bodies);
        if let Some(agent) = &http.user_agent {
            builder = builder.user_agent(agent);
        }
        match &http.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()).build(),
            None => builder.no_rate_limit().build(),
        }
    }
}

// ============================================================================
// Cache Config
// ============================================================================

/// Where and how the expiration registry is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Registry file; memory only when absent
    #[serde(default)]
    pub registry_file: Option<PathBuf>,

    /// Bound on each registry file operation in milliseconds
    #[serde(default = "default_io_timeout_ms")]
    pub io_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            registry_file: None,
            io_timeout_ms: default_io_timeout_ms(),
        }
    }
}

impl CacheConfig {
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

fn default_io_timeout_ms() -> u64 {
    5000
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Transport-level retries; zero leaves every failure to the caller
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Rate limiting; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Keep bodies locally and serve them while the registry says fresh
    #[serde(default = "default_true")]
    pub cache_bodies: bool,

    /// Upper bound on locally cached bodies
    #[serde(default = "default_max_cached_bodies")]
    pub max_cached_bodies: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: 0,
            backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
            user_agent: None,
            cache_bodies: default_true(),
            max_cached_bodies: default_max_cached_bodies(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

fn default_max_cached_bodies() -> usize {
    DEFAULT_MAX_CACHED_BODIES
}

fn default_true() -> bool {
    true
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}
