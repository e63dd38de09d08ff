//! HTTP transport with retry, rate limiting and a body cache
//!
//! Handles:
//! - Optional retries with configurable backoff
//! - Rate limiting so bursts of calls do not trip server throttling
//! - A local body cache honouring the request's cache hint
//! - Error classification for retry decisions

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{Transport, TransportRequest, TransportResponse};
use crate::error::{is_retryable_status, Result, TransportError};
use crate::types::{BackoffType, CachePolicy};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Default cap on locally cached bodies
pub const DEFAULT_MAX_CACHED_BODIES: usize = 256;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries; zero leaves every failure to the caller
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Keep successful bodies and serve them for `PreferCache` requests
    pub cache_bodies: bool,
    /// Most bodies kept at once; the oldest is dropped first
    pub max_cached_bodies: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("evelib/{}", env!("CARGO_PKG_VERSION")),
            cache_bodies: true,
            max_cached_bodies: DEFAULT_MAX_CACHED_BODIES,
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

/// Builder for HTTP transport config
#[derive(Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Enable or disable the body cache
    pub fn cache_bodies(mut self, enabled: bool) -> Self {
        self.config.cache_bodies = enabled;
        self
    }

    /// Cap the number of cached bodies
    pub fn max_cached_bodies(mut self, limit: usize) -> Self {
        self.config.max_cached_bodies = limit;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// Transport over `reqwest`
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
    rate_limiter: Option<RateLimiter>,
    bodies: RwLock<BodyCache>,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TransportError::Http(e.without_url()))?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            bodies: RwLock::new(BodyCache::new(config.max_cached_bodies)),
            config,
            rate_limiter,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Number of bodies held by the local cache
    pub async fn cached_bodies(&self) -> usize {
        self.bodies.read().await.len()
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }

    async fn send_with_retries(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let url = request.full_url()?;
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self.client.get(url.clone());
            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }
            if request.cache_policy == CachePolicy::ForceReload {
                req = req.header(CACHE_CONTROL, "no-cache");
            }

            let error = match req.send().await {
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable_status(status.as_u16()) || attempt >= max_retries {
                        return self.finish(response).await;
                    }
                    let delay = if status == StatusCode::TOO_MANY_REQUESTS {
                        Duration::from_secs(extract_retry_after(&response))
                    } else {
                        self.calculate_backoff(attempt)
                    };
                    warn!(
                        status = status.as_u16(),
                        attempt = attempt + 1,
                        max_attempts = max_retries + 1,
                        ?delay,
                        "Retryable status, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                Err(e) => self.classify(e),
            };

            if !error.is_retryable() || attempt >= max_retries {
                return Err(error);
            }
            let delay = self.calculate_backoff(attempt);
            warn!(
                error = %error,
                attempt = attempt + 1,
                max_attempts = max_retries + 1,
                ?delay,
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn finish(
        &self,
        response: Response,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited {
                retry_after_seconds: extract_retry_after(&response),
            });
        }
        let body = response.text().await.map_err(|e| self.classify(e))?;
        Ok(TransportResponse::new(status.as_u16(), body))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            TransportError::Http(error.without_url())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let key = request.cache_key()?;

        if self.config.cache_bodies && request.cache_policy == CachePolicy::PreferCache {
            if let Some(body) = self.bodies.read().await.get(&key) {
                debug!(url = %request.url, "Serving cached body");
                return Ok(TransportResponse {
                    status: 200,
                    body: body.clone(),
                    from_cache: true,
                });
            }
        }

        let response = self.send_with_retries(&request).await?;
        debug!(url = %request.url, status = response.status, "Request completed");

        if self.config.cache_bodies && response.is_success() {
            self.bodies.write().await.insert(key, response.body.clone());
        }
        Ok(response)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Response bodies by URL, bounded in count; the oldest insert goes first
#[derive(Debug)]
struct BodyCache {
    bodies: HashMap<String, String>,
    order: VecDeque<String>,
    limit: usize,
}

impl BodyCache {
    fn new(limit: usize) -> Self {
        Self {
            bodies: HashMap::new(),
            order: VecDeque::new(),
            limit,
        }
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.bodies.get(key)
    }

    fn len(&self) -> usize {
        self.bodies.len()
    }

    fn insert(&mut self, key: String, body: String) {
        if self.limit == 0 {
            return;
        }
        if self.bodies.insert(key.clone(), body).is_none() {
            self.order.push_back(key);
        }
        while self.bodies.len() > self.limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.bodies.remove(&oldest);
        }
    }
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
