//! Transport abstraction
//!
//! The request handler talks to the network only through [`Transport`], so
//! tests and embedders can substitute their own implementation.

use crate::error::TransportError;
use crate::types::CachePolicy;
use async_trait::async_trait;
use url::Url;

/// One outgoing GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Absolute endpoint URL without query
    pub url: String,
    /// Query parameters in send order; repeated keys are allowed
    pub params: Vec<(String, String)>,
    /// Whether a cached body may be served
    pub cache_policy: CachePolicy,
}

impl TransportRequest {
    /// Create a request that always goes to the server
    pub fn new(url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            params,
            cache_policy: CachePolicy::ForceReload,
        }
    }

    /// Set the cache hint
    #[must_use]
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Full URL including the query string
    pub fn full_url(&self) -> Result<Url, TransportError> {
        if self.params.is_empty() {
            return Ok(Url::parse(&self.url)?);
        }
        Ok(Url::parse_with_params(&self.url, &self.params)?)
    }

    /// Key under which a response body may be cached
    pub fn cache_key(&self) -> Result<String, TransportError> {
        self.full_url().map(String::from)
    }
}

/// Raw response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
    /// Served from a local body cache rather than the network
    pub from_cache: bool,
}

impl TransportResponse {
    /// Create a response that came from the network
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            from_cache: false,
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs requests. Non-2xx statuses are returned as responses, not errors,
/// so the caller can inspect error documents in the body.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn perform(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
