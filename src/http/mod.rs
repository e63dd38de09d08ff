//! HTTP transport module
//!
//! Provides the `Transport` seam and its `reqwest` implementation.
//!
//! # Features
//!
//! - **Cache hints**: `PreferCache` may be served from a local body cache,
//!   `ForceReload` always reaches the server with `Cache-Control: no-cache`
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Retries**: Optional, with constant, linear or exponential backoff

mod client;
mod rate_limit;
mod transport;

pub use client::{
    HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder, DEFAULT_MAX_CACHED_BODIES,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{Transport, TransportRequest, TransportResponse};
