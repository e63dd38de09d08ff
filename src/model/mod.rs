//! Typed results
//!
//! One module per service. Every game API result is wrapped in
//! [`ApiResponse`], which carries the server-declared cache expiration.

pub mod api;
pub mod character;
pub mod core;
pub mod corporation;
pub mod eve_central;
pub mod eve_market_data;

pub use api::{ApiError, ApiResponse, CachedResult};
