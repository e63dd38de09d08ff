//! Cache expiration registry
//!
//! Tracks, per request identity, the time until which the last successful
//! response stays fresh. The request handler consults it before every call
//! to choose a cache hint, and updates it after every successful one.
//!
//! # Overview
//!
//! - `ExpirationRegistry` - synchronized map, optionally backed by a JSON file
//! - `CacheSnapshot` - the persisted form

mod registry;
mod types;

pub use registry::ExpirationRegistry;
pub use types::{CacheEntry, CacheSnapshot};

#[cfg(test)]
mod registry_tests;
