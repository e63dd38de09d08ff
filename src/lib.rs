// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # EveLib
//!
//! Typed client for the EVE Online game API and two community market-data
//! services, EVE-Central and EVE-Marketdata.
//!
//! ## Features
//!
//! - **Typed results**: every endpoint returns a decoded result or a typed error
//! - **Cache-aware**: server-declared expirations drive a prefer-cache hint
//! - **Walking**: wallet pages fetch older pages from their own records
//! - **Two formats**: markup and object-notation bodies decode through one tree
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evelib::{ApiKey, ClientConfig, EveLib};
//!
//! #[tokio::main]
//! async fn main() -> evelib::Result<()> {
//!     let eve = EveLib::open(ClientConfig::default()).await?;
//!
//!     let status = eve.core().server_status().await?;
//!     println!("{} players online", status.online_players);
//!
//!     let character = eve.character(ApiKey::new(123, "verification-code"), 9001);
//!     let page = character.wallet_transactions(50).await?;
//!     let older = page.older(50).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  EveLib session → Core / Character / Corporation /           │
//! │                   EveCentral / EveMarketData façades         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────┬────────────────────────┐
//! │  Request     │  Expiration          │  Pagination            │
//! │  handler     │  registry            │  walker                │
//! ├──────────────┼──────────────────────┼────────────────────────┤
//! │  Transport   │  Serializer          │  Row-set decoder       │
//! │  (reqwest)   │  (XML / JSON)        │  (typed rows)          │
//! └──────────────┴──────────────────────┴────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types: credentials, identities, dates
pub mod types;

/// HTTP transport with rate limiting and a body cache
pub mod http;

/// Response serializers and the row-set decoder
pub mod decode;

/// Typed results per service
pub mod model;

/// Cache expiration registry
pub mod cache;

/// Request handling and failure classification
pub mod request;

/// Page walking
pub mod pagination;

/// Endpoint façades
pub mod entity;

/// Client configuration
pub mod config;

/// Client session
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use cache::ExpirationRegistry;
pub use client::EveLib;
pub use config::ClientConfig;
pub use error::{Error, ParseError, RequestError, RequestResult, Result, TransportError};
pub use model::{ApiResponse, CachedResult};
pub use pagination::Page;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
