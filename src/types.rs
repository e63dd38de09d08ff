//! Common types used throughout EveLib
//!
//! Credentials, request identities, cache hints and the date format shared
//! by every endpoint.

use crate::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Dates
// ============================================================================

/// Textual date format used by the game API (always UTC)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an API timestamp
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ParseError::InvalidDate {
            value: value.to_string(),
        })
}

/// Format a timestamp the way the API writes it
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ============================================================================
// Credentials
// ============================================================================

/// API key: numeric key id plus verification code, passed through unmodified
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiKey {
    key_id: i64,
    v_code: String,
}

impl ApiKey {
    /// Create a new API key
    pub fn new(key_id: i64, v_code: impl Into<String>) -> Self {
        Self {
            key_id,
            v_code: v_code.into(),
        }
    }

    /// The numeric key id
    pub fn key_id(&self) -> i64 {
        self.key_id
    }

    /// The verification code
    pub fn v_code(&self) -> &str {
        &self.v_code
    }

    /// Query parameters that carry this key
    pub fn params(&self) -> [(String, String); 2] {
        [
            ("keyID".to_string(), self.key_id.to_string()),
            ("vCode".to_string(), self.v_code.clone()),
        ]
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("key_id", &self.key_id)
            .field("v_code", &"***")
            .finish()
    }
}

/// Parameter names whose values never appear in logs
const REDACTED_PARAMS: &[&str] = &["vCode"];

// ============================================================================
// Cache Hints
// ============================================================================

/// Hint passed to the transport about whether a cached body may be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// A previous response for this request is still fresh
    PreferCache,
    /// Always go to the server
    ForceReload,
}

// ============================================================================
// Request Identity
// ============================================================================

/// Cache key of a request: base authority, path and the set of parameters.
///
/// Parameters are kept sorted, so two identities built from the same
/// parameters in a different order compare equal. Repeated keys are allowed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestIdentity {
    base: String,
    path: String,
    params: Vec<(String, String)>,
}

impl RequestIdentity {
    /// Create a new identity
    pub fn new(
        base: impl Into<String>,
        path: impl Into<String>,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut params: Vec<(String, String)> = params.into_iter().collect();
        params.sort();
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            path: path.into(),
            params,
        }
    }

    /// Base authority (scheme and host)
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Relative path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sorted parameters
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.path)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            if REDACTED_PARAMS.contains(&key.as_str()) {
                write!(f, "{sep}{key}=***")?;
            } else {
                write!(f, "{sep}{key}={value}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for RequestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestIdentity({self})")
    }
}

/// Build a single query parameter
pub fn param(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

// ============================================================================
// Backoff Types
// ============================================================================

/// Type of backoff strategy for transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Same delay between every attempt
    Constant,
    /// Delay grows linearly with the attempt number
    Linear,
    /// Delay doubles with each attempt
    #[default]
    Exponential,
}
