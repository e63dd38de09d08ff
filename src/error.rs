//! Error types for EveLib
//!
//! Failures are split by the layer that produces them:
//! - [`ParseError`] - a response body could not be turned into a typed value
//! - [`TransportError`] - the HTTP exchange itself failed
//! - [`RequestError`] - what a caller of an endpoint sees
//! - [`Error`] - configuration, registry persistence and the CLI

use std::fmt;
use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Where in a document a field was being read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A row inside a named row group
    Row {
        /// Name of the row group
        group: String,
        /// Zero-based position of the row in server order
        index: usize,
    },
    /// A plain element (envelope, result or nested element)
    Element(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row { group, index } => write!(f, "row {index} of '{group}'"),
            Self::Element(name) => write!(f, "element '{name}'"),
        }
    }
}

/// Failure to turn a raw body into a typed value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed {format} document: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },

    #[error("Missing required element '{element}'")]
    MissingElement { element: String },

    #[error("Missing required field '{field}' in {location}")]
    MissingField { field: String, location: Location },

    #[error("Invalid value '{value}' for field '{field}' in {location}: {message}")]
    InvalidValue {
        field: String,
        value: String,
        location: Location,
        message: String,
    },

    #[error("Invalid date '{value}', expected 'yyyy-MM-dd HH:mm:ss'")]
    InvalidDate { value: String },
}

impl ParseError {
    /// Create a malformed-document error
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            message: message.into(),
        }
    }

    /// Create a missing element error
    pub fn missing_element(element: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>, location: Location) -> Self {
        Self::MissingField {
            field: field.into(),
            location,
        }
    }

    /// Name of the field this error is about, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

// ============================================================================
// Transport Errors
// ============================================================================

/// Failure of the HTTP exchange, before any body could be interpreted
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },
}

impl TransportError {
    /// Create a status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::RateLimited { .. } | Self::Timeout { .. } => true,
            Self::Status { status, .. } => is_retryable_status(*status),
            Self::InvalidUrl(_) => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

// ============================================================================
// Request Errors
// ============================================================================

/// Error returned by every endpoint call
#[derive(Error, Debug)]
pub enum RequestError {
    /// The server understood the request and refused it with a structured error body
    #[error("Request rejected by server ({code}): {text}")]
    Rejected {
        code: i32,
        text: String,
        #[source]
        cause: Option<TransportError>,
    },

    /// Network failure, timeout, or a failure status without a usable body
    #[error("Transport failure: {cause}")]
    Transport {
        #[from]
        cause: TransportError,
    },

    /// A success body that could not be decoded into the expected type
    #[error("Failed to decode response: {cause}")]
    Decode {
        #[from]
        cause: ParseError,
    },

    #[error("Cannot walk from an empty page")]
    EmptyPage,

    #[error("Cursor {cursor} was already requested in this walking session")]
    RepeatedCursor { cursor: i64 },

    #[error("{operation} is not supported")]
    NotSupported { operation: String },
}

impl RequestError {
    /// Create a not-supported error
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported {
            operation: operation.into(),
        }
    }

    /// Server error code, for rejected requests
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// ============================================================================
// Crate Errors
// ============================================================================

/// Error type for configuration, registry persistence and the CLI
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache registry error: {message}")]
    Registry { message: String },

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }
}

/// Result type alias for configuration and persistence
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for endpoint calls
pub type RequestResult<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_base_url");
        assert_eq!(
            err.to_string(),
            "Missing required config field: api_base_url"
        );

        let err = TransportError::status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_parse_error_names_field_and_row() {
        let err = ParseError::missing_field(
            "transactionID",
            Location::Row {
                group: "transactions".to_string(),
                index: 3,
            },
        );
        assert_eq!(
            err.to_string(),
            "Missing required field 'transactionID' in row 3 of 'transactions'"
        );
        assert_eq!(err.field(), Some("transactionID"));
    }

    #[test]
    fn test_rejected_display_and_code() {
        let err = RequestError::Rejected {
            code: 122,
            text: "Invalid or missing list of names.".to_string(),
            cause: None,
        };
        assert_eq!(err.code(), Some(122));
        assert!(err.to_string().contains("(122)"));
        assert_eq!(RequestError::EmptyPage.code(), None);
    }

    #[test]
    fn test_is_retryable() {
        assert!(TransportError::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(TransportError::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(TransportError::status(503, "").is_retryable());

        assert!(!TransportError::status(400, "").is_retryable());
        assert!(!TransportError::status(404, "").is_retryable());
    }

    #[test]
    fn test_parse_error_converts_to_decode() {
        let err: RequestError = ParseError::missing_element("result").into();
        assert!(matches!(err, RequestError::Decode { .. }));

        let err: RequestError = TransportError::Timeout { timeout_ms: 5 }.into();
        assert!(matches!(err, RequestError::Transport { .. }));
    }
}
