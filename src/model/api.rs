//! Game API envelope and server errors

use crate::decode::{FromNode, Node, Row};
use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::Deref;

/// Results that declare how long they stay fresh
pub trait CachedResult {
    /// Server-declared expiration, if the service provides one
    fn cached_until(&self) -> Option<DateTime<Utc>>;
}

/// Envelope around every game API result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// API version attribute of the envelope
    pub version: u32,
    /// Server time when the response was generated
    pub current_time: DateTime<Utc>,
    /// The typed result
    pub result: T,
    /// Time until which the result is considered fresh
    pub cached_until: DateTime<Utc>,
}

impl<T: FromNode> FromNode for ApiResponse<T> {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        let envelope = Row::element(node);
        Ok(Self {
            version: envelope.parse("version")?,
            current_time: envelope.date("currentTime")?,
            result: T::from_node(node.require_child("result")?)?,
            cached_until: envelope.date("cachedUntil")?,
        })
    }
}

impl<T> CachedResult for ApiResponse<T> {
    fn cached_until(&self) -> Option<DateTime<Utc>> {
        Some(self.cached_until)
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.result
    }
}

/// Structured error returned by the game API in place of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Numeric error code
    pub code: i32,
    /// Human readable message
    pub text: String,
}

impl ApiError {
    /// Find an `<error code="...">` element as the root or directly under it
    pub fn detect(document: &Node) -> Result<Option<Self>, ParseError> {
        let found = if document.name == "error" {
            Some(document)
        } else {
            document.child("error")
        };
        let Some(node) = found else {
            return Ok(None);
        };
        let row = Row::element(node);
        let text = match node.text() {
            "" => row.opt_str("text").unwrap_or_default(),
            text => text.to_string(),
        };
        Ok(Some(Self {
            code: row.parse("code")?,
            text,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{deserialize, Serializer, XmlSerializer};

    #[derive(Debug, PartialEq)]
    struct Empty;

    impl FromNode for Empty {
        fn from_node(_node: &Node) -> Result<Self, ParseError> {
            Ok(Empty)
        }
    }

    #[test]
    fn test_envelope_decodes_times() {
        let xml = r#"<?xml version='1.0' encoding='UTF-8'?>
            <eveapi version="2">
              <currentTime>2014-01-01 12:00:00</currentTime>
              <result/>
              <cachedUntil>2014-01-01 12:30:00</cachedUntil>
            </eveapi>"#;

        let response: ApiResponse<Empty> = deserialize(&XmlSerializer::new(), xml).unwrap();
        assert_eq!(response.version, 2);
        assert_eq!(
            response.cached_until().map(|t| crate::types::format_date(&t)),
            Some("2014-01-01 12:30:00".to_string())
        );
    }

    #[test]
    fn test_envelope_without_result_fails() {
        let xml = r#"<eveapi version="2">
              <currentTime>2014-01-01 12:00:00</currentTime>
              <cachedUntil>2014-01-01 12:30:00</cachedUntil>
            </eveapi>"#;

        let err = deserialize::<ApiResponse<Empty>>(&XmlSerializer::new(), xml).unwrap_err();
        assert_eq!(err, ParseError::missing_element("result"));
    }

    #[test]
    fn test_envelope_with_bad_date_fails() {
        let xml = r#"<eveapi version="2">
              <currentTime>soon</currentTime>
              <result/>
              <cachedUntil>2014-01-01 12:30:00</cachedUntil>
            </eveapi>"#;

        let err = deserialize::<ApiResponse<Empty>>(&XmlSerializer::new(), xml).unwrap_err();
        assert_eq!(err.field(), Some("currentTime"));
    }

    #[test]
    fn test_detect_error() {
        let xml = r#"<eveapi version="2">
              <currentTime>2014-01-01 12:00:00</currentTime>
              <error code="122">Invalid or missing list of names.</error>
              <cachedUntil>2014-01-02 12:00:00</cachedUntil>
            </eveapi>"#;

        let document = XmlSerializer::new().parse(xml).unwrap();
        let error = ApiError::detect(&document).unwrap().unwrap();
        assert_eq!(error.code, 122);
        assert_eq!(error.text, "Invalid or missing list of names.");
    }

    #[test]
    fn test_detect_no_error() {
        let document = Node::new("eveapi").with_child(Node::new("result"));
        assert_eq!(ApiError::detect(&document).unwrap(), None);
    }

    #[test]
    fn test_detect_error_as_root() {
        let document = Node::new("error")
            .with_attr("code", "203")
            .with_text("Authentication failure.");
        let error = ApiError::detect(&document).unwrap().unwrap();
        assert_eq!(error.code, 203);
        assert_eq!(error.text, "Authentication failure.");
    }
}
