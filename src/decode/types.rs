//! Serializer types and traits
//!
//! Defines the core decoding abstractions.

use super::decoders::{JsonSerializer, XmlSerializer};
use super::node::Node;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Format of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Markup (default for the game API)
    #[default]
    Xml,
    /// Object notation
    Json,
}

impl Format {
    /// Lowercase name, as used in documents and file extensions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

/// Turns a raw response body into a document tree.
///
/// Implementations are interchangeable: typed values are built from the
/// [`Node`] and never see which format produced it.
pub trait Serializer: Send + Sync + std::fmt::Debug {
    /// The format this serializer reads
    fn format(&self) -> Format;

    /// Parse the body into a document tree
    fn parse(&self, raw: &str) -> Result<Node, ParseError>;
}

/// Types that can be built from a whole document or sub-tree
pub trait FromNode: Sized {
    /// Build the value from a node
    fn from_node(node: &Node) -> Result<Self, ParseError>;
}

/// Deserialize a raw body into `T` with the given serializer
pub fn deserialize<T: FromNode>(serializer: &dyn Serializer, raw: &str) -> Result<T, ParseError> {
    let document = serializer.parse(raw)?;
    T::from_node(&document)
}

/// Create the serializer for a format
pub fn serializer_for(format: Format) -> Arc<dyn Serializer> {
    match format {
        Format::Xml => Arc::new(XmlSerializer::new()),
        Format::Json => Arc::new(JsonSerializer::new()),
    }
}
