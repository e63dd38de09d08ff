//! Typed row groups
//!
//! A row group is a named element holding repeated `row` records. Each row
//! decodes through [`FromRow`] with a [`Row`] accessor that reports the field
//! and row index on failure.

use super::node::Node;
use crate::error::{Location, ParseError};
use crate::types::parse_date;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;

/// Element name of a single record inside a group
const ROW_ELEMENT: &str = "row";

// ============================================================================
// RowSet
// ============================================================================

/// Ordered rows of one group, in the order the server sent them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RowSet<T> {
    rows: Vec<T>,
}

impl<T> RowSet<T> {
    /// Create a row set from rows already in server order
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Consume into the underlying vector
    pub fn into_vec(self) -> Vec<T> {
        self.rows
    }
}

impl<T> Default for RowSet<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Deref for RowSet<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.rows
    }
}

impl<T> FromIterator<T> for RowSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for RowSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RowSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Types that decode from a single row record
pub trait FromRow: Sized {
    /// Build the value from a row
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError>;
}

/// Decode the named group under `node` into typed rows.
///
/// A missing or empty group yields an empty set. The first row that fails
/// aborts decoding, so no partially decoded set is ever returned.
pub fn decode_rowset<T: FromRow>(node: &Node, group: &str) -> Result<RowSet<T>, ParseError> {
    decode_elements(node, group, ROW_ELEMENT)
}

/// Decode a group whose records use an element name other than `row`
pub fn decode_elements<T: FromRow>(
    node: &Node,
    group: &str,
    element: &str,
) -> Result<RowSet<T>, ParseError> {
    let Some(group_node) = node.group(group) else {
        return Ok(RowSet::default());
    };

    group_node
        .children_named(element)
        .enumerate()
        .map(|(index, row)| {
            T::from_row(&Row::new(
                row,
                Location::Row {
                    group: group.to_string(),
                    index,
                },
            ))
        })
        .collect()
}

// ============================================================================
// Row accessor
// ============================================================================

/// Read access to one record, with its location for error reporting.
///
/// Fields are looked up as attributes first, then as child-element text, so
/// the same decode function works for attribute rows and element rows.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    node: &'a Node,
    location: Location,
}

impl<'a> Row<'a> {
    /// Wrap a node at a known location
    pub fn new(node: &'a Node, location: Location) -> Self {
        Self { node, location }
    }

    /// Wrap a plain element
    pub fn element(node: &'a Node) -> Self {
        Self {
            node,
            location: Location::Element(node.name.clone()),
        }
    }

    /// The underlying node
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Where this row sits in the document
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Raw field value, if present
    pub fn raw(&self, field: &str) -> Option<&'a str> {
        self.node
            .attr(field)
            .or_else(|| self.node.child(field).map(Node::text))
    }

    /// Required string field
    pub fn str(&self, field: &str) -> Result<String, ParseError> {
        self.required(field).map(ToString::to_string)
    }

    /// Optional string field
    pub fn opt_str(&self, field: &str) -> Option<String> {
        self.raw(field).map(ToString::to_string)
    }

    /// Required field parsed with `FromStr`
    pub fn parse<V>(&self, field: &str) -> Result<V, ParseError>
    where
        V: FromStr,
        V::Err: Display,
    {
        let raw = self.required(field)?;
        self.convert(field, raw)
    }

    /// Optional field parsed with `FromStr`; present but invalid is still an error
    pub fn opt_parse<V>(&self, field: &str) -> Result<Option<V>, ParseError>
    where
        V: FromStr,
        V::Err: Display,
    {
        match self.raw(field) {
            Some(raw) if !raw.trim().is_empty() => self.convert(field, raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Required boolean field, written as `1`/`0` or `true`/`false`
    pub fn flag(&self, field: &str) -> Result<bool, ParseError> {
        let raw = self.required(field)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(self.invalid(field, raw, "expected 0, 1, true or false")),
        }
    }

    /// Required date field in the API date format
    pub fn date(&self, field: &str) -> Result<DateTime<Utc>, ParseError> {
        let raw = self.required(field)?;
        parse_date(raw).map_err(|e| self.invalid(field, raw, e.to_string()))
    }

    /// Optional date field
    pub fn opt_date(&self, field: &str) -> Result<Option<DateTime<Utc>>, ParseError> {
        match self.raw(field) {
            Some(raw) if !raw.trim().is_empty() => parse_date(raw)
                .map(Some)
                .map_err(|e| self.invalid(field, raw, e.to_string())),
            _ => Ok(None),
        }
    }

    /// Text content of the row itself
    pub fn text(&self) -> String {
        self.node.text().to_string()
    }

    /// Nested row group
    pub fn rowset<T: FromRow>(&self, group: &str) -> Result<RowSet<T>, ParseError> {
        decode_rowset(self.node, group)
    }

    /// Required nested element
    pub fn child(&self, name: &str) -> Result<Row<'a>, ParseError> {
        self.node
            .child(name)
            .map(Row::element)
            .ok_or_else(|| ParseError::missing_field(name, self.location.clone()))
    }

    fn required(&self, field: &str) -> Result<&'a str, ParseError> {
        self.raw(field)
            .ok_or_else(|| ParseError::missing_field(field, self.location.clone()))
    }

    fn convert<V>(&self, field: &str, raw: &str) -> Result<V, ParseError>
    where
        V: FromStr,
        V::Err: Display,
    {
        raw.trim()
            .parse()
            .map_err(|e: V::Err| self.invalid(field, raw, e.to_string()))
    }

    fn invalid(&self, field: &str, value: &str, message: impl Into<String>) -> ParseError {
        ParseError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            location: self.location.clone(),
            message: message.into(),
        }
    }
}
