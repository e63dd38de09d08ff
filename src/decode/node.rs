//! Format-neutral document tree

use crate::error::ParseError;

/// Name of the XML element that wraps a row group
const ROWSET_ELEMENT: &str = "rowset";

/// One element of a parsed document.
///
/// XML elements map one-to-one. JSON objects put their scalar members in
/// `attributes` and their object/array members in `children`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    /// Element name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Node>,
    /// Text content, if any
    pub text: Option<String>,
}

impl Node {
    /// Create an empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child node
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child with the given name, or an error naming it
    pub fn require_child(&self, name: &str) -> Result<&Node, ParseError> {
        self.child(name)
            .ok_or_else(|| ParseError::missing_element(name))
    }

    /// All children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text content of the first child with the given name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    /// Trimmed text content, empty if there is none
    pub fn text(&self) -> &str {
        self.text.as_deref().map_or("", str::trim)
    }

    /// Find a named row group.
    ///
    /// Matches `<rowset name="...">` as written by the game API, or a child
    /// carrying the group name directly as produced from object notation.
    pub fn group(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| {
            (c.name == ROWSET_ELEMENT && c.attr("name") == Some(name)) || c.name == name
        })
    }
}
