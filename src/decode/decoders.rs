//! Serializer implementations
//!
//! Each serializer handles one body format and produces a [`Node`] tree.

use super::node::Node;
use super::types::{Format, Serializer};
use crate::error::ParseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

// ============================================================================
// XML Serializer
// ============================================================================

/// Markup serializer backed by quick-xml
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    /// Create a new XML serializer
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for XmlSerializer {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn parse(&self, raw: &str) -> Result<Node, ParseError> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(open_element(&start)?),
                Ok(Event::Empty(start)) => {
                    let node = open_element(&start)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| xml_error("closing tag without an open element"))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text.unescape().map_err(|e| xml_error(e.to_string()))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(data)) => {
                    let data = data.into_inner();
                    append_text(&mut stack, &String::from_utf8_lossy(&data));
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions, doctype
                Ok(_) => {}
                Err(e) => {
                    return Err(xml_error(format!(
                        "{e} at position {}",
                        reader.buffer_position()
                    )))
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(xml_error(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| xml_error("document has no root element"))
    }
}

fn xml_error(message: impl Into<String>) -> ParseError {
    ParseError::malformed("xml", message)
}

/// Build a node from an opening tag and its attributes
fn open_element(start: &BytesStart<'_>) -> Result<Node, ParseError> {
    let mut node = Node::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

/// Attach a finished node to its parent, or make it the root
fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(xml_error("multiple root elements")),
    }
    Ok(())
}

fn append_text(stack: &mut [Node], text: &str) {
    if let Some(current) = stack.last_mut() {
        current
            .text
            .get_or_insert_with(String::new)
            .push_str(text);
    }
}

// ============================================================================
// JSON Serializer
// ============================================================================

/// Element name given to array items
const ROW_ELEMENT: &str = "row";

/// Object-notation serializer backed by serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Create a new JSON serializer
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, raw: &str) -> Result<Node, ParseError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ParseError::malformed("json", e.to_string()))?;

        // A single-member object names the document, like an XML root element
        match value {
            Value::Object(map) if map.len() == 1 && map.values().all(Value::is_object) => {
                let (name, inner) = map
                    .into_iter()
                    .next()
                    .ok_or_else(|| ParseError::malformed("json", "empty document"))?;
                Ok(value_to_node(name, &inner))
            }
            Value::Object(_) | Value::Array(_) => Ok(value_to_node("root".to_string(), &value)),
            _ => Err(ParseError::malformed(
                "json",
                "document root must be an object or array",
            )),
        }
    }
}

/// Convert a JSON value into a node with the given name
fn value_to_node(name: String, value: &Value) -> Node {
    let mut node = Node::new(name);
    match value {
        Value::Object(map) => fill_object(&mut node, map),
        Value::Array(items) => node.children = items.iter().map(array_item).collect(),
        Value::Null => {}
        scalar => node.text = scalar_text(scalar),
    }
    node
}

fn fill_object(node: &mut Node, map: &Map<String, Value>) {
    for (key, member) in map {
        match member {
            Value::Object(_) | Value::Array(_) => {
                node.children.push(value_to_node(key.clone(), member));
            }
            Value::Null => {}
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    node.attributes.push((key.clone(), text));
                }
            }
        }
    }
}

/// Array items become `row` nodes; `{"row": {...}}` wrappers are unwrapped
fn array_item(item: &Value) -> Node {
    if let Value::Object(map) = item {
        if map.len() == 1 {
            if let Some(inner @ Value::Object(_)) = map.get(ROW_ELEMENT) {
                return value_to_node(ROW_ELEMENT.to_string(), inner);
            }
        }
    }
    value_to_node(ROW_ELEMENT.to_string(), item)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
