//! Tests for the decode module

use super::*;
use crate::error::{Location, ParseError};
use crate::model::core::CallList;
use crate::model::ApiResponse;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: i64,
    name: String,
}

impl FromRow for Item {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            id: row.parse("itemID")?,
            name: row.str("name")?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Items {
    items: RowSet<Item>,
}

impl FromNode for Items {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            items: decode_rowset(node, "items")?,
        })
    }
}

/// Ids in a deliberately unsorted order
fn ids(n: usize) -> Vec<i64> {
    (0..n as i64).map(|i| (i * 37) % 101).collect()
}

fn xml_rowset(ids: &[i64]) -> String {
    let rows: String = ids
        .iter()
        .map(|id| format!(r#"<row itemID="{id}" name="item {id}" flag="extra" />"#))
        .collect();
    format!(r#"<result><rowset name="items" key="itemID" columns="itemID,name">{rows}</rowset></result>"#)
}

fn json_rowset(ids: &[i64]) -> String {
    let rows: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"row": {{"itemID": {id}, "name": "item {id}", "flag": "extra"}}}}"#))
        .collect();
    format!(r#"{{"result": {{"items": [{}]}}}}"#, rows.join(","))
}

// ============================================================================
// XML Serializer Tests
// ============================================================================

#[test]
fn test_xml_parse_tree() {
    let xml = r#"<?xml version='1.0' encoding='UTF-8'?>
        <eveapi version="2">
          <!-- comment -->
          <currentTime>2014-03-05 17:00:00</currentTime>
          <result><note><![CDATA[a < b]]></note><esc>Tom &amp; Jerry</esc></result>
        </eveapi>"#;

    let root = XmlSerializer::new().parse(xml).unwrap();

    assert_eq!(root.name, "eveapi");
    assert_eq!(root.attr("version"), Some("2"));
    assert_eq!(root.child_text("currentTime"), Some("2014-03-05 17:00:00"));
    let result = root.require_child("result").unwrap();
    assert_eq!(result.child("note").map(Node::text), Some("a < b"));
    assert_eq!(result.child("esc").map(Node::text), Some("Tom & Jerry"));
}

#[test_case("<eveapi><result></eveapi>" ; "mismatched tag")]
#[test_case("<eveapi><result>" ; "unclosed element")]
#[test_case("" ; "empty body")]
#[test_case("<a/><b/>" ; "two roots")]
fn test_xml_malformed(body: &str) {
    let err = XmlSerializer::new().parse(body).unwrap_err();
    assert!(matches!(err, ParseError::Malformed { format: "xml", .. }));
}

// ============================================================================
// JSON Serializer Tests
// ============================================================================

#[test]
fn test_json_named_root() {
    let root = JsonSerializer::new()
        .parse(r#"{"emd": {"version": 2, "name": "x", "missing": null, "result": []}}"#)
        .unwrap();

    assert_eq!(root.name, "emd");
    assert_eq!(root.attr("version"), Some("2"));
    assert_eq!(root.attr("missing"), None);
    assert!(root.group("result").unwrap().children.is_empty());
}

#[test]
fn test_json_anonymous_root() {
    let root = JsonSerializer::new()
        .parse(r#"{"a": 1, "b": {"c": true}}"#)
        .unwrap();

    assert_eq!(root.name, "root");
    assert_eq!(root.attr("a"), Some("1"));
    assert_eq!(root.child("b").and_then(|b| b.attr("c")), Some("true"));
}

#[test]
fn test_json_array_items_become_rows() {
    let root = JsonSerializer::new()
        .parse(r#"[{"row": {"itemID": 1}}, {"itemID": 2}]"#)
        .unwrap();

    let ids: Vec<_> = root.children_named("row").map(|r| r.attr("itemID")).collect();
    assert_eq!(ids, vec![Some("1"), Some("2")]);
}

#[test_case("{" ; "truncated")]
#[test_case("42" ; "scalar root")]
fn test_json_malformed(body: &str) {
    let err = JsonSerializer::new().parse(body).unwrap_err();
    assert!(matches!(err, ParseError::Malformed { format: "json", .. }));
}

#[test]
fn test_serializer_for() {
    assert_eq!(serializer_for(Format::Xml).format(), Format::Xml);
    assert_eq!(serializer_for(Format::Json).format(), Format::Json);
    assert_eq!(Format::Json.as_str(), "json");
}

// ============================================================================
// RowSet Tests
// ============================================================================

#[test_case(0 ; "no rows")]
#[test_case(1 ; "one row")]
#[test_case(50 ; "fifty rows")]
fn test_rowset_preserves_order_xml(n: usize) {
    let expected = ids(n);
    let items: Items = deserialize(&XmlSerializer::new(), &xml_rowset(&expected)).unwrap();

    assert_eq!(items.items.len(), n);
    assert_eq!(items.items.iter().map(|i| i.id).collect::<Vec<_>>(), expected);
}

#[test_case(0 ; "no rows")]
#[test_case(1 ; "one row")]
#[test_case(50 ; "fifty rows")]
fn test_rowset_preserves_order_json(n: usize) {
    let expected = ids(n);
    let items: Items = deserialize(&JsonSerializer::new(), &json_rowset(&expected)).unwrap();

    assert_eq!(items.items.iter().map(|i| i.id).collect::<Vec<_>>(), expected);
}

#[test]
fn test_serializers_are_interchangeable() {
    let expected = ids(5);
    let from_xml: Items = deserialize(&XmlSerializer::new(), &xml_rowset(&expected)).unwrap();
    let from_json: Items = deserialize(&JsonSerializer::new(), &json_rowset(&expected)).unwrap();
    assert_eq!(from_xml, from_json);
}

#[test]
fn test_rowset_missing_group_is_empty() {
    let items: Items = deserialize(&XmlSerializer::new(), "<result/>").unwrap();
    assert!(items.items.is_empty());
}

#[test]
fn test_rowset_missing_field_names_field_and_row() {
    let xml = r#"<result><rowset name="items">
        <row itemID="1" name="one" />
        <row itemID="2" name="two" />
        <row itemID="3" />
      </rowset></result>"#;

    let err = deserialize::<Items>(&XmlSerializer::new(), xml).unwrap_err();

    assert_eq!(
        err,
        ParseError::missing_field(
            "name",
            Location::Row {
                group: "items".to_string(),
                index: 2
            }
        )
    );
}

#[test]
fn test_rowset_invalid_value() {
    let xml = r#"<result><rowset name="items"><row itemID="one" name="x" /></rowset></result>"#;

    let err = deserialize::<Items>(&XmlSerializer::new(), xml).unwrap_err();

    assert!(matches!(
        err,
        ParseError::InvalidValue { ref field, ref value, .. } if field == "itemID" && value == "one"
    ));
}

#[test]
fn test_rows_read_child_elements() {
    let xml = r#"<result><rowset name="items">
        <row itemID="4"><name>four</name></row>
      </rowset></result>"#;

    let items: Items = deserialize(&XmlSerializer::new(), xml).unwrap();
    assert_eq!(
        items.items.into_vec(),
        vec![Item {
            id: 4,
            name: "four".to_string()
        }]
    );
}

#[test]
fn test_rowset_collect_and_iterate() {
    let set: RowSet<i32> = vec![3, 1, 2].into_iter().collect();
    assert_eq!((&set).into_iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    assert_eq!(set.first(), Some(&3));
    assert_eq!(set.into_iter().sum::<i32>(), 6);
}

// ============================================================================
// Row Accessor Tests
// ============================================================================

#[test]
fn test_row_flags_and_dates() {
    let node = Node::new("row")
        .with_attr("open", "True")
        .with_attr("closed", "0")
        .with_attr("broken", "maybe")
        .with_attr("issued", "2014-03-05 17:30:00")
        .with_attr("empty", "")
        .with_attr("bad", "2014-03-05T17:30:00Z");
    let row = Row::element(&node);

    assert!(row.flag("open").unwrap());
    assert!(!row.flag("closed").unwrap());
    assert!(row.flag("broken").is_err());
    assert_eq!(
        row.date("issued").unwrap(),
        Utc.with_ymd_and_hms(2014, 3, 5, 17, 30, 0).unwrap()
    );
    assert_eq!(row.opt_date("empty").unwrap(), None);
    assert_eq!(row.opt_date("absent").unwrap(), None);
    assert_eq!(row.date("bad").unwrap_err().field(), Some("bad"));
}

#[test]
fn test_row_optional_parse() {
    let node = Node::new("row").with_attr("n", "12").with_attr("x", "twelve");
    let row = Row::element(&node);

    assert_eq!(row.opt_parse::<i64>("n").unwrap(), Some(12));
    assert_eq!(row.opt_parse::<i64>("absent").unwrap(), None);
    assert!(row.opt_parse::<i64>("x").is_err());
    assert_eq!(row.opt_str("absent"), None);
}

#[test]
fn test_row_child_missing() {
    let node = Node::new("type").with_attr("id", "34");
    let err = Row::element(&node).child("buy").unwrap_err();
    assert_eq!(err.field(), Some("buy"));
}

// ============================================================================
// Multiple Groups
// ============================================================================

#[test]
fn test_call_list_routes_groups() {
    let xml = r#"<?xml version='1.0' encoding='UTF-8'?>
        <eveapi version="2">
          <currentTime>2014-03-05 17:00:00</currentTime>
          <result>
            <rowset name="callGroups" key="groupID" columns="groupID,name,description">
              <row groupID="1" name="Account and Market" description="Market orders, account balance and journal history." />
              <row groupID="7" name="Communications" description="Private communications such as contact lists." />
            </rowset>
            <rowset name="calls" key="accessMask,type" columns="accessMask,type,name,groupID,description">
              <row accessMask="134217728" type="Character" name="Locations" groupID="7" description="Allows the fetching of coordinate and name data." />
            </rowset>
          </result>
          <cachedUntil>2014-03-05 23:00:00</cachedUntil>
        </eveapi>"#;

    let response: ApiResponse<CallList> = deserialize(&XmlSerializer::new(), xml).unwrap();

    assert_eq!(response.call_groups.len(), 2);
    assert_eq!(response.call_groups[1].name, "Communications");
    assert_eq!(response.calls.len(), 1);
    assert_eq!(response.calls[0].key_type, "Character");
    assert_eq!(response.calls[0].group_id, 7);
}
