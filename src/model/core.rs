//! Server-wide results that need no credential

use crate::decode::{decode_rowset, FromNode, FromRow, Node, Row, RowSet};
use crate::error::ParseError;
use serde::Serialize;

/// Tranquility server status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub server_open: bool,
    pub online_players: i64,
}

impl FromNode for ServerStatus {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        let result = Row::element(node);
        Ok(Self {
            server_open: result.flag("serverOpen")?,
            online_players: result.parse("onlinePlayers")?,
        })
    }
}

/// Access-mask table of every API call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallList {
    pub call_groups: RowSet<CallGroup>,
    pub calls: RowSet<Call>,
}

impl FromNode for CallList {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            call_groups: decode_rowset(node, "callGroups")?,
            calls: decode_rowset(node, "calls")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallGroup {
    pub group_id: i64,
    pub name: String,
    pub description: String,
}

impl FromRow for CallGroup {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            group_id: row.parse("groupID")?,
            name: row.str("name")?,
            description: row.opt_str("description").unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub access_mask: i64,
    /// `Character` or `Corporation`
    pub key_type: String,
    pub name: String,
    pub group_id: i64,
    pub description: String,
}

impl FromRow for Call {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            access_mask: row.parse("accessMask")?,
            key_type: row.str("type")?,
            name: row.str("name")?,
            group_id: row.parse("groupID")?,
            description: row.opt_str("description").unwrap_or_default(),
        })
    }
}
