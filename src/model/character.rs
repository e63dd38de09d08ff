//! Character results
//!
//! Market orders and wallet transactions share their layout with the
//! corporation endpoints and are reused there.

use crate::decode::{decode_rowset, FromNode, FromRow, Node, Row, RowSet};
use crate::error::ParseError;
use crate::pagination::{Extreme, Walkable};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Market Orders
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOrders {
    pub orders: RowSet<MarketOrder>,
}

impl FromNode for MarketOrders {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            orders: decode_rowset(node, "orders")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrder {
    pub order_id: i64,
    pub character_id: i64,
    pub station_id: i64,
    pub volume_entered: i64,
    pub volume_remaining: i64,
    pub min_volume: i64,
    pub order_state: i32,
    pub type_id: i64,
    pub range: i32,
    pub account_key: i32,
    pub duration: i32,
    pub escrow: f64,
    pub price: f64,
    pub bid: bool,
    pub issued: DateTime<Utc>,
}

impl FromRow for MarketOrder {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            order_id: row.parse("orderID")?,
            character_id: row.parse("charID")?,
            station_id: row.parse("stationID")?,
            volume_entered: row.parse("volEntered")?,
            volume_remaining: row.parse("volRemaining")?,
            min_volume: row.parse("minVolume")?,
            order_state: row.parse("orderState")?,
            type_id: row.parse("typeID")?,
            range: row.parse("range")?,
            account_key: row.parse("accountKey")?,
            duration: row.parse("duration")?,
            escrow: row.parse("escrow")?,
            price: row.parse("price")?,
            bid: row.flag("bid")?,
            issued: row.date("issued")?,
        })
    }
}

// ============================================================================
// Wallet Transactions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletTransactions {
    pub transactions: RowSet<Transaction>,
}

impl FromNode for WalletTransactions {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            transactions: decode_rowset(node, "transactions")?,
        })
    }
}

/// Walks backwards: the next page starts below the smallest transaction id
impl Walkable for WalletTransactions {
    const EDGE: Extreme = Extreme::Min;

    fn record_ids(&self) -> Vec<i64> {
        self.transactions.iter().map(|t| t.transaction_id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_date: DateTime<Utc>,
    pub transaction_id: i64,
    pub quantity: i64,
    pub type_name: String,
    pub type_id: i64,
    pub price: f64,
    pub client_id: i64,
    pub client_name: String,
    pub station_id: i64,
    pub station_name: String,
    /// `buy` or `sell`
    pub transaction_type: String,
    /// `personal` or `corporation`
    pub transaction_for: String,
    pub journal_transaction_id: Option<i64>,
}

impl FromRow for Transaction {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            transaction_date: row.date("transactionDateTime")?,
            transaction_id: row.parse("transactionID")?,
            quantity: row.parse("quantity")?,
            type_name: row.str("typeName")?,
            type_id: row.parse("typeID")?,
            price: row.parse("price")?,
            client_id: row.parse("clientID")?,
            client_name: row.str("clientName")?,
            station_id: row.parse("stationID")?,
            station_name: row.str("stationName")?,
            transaction_type: row.str("transactionType")?,
            transaction_for: row.opt_str("transactionFor").unwrap_or_default(),
            journal_transaction_id: row.opt_parse("journalTransactionID")?,
        })
    }
}

// ============================================================================
// Contract Bids
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractBids {
    pub bids: RowSet<Bid>,
}

impl FromNode for ContractBids {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            bids: decode_rowset(node, "bidList")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub bid_id: i64,
    pub contract_id: i64,
    pub bidder_id: i64,
    pub bid_date: DateTime<Utc>,
    pub amount: f64,
}

impl FromRow for Bid {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            bid_id: row.parse("bidID")?,
            contract_id: row.parse("contractID")?,
            bidder_id: row.parse("bidderID")?,
            bid_date: row.date("dateBid")?,
            amount: row.parse("amount")?,
        })
    }
}

// ============================================================================
// Notification Texts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTexts {
    pub notifications: RowSet<Notification>,
    /// Requested ids the server had no text for
    pub missing_ids: Vec<i64>,
}

impl FromNode for NotificationTexts {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        let missing_ids = match node.child_text("missingIDs").map(str::trim) {
            None | Some("") => Vec::new(),
            Some(ids) => ids
                .split(',')
                .map(|id| {
                    id.trim().parse().map_err(|_| ParseError::InvalidValue {
                        field: "missingIDs".to_string(),
                        value: ids.to_string(),
                        location: crate::error::Location::Element(node.name.clone()),
                        message: format!("'{id}' is not an id"),
                    })
                })
                .collect::<Result<_, _>>()?,
        };

        Ok(Self {
            notifications: decode_rowset(node, "notifications")?,
            missing_ids,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: i64,
    /// Body text, delivered as element content
    pub content: String,
}

impl FromRow for Notification {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            notification_id: row.parse("notificationID")?,
            content: row.text(),
        })
    }
}
