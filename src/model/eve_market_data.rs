//! EVE-Marketdata results (object notation)

use super::api::CachedResult;
use crate::decode::{decode_rowset, FromNode, FromRow, Node, Row, RowSet};
use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the market to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
    #[default]
    Both,
}

impl OrderType {
    /// Value of the `buysell` parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Buy => "b",
            Self::Sell => "s",
            Self::Both => "a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrders {
    pub current_time: Option<DateTime<Utc>>,
    pub orders: RowSet<ItemOrder>,
}

impl FromNode for ItemOrders {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            current_time: Row::element(node).opt_date("currentTime")?,
            orders: decode_rowset(node, "result")?,
        })
    }
}

impl CachedResult for ItemOrders {
    fn cached_until(&self) -> Option<DateTime<Utc>> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrder {
    pub order_id: i64,
    /// `b` or `s`
    pub order_type: String,
    pub type_id: i64,
    pub region_id: i64,
    pub station_id: i64,
    pub price: f64,
    pub volume_entered: i64,
    pub volume_remaining: i64,
    pub min_volume: i64,
    pub range: i32,
    pub issued: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub created: Option<DateTime<Utc>>,
}

impl FromRow for ItemOrder {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            order_id: row.parse("orderID")?,
            order_type: row.str("buysell")?,
            type_id: row.parse("typeID")?,
            region_id: row.parse("regionID")?,
            station_id: row.parse("stationID")?,
            price: row.parse("price")?,
            volume_entered: row.parse("volEntered")?,
            volume_remaining: row.parse("volRemaining")?,
            min_volume: row.parse("minVolume")?,
            range: row.parse("range")?,
            issued: row.date("issued")?,
            expires: row.date("expires")?,
            created: row.opt_date("created")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{deserialize, JsonSerializer};

    #[test]
    fn test_item_orders_from_json() {
        let json = r#"{"emd": {
            "version": 2,
            "currentTime": "2014-02-01 10:00:00",
            "name": "item_orders",
            "key": "orderID",
            "result": [
              {"row": {"buysell": "s", "typeID": "34", "regionID": "10000002", "stationID": "60003760",
                       "price": "5.01", "orderID": "3001", "volEntered": "1000", "volRemaining": "400",
                       "minVolume": "1", "range": "32767", "issued": "2014-01-30 09:00:00",
                       "expires": "2014-04-30 09:00:00"}},
              {"row": {"buysell": "b", "typeID": 34, "regionID": 10000002, "stationID": 60003760,
                       "price": 4.8, "orderID": 3002, "volEntered": 50, "volRemaining": 50,
                       "minVolume": 1, "range": -1, "issued": "2014-01-31 09:00:00",
                       "expires": "2014-02-28 09:00:00", "created": "2014-01-31 09:05:00"}}
            ]
        }}"#;

        let orders: ItemOrders = deserialize(&JsonSerializer::new(), json).unwrap();
        assert_eq!(orders.orders.len(), 2);
        assert_eq!(orders.orders[0].order_id, 3001);
        assert_eq!(orders.orders[1].order_type, "b");
        assert_eq!(orders.orders[1].range, -1);
        assert!(orders.orders[0].created.is_none());
        assert!(orders.orders[1].created.is_some());
        assert!(orders.current_time.is_some());
        assert_eq!(orders.cached_until(), None);
    }

    #[test]
    fn test_order_type_param() {
        assert_eq!(OrderType::Buy.as_param(), "b");
        assert_eq!(OrderType::Sell.as_param(), "s");
        assert_eq!(OrderType::default().as_param(), "a");
    }
}
