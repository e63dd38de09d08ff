//! EVE-Central market results
//!
//! EVE-Central documents carry no cache expiration, so these results never
//! enter the expiration registry.

use super::api::CachedResult;
use crate::decode::{decode_elements, FromNode, FromRow, Node, Row, RowSet};
use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Market Stat
// ============================================================================

/// Aggregate price statistics per item type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStat {
    pub items: RowSet<MarketStatItem>,
}

impl FromNode for MarketStat {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            items: decode_elements(node, "marketstat", "type")?,
        })
    }
}

impl CachedResult for MarketStat {
    fn cached_until(&self) -> Option<DateTime<Utc>> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatItem {
    pub type_id: i64,
    pub buy: OrderStats,
    pub sell: OrderStats,
    pub all: OrderStats,
}

impl FromRow for MarketStatItem {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            type_id: row.parse("id")?,
            buy: OrderStats::from_row(&row.child("buy")?)?,
            sell: OrderStats::from_row(&row.child("sell")?)?,
            all: OrderStats::from_row(&row.child("all")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub volume: f64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
    pub median: f64,
    pub percentile: f64,
}

impl FromRow for OrderStats {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            volume: row.parse("volume")?,
            average: row.parse("avg")?,
            max: row.parse("max")?,
            min: row.parse("min")?,
            std_dev: row.parse("stddev")?,
            median: row.parse("median")?,
            percentile: row.parse("percentile")?,
        })
    }
}

// ============================================================================
// Quicklook
// ============================================================================

/// Individual buy and sell orders for one item type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quicklook {
    pub type_id: i64,
    pub type_name: String,
    pub regions: Vec<String>,
    pub hour_limit: i32,
    pub min_quantity: i64,
    pub sell_orders: RowSet<QuicklookOrder>,
    pub buy_orders: RowSet<QuicklookOrder>,
}

impl FromNode for Quicklook {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        let quicklook = node.require_child("quicklook")?;
        let row = Row::element(quicklook);
        let regions = quicklook
            .child("regions")
            .map(|r| {
                r.children_named("region")
                    .map(|region| region.text().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            type_id: row.parse("item")?,
            type_name: row.str("itemname")?,
            regions,
            hour_limit: row.parse("hours")?,
            min_quantity: row.parse("minqty")?,
            sell_orders: decode_elements(quicklook, "sell_orders", "order")?,
            buy_orders: decode_elements(quicklook, "buy_orders", "order")?,
        })
    }
}

impl CachedResult for Quicklook {
    fn cached_until(&self) -> Option<DateTime<Utc>> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuicklookOrder {
    pub order_id: i64,
    pub region_id: i64,
    pub station_id: i64,
    pub station_name: String,
    pub security: f64,
    pub range: i32,
    pub price: f64,
    pub volume_remaining: i64,
    pub min_volume: i64,
    /// Expiry day as reported, `yyyy-MM-dd`
    pub expires: String,
    /// Report time as reported, `MM-dd HH:mm:ss`
    pub reported_time: String,
}

impl FromRow for QuicklookOrder {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            order_id: row.parse("id")?,
            region_id: row.parse("region")?,
            station_id: row.parse("station")?,
            station_name: row.str("station_name")?,
            security: row.parse("security")?,
            range: row.parse("range")?,
            price: row.parse("price")?,
            volume_remaining: row.parse("vol_remain")?,
            min_volume: row.parse("min_volume")?,
            expires: row.str("expires")?,
            reported_time: row.str("reported_time")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{deserialize, XmlSerializer};

    const MARKET_STAT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <evec_api version="2.0" method="marketstat_xml">
          <marketstat>
            <type id="34">
              <buy><volume>100</volume><avg>4.5</avg><max>5</max><min>4</min><stddev>0.2</stddev><median>4.6</median><percentile>4.9</percentile></buy>
              <sell><volume>200</volume><avg>5.5</avg><max>6</max><min>5</min><stddev>0.3</stddev><median>5.4</median><percentile>5.1</percentile></sell>
              <all><volume>300</volume><avg>5</avg><max>6</max><min>4</min><stddev>0.5</stddev><median>5</median><percentile>4.2</percentile></all>
            </type>
          </marketstat>
        </evec_api>"#;

    #[test]
    fn test_market_stat() {
        let stat: MarketStat = deserialize(&XmlSerializer::new(), MARKET_STAT).unwrap();
        assert_eq!(stat.items.len(), 1);
        let item = &stat.items[0];
        assert_eq!(item.type_id, 34);
        assert_eq!(item.buy.volume, 100.0);
        assert_eq!(item.sell.median, 5.4);
        assert_eq!(item.all.percentile, 4.2);
        assert_eq!(stat.cached_until(), None);
    }

    #[test]
    fn test_market_stat_missing_bucket_fails() {
        let xml = r#"<evec_api><marketstat><type id="34"><buy/></type></marketstat></evec_api>"#;
        let err = deserialize::<MarketStat>(&XmlSerializer::new(), xml).unwrap_err();
        assert_eq!(err.field(), Some("volume"));
    }
}
