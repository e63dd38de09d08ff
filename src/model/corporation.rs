//! Corporation results

use crate::decode::{decode_rowset, FromNode, FromRow, Node, Row, RowSet};
use crate::error::ParseError;
use crate::pagination::{Extreme, Walkable};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use super::character::{MarketOrders, WalletTransactions};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletJournal {
    pub entries: RowSet<JournalEntry>,
}

impl FromNode for WalletJournal {
    fn from_node(node: &Node) -> Result<Self, ParseError> {
        Ok(Self {
            entries: decode_rowset(node, "entries")?,
        })
    }
}

impl Walkable for WalletJournal {
    const EDGE: Extreme = Extreme::Min;

    fn record_ids(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.ref_id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: DateTime<Utc>,
    pub ref_id: i64,
    pub ref_type_id: i32,
    pub owner_name1: String,
    pub owner_id1: i64,
    pub owner_name2: String,
    pub owner_id2: i64,
    pub arg_name1: String,
    pub arg_id1: i64,
    pub amount: f64,
    pub balance: f64,
    pub reason: String,
}

impl FromRow for JournalEntry {
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            date: row.date("date")?,
            ref_id: row.parse("refID")?,
            ref_type_id: row.parse("refTypeID")?,
            owner_name1: row.str("ownerName1")?,
            owner_id1: row.parse("ownerID1")?,
            owner_name2: row.str("ownerName2")?,
            owner_id2: row.parse("ownerID2")?,
            arg_name1: row.opt_str("argName1").unwrap_or_default(),
            arg_id1: row.opt_parse("argID1")?.unwrap_or_default(),
            amount: row.parse("amount")?,
            balance: row.parse("balance")?,
            reason: row.opt_str("reason").unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{deserialize, XmlSerializer};

    #[test]
    fn test_wallet_journal_walks_from_smallest_ref() {
        let xml = r#"<result>
            <rowset name="entries" key="refID" columns="date,refID">
              <row date="2014-01-03 10:00:00" refID="9003" refTypeID="2" ownerName1="A" ownerID1="1"
                   ownerName2="B" ownerID2="2" argName1="" argID1="0" amount="10.5" balance="100" reason=""/>
              <row date="2014-01-02 10:00:00" refID="9001" refTypeID="2" ownerName1="A" ownerID1="1"
                   ownerName2="B" ownerID2="2" amount="-3" balance="89.5"/>
            </rowset>
          </result>"#;

        let journal: WalletJournal = deserialize(&XmlSerializer::new(), xml).unwrap();
        assert_eq!(journal.entries.len(), 2);
        assert_eq!(journal.record_ids(), vec![9003, 9001]);
        assert_eq!(journal.entries[1].arg_id1, 0);
        assert_eq!(WalletJournal::EDGE, Extreme::Min);
    }
}
