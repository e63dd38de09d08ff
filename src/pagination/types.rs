//! Pagination types and traits

/// Which end of a page the next cursor is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Smallest id; the endpoint walks backwards in time
    Min,
    /// Largest id; the endpoint walks forwards
    Max,
}

impl Extreme {
    /// Pick the extreme id of a page, `None` for an empty page
    pub fn pick(self, ids: impl IntoIterator<Item = i64>) -> Option<i64> {
        let ids = ids.into_iter();
        match self {
            Self::Min => ids.min(),
            Self::Max => ids.max(),
        }
    }
}

/// Results whose records can be walked with an id cursor
pub trait Walkable {
    /// Edge of the page the cursor comes from
    const EDGE: Extreme;

    /// Record ids of this page, in server order
    fn record_ids(&self) -> Vec<i64>;

    /// Cursor for the next page, `None` if the page is empty
    fn cursor(&self) -> Option<i64> {
        Self::EDGE.pick(self.record_ids())
    }
}

/// Parameters handed to a bound fetch when walking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkCursor {
    /// Boundary record id (sent as `fromID` or similar)
    pub from_id: i64,
    /// Number of rows requested
    pub count: u32,
}
