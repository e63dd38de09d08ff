//! Persisted registry types
//!
//! These types are serialized to JSON and survive between sessions.

use crate::types::RequestIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete persisted registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// One entry per request identity
    #[serde(default)]
    pub entries: Vec<CacheEntry>,
}

impl CacheSnapshot {
    /// Build a snapshot from the in-memory map, ordered for stable output
    pub fn from_map(map: &HashMap<RequestIdentity, DateTime<Utc>>) -> Self {
        let mut entries: Vec<CacheEntry> = map
            .iter()
            .map(|(identity, expires)| CacheEntry {
                identity: identity.clone(),
                expires: *expires,
            })
            .collect();
        entries.sort_by(|a, b| a.identity.to_string().cmp(&b.identity.to_string()));
        Self { entries }
    }

    /// Convert into the in-memory map; a later duplicate wins
    pub fn into_map(self) -> HashMap<RequestIdentity, DateTime<Utc>> {
        self.entries
            .into_iter()
            .map(|entry| (entry.identity, entry.expires))
            .collect()
    }
}

/// Expiration of one request identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub identity: RequestIdentity,
    pub expires: DateTime<Utc>,
}
