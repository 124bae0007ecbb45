//! Cache Snapshot Module
//!
//! Transportable form of the cache contents for export/import. Only
//! non-expired entries are exported; entries already expired at import
//! time are skipped silently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheDomain;

// == Snapshot Entry ==
/// One exported cache entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// The cache key
    pub key: String,
    /// The stored payload
    pub value: Value,
    /// Original insertion timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp, preserved across the transport
    pub expires_at: DateTime<Utc>,
    /// Domain tag, if the entry was stored under one
    #[serde(default)]
    pub domain: Option<CacheDomain>,
    /// Hit count at export time
    pub access_count: u64,
}

// == Cache Snapshot ==
/// A full export of the cache's live entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// When the export was taken
    pub exported_at: DateTime<Utc>,
    /// All non-expired entries at export time
    pub entries: Vec<SnapshotEntry>,
}
