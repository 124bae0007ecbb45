//! Cache Statistics Module
//!
//! Tracks hit/miss/eviction counters and produces read-only snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Process-wide cache counters.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed retrievals (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted by the capacity policy
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Ratio ==
    /// hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Evictions ==
    /// Records a batch of evictions.
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    // == Reset ==
    /// Zeroes all counters; used by `clear`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Stats Snapshot ==
/// Read-only view of the store's state and counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Current number of entries
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Number of hits
    pub hits: u64,
    /// Number of misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// hits / (hits + misses), 0 when no requests yet
    pub hit_ratio: f64,
    /// Creation timestamp of the oldest live entry
    pub oldest_entry: Option<DateTime<Utc>>,
    /// Creation timestamp of the newest live entry
    pub newest_entry: Option<DateTime<Utc>>,
    /// Estimated memory footprint of live entries, in bytes
    pub estimated_bytes: usize,
}
