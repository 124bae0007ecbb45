//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and
//! access-tracking metadata.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::cache::CacheDomain;

// == Cache Entry ==
/// A single cache entry: opaque JSON payload plus expiry and access metadata.
///
/// The payload is immutable per entry; a re-set under the same key replaces
/// the entry wholesale. Only `last_accessed` and `access_count` mutate on
/// reads.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, opaque to the cache
    pub value: Value,
    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
    /// Timestamp after which the entry is treated as absent
    pub expires_at: DateTime<Utc>,
    /// Timestamp of the most recent successful read
    pub last_accessed: DateTime<Utc>,
    /// Number of hits against this entry
    pub access_count: u64,
    /// Domain tag the entry was stored under, if any
    pub domain: Option<CacheDomain>,
    /// Serialized size estimate (key + payload), for stats
    pub estimated_bytes: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a fresh entry expiring `ttl` after `now`.
    ///
    /// Callers must pass a strictly positive `ttl` so that
    /// `expires_at > created_at` holds. Returns `None` when `now + ttl`
    /// overflows the representable timestamp range.
    pub fn new(
        value: Value,
        ttl: Duration,
        domain: Option<CacheDomain>,
        estimated_bytes: usize,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            value,
            created_at: now,
            expires_at,
            last_accessed: now,
            access_count: 0,
            domain,
            estimated_bytes,
        })
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// an entry is unreadable the instant its TTL has fully elapsed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Touch ==
    /// Records a hit: bumps the access counter and the last-accessed stamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed = now;
        self.access_count += 1;
    }

    // == Time To Live ==
    /// Remaining TTL at `now`, clamped at zero once expired.
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
