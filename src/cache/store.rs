//! Cache Store Module
//!
//! Main cache engine: HashMap storage with lazy TTL expiration, bulk
//! least-recently-accessed eviction, and hit/miss statistics.
//!
//! This is a best-effort cache, not a source of truth: no operation panics
//! or propagates an error past its boundary. `set` reports failure as
//! `false`, reads report as misses.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{
    api_response_key, categories_key, category_fields_key, ebay_categories_key,
    ebay_policies_key, user_session_key, CacheDomain, CacheEntry, CacheSnapshot, CacheStats,
    SnapshotEntry, StatsSnapshot, TtlTable, MAX_KEY_LENGTH, MAX_VALUE_SIZE,
};

// == Cache Store ==
/// Key-value store with per-entry expiration and bounded size.
///
/// Eviction is two-phase: lazy expiry first (entries past their TTL provide
/// zero value), then a bulk sweep of the least-recently-accessed ~10% of
/// capacity. The bulk sweep amortizes the sort over many future insertions
/// instead of evicting one entry on every insert past capacity.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum number of live entries
    max_entries: usize,
    /// Per-domain default TTLs
    ttls: TtlTable,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL table.
    pub fn new(max_entries: usize, ttls: TtlTable) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            ttls,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any existing entry wholesale.
    ///
    /// TTL resolution: explicit `ttl_override` wins, otherwise the domain's
    /// table entry, otherwise the default TTL. Returns `false` instead of
    /// failing on an empty or oversized key, an oversized or unserializable
    /// value, or a TTL that is non-positive or far enough out to overflow
    /// the timestamp range.
    pub fn set(
        &mut self,
        key: &str,
        value: Value,
        ttl_override: Option<Duration>,
        domain: Option<CacheDomain>,
    ) -> bool {
        self.set_at(Utc::now(), key, value, ttl_override, domain)
    }

    /// Deterministic variant of [`set`](Self::set) with an injected clock.
    pub fn set_at(
        &mut self,
        now: DateTime<Utc>,
        key: &str,
        value: Value,
        ttl_override: Option<Duration>,
        domain: Option<CacheDomain>,
    ) -> bool {
        if key.is_empty() {
            warn!("cache set rejected: empty key");
            return false;
        }
        if key.len() > MAX_KEY_LENGTH {
            warn!(key_len = key.len(), "cache set rejected: key too long");
            return false;
        }

        // Size estimation doubles as the serializability check.
        let value_bytes = match serde_json::to_vec(&value) {
            Ok(bytes) => bytes.len(),
            Err(error) => {
                warn!(key, %error, "cache set rejected: value not serializable");
                return false;
            }
        };
        if value_bytes > MAX_VALUE_SIZE {
            warn!(key, value_bytes, "cache set rejected: value too large");
            return false;
        }

        let ttl = ttl_override.unwrap_or_else(|| self.ttls.ttl_for(domain));
        if ttl <= Duration::zero() {
            warn!(key, "cache set rejected: non-positive TTL");
            return false;
        }

        let entry = match CacheEntry::new(value, ttl, domain, key.len() + value_bytes, now) {
            Some(entry) => entry,
            None => {
                warn!(key, "cache set rejected: TTL overflows the timestamp range");
                return false;
            }
        };

        // Only a brand-new key can push the store past capacity.
        if !self.entries.contains_key(key) {
            self.ensure_capacity_at(now);
        }

        self.entries.insert(key.to_string(), entry);
        true
    }

    // == Capacity ==
    /// Frees headroom before an insert: lazy expiry first, then bulk
    /// eviction of the least-recently-accessed ~10% of capacity.
    fn ensure_capacity_at(&mut self, now: DateTime<Utc>) {
        if self.entries.len() < self.max_entries {
            return;
        }

        let expired = self.cleanup_at(now);
        if expired > 0 {
            debug!(expired, "capacity sweep removed expired entries");
        }
        if self.entries.len() < self.max_entries {
            return;
        }

        let batch = (self.max_entries / 10).max(1);
        let mut by_access: Vec<(String, DateTime<Utc>)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.last_accessed))
            .collect();
        by_access.sort_by_key(|(_, accessed)| *accessed);

        let mut evicted: u64 = 0;
        for (key, _) in by_access.into_iter().take(batch) {
            self.entries.remove(&key);
            evicted += 1;
        }
        self.stats.record_evictions(evicted);
        debug!(evicted, "evicted least-recently-accessed entries");
    }

    // == Get ==
    /// Retrieves a value, or `None` if absent or expired.
    ///
    /// An expired entry is removed as a side effect and counted as a miss.
    /// On a hit the entry's access metadata is updated.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_at(Utc::now(), key)
    }

    /// Deterministic variant of [`get`](Self::get) with an injected clock.
    pub fn get_at(&mut self, now: DateTime<Utc>, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touch(now);
        self.stats.record_hit();
        Some(entry.value.clone())
    }

    // == Has ==
    /// Checks whether a live entry exists for `key`.
    ///
    /// Stats-neutral: existence checks do not move the hit ratio and do not
    /// touch access metadata. An expired entry is still removed as a side
    /// effect.
    pub fn has(&mut self, key: &str) -> bool {
        self.has_at(Utc::now(), key)
    }

    /// Deterministic variant of [`has`](Self::has) with an injected clock.
    pub fn has_at(&mut self, now: DateTime<Utc>, key: &str) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => return false,
        };
        if expired {
            self.entries.remove(key);
            return false;
        }
        true
    }

    // == Delete ==
    /// Removes an entry; returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries and resets the hit/miss/eviction counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }

    // == Cleanup Expired ==
    /// Scans all entries once and removes the expired ones.
    ///
    /// Returns the count removed. Safe to call at any time; the periodic
    /// cleanup task and the insert-time capacity sweep both use it.
    pub fn cleanup(&mut self) -> usize {
        self.cleanup_at(Utc::now())
    }

    /// Deterministic variant of [`cleanup`](Self::cleanup) with an injected
    /// clock.
    pub fn cleanup_at(&mut self, now: DateTime<Utc>) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }
        count
    }

    // == Stats ==
    /// Read-only snapshot of the store's state and counters.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            size: self.entries.len(),
            max_size: self.max_entries,
            hits: self.stats.hits,
            misses: self.stats.misses,
            evictions: self.stats.evictions,
            hit_ratio: self.stats.hit_ratio(),
            oldest_entry: self.entries.values().map(|e| e.created_at).min(),
            newest_entry: self.entries.values().map(|e| e.created_at).max(),
            estimated_bytes: self.entries.values().map(|e| e.estimated_bytes).sum(),
        }
    }

    // == Export ==
    /// Serializes all non-expired entries to a transportable snapshot.
    pub fn export(&self) -> CacheSnapshot {
        self.export_at(Utc::now())
    }

    /// Deterministic variant of [`export`](Self::export) with an injected
    /// clock.
    pub fn export_at(&self, now: DateTime<Utc>) -> CacheSnapshot {
        let entries = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, entry)| SnapshotEntry {
                key: key.clone(),
                value: entry.value.clone(),
                created_at: entry.created_at,
                expires_at: entry.expires_at,
                domain: entry.domain,
                access_count: entry.access_count,
            })
            .collect();

        CacheSnapshot {
            exported_at: now,
            entries,
        }
    }

    // == Import ==
    /// Restores entries from a snapshot, skipping any whose `expires_at`
    /// has already passed. Returns the count restored.
    pub fn import(&mut self, snapshot: CacheSnapshot) -> usize {
        self.import_at(Utc::now(), snapshot)
    }

    /// Deterministic variant of [`import`](Self::import) with an injected
    /// clock.
    pub fn import_at(&mut self, now: DateTime<Utc>, snapshot: CacheSnapshot) -> usize {
        let mut imported = 0;
        for entry in snapshot.entries {
            if entry.expires_at <= now {
                continue;
            }
            if entry.key.is_empty() || entry.key.len() > MAX_KEY_LENGTH {
                warn!(key = %entry.key, "import skipped entry with invalid key");
                continue;
            }
            let value_bytes = match serde_json::to_vec(&entry.value) {
                Ok(bytes) => bytes.len(),
                Err(error) => {
                    warn!(key = %entry.key, %error, "import skipped unserializable entry");
                    continue;
                }
            };
            // Snapshots get the same value-size limit as live sets.
            if value_bytes > MAX_VALUE_SIZE {
                warn!(key = %entry.key, value_bytes, "import skipped oversized entry");
                continue;
            }

            if !self.entries.contains_key(&entry.key) {
                self.ensure_capacity_at(now);
            }
            let restored = CacheEntry {
                value: entry.value,
                created_at: entry.created_at,
                expires_at: entry.expires_at,
                last_accessed: now,
                access_count: entry.access_count,
                domain: entry.domain,
                estimated_bytes: entry.key.len() + value_bytes,
            };
            self.entries.insert(entry.key, restored);
            imported += 1;
        }
        imported
    }

    // == Length ==
    /// Current number of entries, including any not-yet-collected expired
    /// ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Domain Wrappers ==
    // Pure key-formatting over the primitives above; no independent state.

    /// Caches a marketplace's category list.
    pub fn set_categories(&mut self, marketplace: &str, value: Value) -> bool {
        let key = categories_key(marketplace);
        self.set(&key, value, None, Some(CacheDomain::Categories))
    }

    /// Looks up a cached category list.
    pub fn get_categories(&mut self, marketplace: &str) -> Option<Value> {
        let key = categories_key(marketplace);
        self.get(&key)
    }

    /// Caches a category's item-specifics schema.
    pub fn set_category_fields(&mut self, category: &str, subcategory: &str, value: Value) -> bool {
        let key = category_fields_key(category, subcategory);
        self.set(&key, value, None, Some(CacheDomain::CategoryFields))
    }

    /// Looks up a cached item-specifics schema.
    pub fn get_category_fields(&mut self, category: &str, subcategory: &str) -> Option<Value> {
        let key = category_fields_key(category, subcategory);
        self.get(&key)
    }

    /// Caches a user's business policies for a marketplace.
    pub fn set_ebay_policies(&mut self, user_id: &str, marketplace: &str, value: Value) -> bool {
        let key = ebay_policies_key(user_id, marketplace);
        self.set(&key, value, None, Some(CacheDomain::EbayPolicies))
    }

    /// Looks up cached business policies.
    pub fn get_ebay_policies(&mut self, user_id: &str, marketplace: &str) -> Option<Value> {
        let key = ebay_policies_key(user_id, marketplace);
        self.get(&key)
    }

    /// Caches an eBay category metadata lookup.
    pub fn set_ebay_categories(&mut self, query: &str, value: Value) -> bool {
        let key = ebay_categories_key(query);
        self.set(&key, value, None, Some(CacheDomain::EbayCategories))
    }

    /// Looks up cached eBay category metadata.
    pub fn get_ebay_categories(&mut self, query: &str) -> Option<Value> {
        let key = ebay_categories_key(query);
        self.get(&key)
    }

    /// Caches a user's session data.
    pub fn set_user_session(&mut self, user_id: &str, value: Value) -> bool {
        let key = user_session_key(user_id);
        self.set(&key, value, None, Some(CacheDomain::UserSession))
    }

    /// Looks up cached session data.
    pub fn get_user_session(&mut self, user_id: &str) -> Option<Value> {
        let key = user_session_key(user_id);
        self.get(&key)
    }

    /// Memoizes a generic API response.
    pub fn set_api_response(&mut self, endpoint: &str, params: &str, value: Value) -> bool {
        let key = api_response_key(endpoint, params);
        self.set(&key, value, None, Some(CacheDomain::ApiResponse))
    }

    /// Looks up a memoized API response.
    pub fn get_api_response(&mut self, endpoint: &str, params: &str) -> Option<Value> {
        let key = api_response_key(endpoint, params);
        self.get(&key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_MAX: usize = 100;

    fn test_store() -> CacheStore {
        CacheStore::new(TEST_MAX, TtlTable::standard(Duration::minutes(5)).unwrap())
    }

    fn fixed_now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let mut store = test_store();
        let now = fixed_now();

        assert!(store.set_at(now, "key1", json!("value1"), None, None));
        assert_eq!(store.get_at(now, "key1"), Some(json!("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let mut store = test_store();
        assert_eq!(store.get_at(fixed_now(), "missing"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_set_rejects_empty_key() {
        let mut store = test_store();
        assert!(!store.set_at(fixed_now(), "", json!(1), None, None));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_rejects_long_key() {
        let mut store = test_store();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(!store.set_at(fixed_now(), &long_key, json!(1), None, None));
    }

    #[test]
    fn test_set_rejects_large_value() {
        let mut store = test_store();
        let large = json!("x".repeat(MAX_VALUE_SIZE + 1));
        assert!(!store.set_at(fixed_now(), "key", large, None, None));
    }

    #[test]
    fn test_set_rejects_non_positive_ttl() {
        let mut store = test_store();
        assert!(!store.set_at(fixed_now(), "key", json!(1), Some(Duration::zero()), None));
        assert!(!store.set_at(fixed_now(), "key", json!(1), Some(Duration::seconds(-5)), None));
    }

    #[test]
    fn test_set_rejects_ttl_past_timestamp_range() {
        let mut store = test_store();

        // A TTL this large overflows now + ttl; it must report failure, not
        // panic.
        assert!(!store.set_at(
            fixed_now(),
            "key",
            json!(1),
            Some(Duration::milliseconds(i64::MAX)),
            None
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_expiration_removes_entry() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "key1", json!("v"), Some(Duration::seconds(10)), None);
        assert_eq!(store.get_at(now, "key1"), Some(json!("v")));

        // Past the TTL the entry behaves as absent and is removed.
        let later = now + Duration::seconds(10);
        assert_eq!(store.get_at(later, "key1"), None);
        assert_eq!(store.stats().size, 0);
    }

    #[test]
    fn test_default_ttl_by_domain() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "p", json!(1), None, Some(CacheDomain::EbayPolicies));

        // eBay policies expire in exactly one hour.
        let just_before = now + Duration::hours(1) - Duration::seconds(1);
        assert_eq!(store.get_at(just_before, "p"), Some(json!(1)));
        assert_eq!(store.get_at(now + Duration::hours(1), "p"), None);
    }

    #[test]
    fn test_no_domain_falls_back_to_default_ttl() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "g", json!(1), None, None);

        let just_before = now + Duration::minutes(5) - Duration::seconds(1);
        assert_eq!(store.get_at(just_before, "g"), Some(json!(1)));
        assert_eq!(store.get_at(now + Duration::minutes(5), "g"), None);
    }

    #[test]
    fn test_reset_replaces_wholesale() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "key1", json!("v1"), Some(Duration::seconds(10)), None);
        store.get_at(now, "key1");

        let later = now + Duration::seconds(5);
        store.set_at(later, "key1", json!("v2"), Some(Duration::seconds(10)), None);

        // Fresh entry: new value, new expiry window, zeroed access count.
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get_at(later + Duration::seconds(9), "key1"),
            Some(json!("v2"))
        );
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut store = CacheStore::new(10, TtlTable::standard(Duration::hours(1)).unwrap());
        let now = fixed_now();

        for i in 0..25 {
            let key = format!("key{}", i);
            assert!(store.set_at(now + Duration::seconds(i), &key, json!(i), None, None));
            assert!(store.len() <= 10);
        }
        assert!(store.stats().evictions > 0);
    }

    #[test]
    fn test_eviction_prefers_least_recently_accessed() {
        let mut store = CacheStore::new(10, TtlTable::standard(Duration::hours(1)).unwrap());
        let now = fixed_now();

        for i in 0..10 {
            let key = format!("key{}", i);
            store.set_at(now + Duration::seconds(i), &key, json!(i), None, None);
        }

        // key0 was inserted first but is now the most recently accessed.
        let touch_time = now + Duration::seconds(100);
        assert_eq!(store.get_at(touch_time, "key0"), Some(json!(0)));

        store.set_at(touch_time + Duration::seconds(1), "overflow", json!("x"), None, None);

        assert!(store.len() <= 10);
        assert!(store.has_at(touch_time + Duration::seconds(2), "key0"));
        // The eviction batch (max(1, 10/10) = 1) took the oldest-by-access key.
        assert!(!store.has_at(touch_time + Duration::seconds(2), "key1"));
    }

    #[test]
    fn test_insert_past_capacity_purges_expired_first() {
        let mut store = CacheStore::new(3, TtlTable::standard(Duration::hours(1)).unwrap());
        let now = fixed_now();

        store.set_at(now, "short", json!(1), Some(Duration::seconds(1)), None);
        store.set_at(now, "a", json!(2), None, None);
        store.set_at(now, "b", json!(3), None, None);

        // "short" has expired by insert time, so no live entry is evicted.
        let later = now + Duration::seconds(5);
        store.set_at(later, "c", json!(4), None, None);

        assert_eq!(store.stats().evictions, 0);
        assert!(store.has_at(later, "a"));
        assert!(store.has_at(later, "b"));
        assert!(store.has_at(later, "c"));
    }

    #[test]
    fn test_hit_miss_accounting() {
        let mut store = test_store();
        let now = fixed_now();

        assert_eq!(store.stats().hit_ratio, 0.0);

        store.set_at(now, "key1", json!(1), None, None);
        store.get_at(now, "key1");
        store.get_at(now, "missing");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_ratio, 0.5);
    }

    #[test]
    fn test_has_is_stats_neutral() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "key1", json!(1), None, None);
        assert!(store.has_at(now, "key1"));
        assert!(!store.has_at(now, "missing"));

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_has_removes_expired() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "key1", json!(1), Some(Duration::seconds(1)), None);
        assert!(!store.has_at(now + Duration::seconds(2), "key1"));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_delete_returns_whether_removed() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "key1", json!(1), None, None);
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent_and_resets_counters() {
        let mut store = test_store();
        let now = fixed_now();

        // Clearing an empty store is fine.
        store.clear();

        store.set_at(now, "key1", json!(1), None, None);
        store.get_at(now, "key1");
        store.get_at(now, "missing");
        store.clear();

        let stats = store.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_ratio, 0.0);
    }

    #[test]
    fn test_cleanup_removes_only_expired() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "short", json!(1), Some(Duration::seconds(1)), None);
        store.set_at(now, "long", json!(2), Some(Duration::hours(1)), None);

        let removed = store.cleanup_at(now + Duration::seconds(2));
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.has_at(now + Duration::seconds(2), "long"));
    }

    #[test]
    fn test_stats_snapshot_bounds() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "a", json!(1), None, None);
        store.set_at(now + Duration::seconds(10), "b", json!(2), None, None);

        let stats = store.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.max_size, TEST_MAX);
        assert_eq!(stats.oldest_entry, Some(now));
        assert_eq!(stats.newest_entry, Some(now + Duration::seconds(10)));
        assert!(stats.estimated_bytes > 0);
    }

    #[test]
    fn test_export_skips_expired() {
        let mut store = test_store();
        let now = fixed_now();

        store.set_at(now, "live", json!(1), Some(Duration::hours(1)), None);
        store.set_at(now, "dead", json!(2), Some(Duration::seconds(1)), None);

        let snapshot = store.export_at(now + Duration::seconds(2));
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].key, "live");
    }

    #[test]
    fn test_import_restores_and_skips_expired() {
        let mut source = test_store();
        let now = fixed_now();

        source.set_at(now, "live", json!("keep"), Some(Duration::hours(1)), Some(CacheDomain::Categories));
        source.set_at(now, "dying", json!("drop"), Some(Duration::minutes(1)), None);
        source.get_at(now, "live");
        let snapshot = source.export_at(now);

        // By import time "dying" has expired.
        let mut target = test_store();
        let import_time = now + Duration::minutes(2);
        let imported = target.import_at(import_time, snapshot);

        assert_eq!(imported, 1);
        assert_eq!(target.get_at(import_time, "live"), Some(json!("keep")));
        assert_eq!(target.get_at(import_time, "dying"), None);
    }

    #[test]
    fn test_import_skips_oversized_values() {
        let mut store = test_store();
        let now = fixed_now();

        // A hand-built snapshot can carry values a live set would reject;
        // import applies the same size limit.
        let snapshot = CacheSnapshot {
            exported_at: now,
            entries: vec![
                SnapshotEntry {
                    key: "oversized".to_string(),
                    value: json!("x".repeat(MAX_VALUE_SIZE + 1)),
                    created_at: now,
                    expires_at: now + Duration::hours(1),
                    domain: None,
                    access_count: 0,
                },
                SnapshotEntry {
                    key: "fits".to_string(),
                    value: json!(1),
                    created_at: now,
                    expires_at: now + Duration::hours(1),
                    domain: None,
                    access_count: 0,
                },
            ],
        };

        let imported = store.import_at(now, snapshot);
        assert_eq!(imported, 1);
        assert!(!store.has_at(now, "oversized"));
        assert!(store.has_at(now, "fits"));
    }

    #[test]
    fn test_import_preserves_entry_metadata() {
        let mut source = test_store();
        let now = fixed_now();

        source.set_at(now, "k", json!(1), Some(Duration::hours(2)), Some(CacheDomain::UserSession));
        source.get_at(now, "k");
        let snapshot = source.export_at(now);

        let mut target = test_store();
        target.import_at(now + Duration::minutes(1), snapshot);

        // The imported entry keeps its original expiry window.
        assert_eq!(target.get_at(now + Duration::hours(2) - Duration::seconds(1), "k"), Some(json!(1)));
        assert_eq!(target.get_at(now + Duration::hours(2), "k"), None);
    }

    #[test]
    fn test_domain_wrappers_round_trip() {
        let mut store = test_store();

        assert!(store.set_categories("EBAY_US", json!(["a", "b"])));
        assert_eq!(store.get_categories("EBAY_US"), Some(json!(["a", "b"])));

        assert!(store.set_category_fields("clothing", "shirts", json!({"size": "M"})));
        assert_eq!(
            store.get_category_fields("clothing", "shirts"),
            Some(json!({"size": "M"}))
        );

        assert!(store.set_ebay_policies("u1", "EBAY_US", json!({"shipping": "flat"})));
        assert_eq!(
            store.get_ebay_policies("u1", "EBAY_US"),
            Some(json!({"shipping": "flat"}))
        );

        assert!(store.set_ebay_categories("cameras", json!(625)));
        assert_eq!(store.get_ebay_categories("cameras"), Some(json!(625)));

        assert!(store.set_user_session("u1", json!({"token": "t"})));
        assert_eq!(store.get_user_session("u1"), Some(json!({"token": "t"})));

        assert!(store.set_api_response("search", "q=lens", json!([1, 2])));
        assert_eq!(store.get_api_response("search", "q=lens"), Some(json!([1, 2])));
    }

    #[test]
    fn test_domain_wrappers_do_not_collide() {
        let mut store = test_store();

        store.set_user_session("x_y", json!(1));
        store.set_api_response("x", "y", json!(2));

        assert_eq!(store.get_user_session("x_y"), Some(json!(1)));
        assert_eq!(store.get_api_response("x", "y"), Some(json!(2)));
        assert_eq!(store.len(), 2);
    }
}
