//! Cache Module
//!
//! Process-local caching with per-domain TTL expiration and bulk
//! least-recently-accessed eviction.

mod domain;
mod entry;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use domain::{
    api_response_key, categories_key, category_fields_key, ebay_categories_key,
    ebay_policies_key, user_session_key, CacheDomain, InvalidTtl, TtlTable, UnknownDomain,
};
pub use entry::CacheEntry;
pub use snapshot::{CacheSnapshot, SnapshotEntry};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
