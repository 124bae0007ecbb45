//! listforge - caching and listing-quota service
//!
//! Two engines behind one HTTP surface: a process-local cache with typed
//! domains, TTL expiration and bounded-size eviction, and a per-user
//! listing-quota ledger with lifetime/monthly tier semantics over a durable
//! record store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod quota;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use quota::{MemoryQuotaStore, QuotaLedger};
pub use tasks::spawn_cleanup_task;
