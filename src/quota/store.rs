//! Quota Store Module
//!
//! Durable record store seam for quota records. The trait mirrors a keyed
//! record table addressed by user id; `commit_usage` is the atomic
//! conditional-update primitive, so the ledger never does read-modify-write
//! across the network and concurrent commits for one user cannot race.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::quota::QuotaRecord;

// == Store Error ==
/// Failures reaching or operating the durable store.
#[derive(Debug, Error)]
pub enum QuotaStoreError {
    /// The store could not be reached
    #[error("Quota store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the operation
    #[error("Quota store backend failure: {0}")]
    Backend(String),
}

// == Quota Store Trait ==
/// Keyed record table holding one [`QuotaRecord`] per user.
///
/// Any document or key-value store with conditional-update support can
/// implement this; every method is a network round-trip in production.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Loads a user's record, or `None` if the user has never been seen.
    async fn load(&self, user_id: &str) -> Result<Option<QuotaRecord>, QuotaStoreError>;

    /// Persists a record wholesale, creating or replacing it.
    async fn save(&self, record: &QuotaRecord) -> Result<(), QuotaStoreError>;

    /// Atomically commits `count` generated listings for `user_id` against
    /// the month stamp `month`, creating a fresh FREE-tier record when the
    /// user has none. Returns the record after the commit.
    ///
    /// Rollover semantics live in [`QuotaRecord::apply_usage`]; the store's
    /// job is to run them under its own concurrency control.
    async fn commit_usage(
        &self,
        user_id: &str,
        count: u64,
        month: &str,
    ) -> Result<QuotaRecord, QuotaStoreError>;
}

// == In-Memory Store ==
/// Process-local [`QuotaStore`] used by the standalone service and tests.
#[derive(Debug, Default)]
pub struct MemoryQuotaStore {
    records: Mutex<HashMap<String, QuotaRecord>>,
}

impl MemoryQuotaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record, for tests and local tooling.
    pub async fn seed(&self, record: QuotaRecord) {
        let mut records = self.records.lock().await;
        records.insert(record.user_id.clone(), record);
    }
}

#[async_trait]
impl QuotaStore for MemoryQuotaStore {
    async fn load(&self, user_id: &str) -> Result<Option<QuotaRecord>, QuotaStoreError> {
        let records = self.records.lock().await;
        Ok(records.get(user_id).cloned())
    }

    async fn save(&self, record: &QuotaRecord) -> Result<(), QuotaStoreError> {
        let mut records = self.records.lock().await;
        records.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn commit_usage(
        &self,
        user_id: &str,
        count: u64,
        month: &str,
    ) -> Result<QuotaRecord, QuotaStoreError> {
        let mut records = self.records.lock().await;
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| QuotaRecord::new(user_id, month));
        record.apply_usage(count, month);
        Ok(record.clone())
    }
}
