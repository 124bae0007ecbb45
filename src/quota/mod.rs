//! Quota Module
//!
//! Per-user listing-quota accounting: subscription tiers with lifetime or
//! monthly limits, month-rollover detection, and partial-fulfillment
//! planning, layered over a durable record store.

mod ledger;
mod record;
mod store;
mod tier;


// Re-export public types
pub use ledger::{GenerationPlan, QuotaDecision, QuotaError, QuotaLedger, UsageStats};
pub use record::{month_stamp, QuotaRecord};
pub use store::{MemoryQuotaStore, QuotaStore, QuotaStoreError};
pub use tier::{InvalidTier, SubscriptionTier, TierPolicy};
