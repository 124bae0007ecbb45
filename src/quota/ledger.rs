//! Quota Ledger Module
//!
//! Tiered quota checks and commits over a durable [`QuotaStore`].
//!
//! The read/check path is defensive: a store failure fails open (the user is
//! allowed to proceed, with a sentinel marking the decision as unenforced)
//! because blocking a paying user over a transient backend hiccup costs more
//! than a slight overshoot of a soft limit. The write path is precise: a
//! failed commit propagates so the caller can retry or log the discrepancy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::quota::{
    month_stamp, InvalidTier, QuotaRecord, QuotaStore, QuotaStoreError, SubscriptionTier,
};

// == Quota Error ==
/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// Tier name outside the known table
    #[error(transparent)]
    InvalidTier(#[from] InvalidTier),

    /// Durable store failure
    #[error(transparent)]
    Store(#[from] QuotaStoreError),
}

// == Quota Decision ==
/// Outcome of a quota check.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaDecision {
    /// Whether the full requested count fits in the remaining quota
    pub allowed: bool,
    /// Listings still available; `-1` is the fail-open sentinel meaning
    /// "unknown/unenforced"
    pub remaining: i64,
    /// The tier's limit
    pub limit: u64,
    /// Whether the limit is lifetime-scoped
    pub is_lifetime: bool,
    /// The user's tier
    pub tier: SubscriptionTier,
}

impl QuotaDecision {
    /// Decision returned when the store cannot be reached: allow, with the
    /// sentinel marking every other field as unenforced placeholders.
    fn fail_open() -> Self {
        Self {
            allowed: true,
            remaining: -1,
            limit: 0,
            is_lifetime: false,
            tier: SubscriptionTier::Free,
        }
    }
}

// == Usage Stats ==
/// Display-oriented usage summary; never mutates counters.
#[derive(Debug, Clone, Serialize)]
pub struct UsageStats {
    /// The user's tier
    pub tier: SubscriptionTier,
    /// Usage counted against the limit (lifetime or effective-monthly)
    pub used: u64,
    /// Listings still available
    pub remaining: u64,
    /// The tier's limit
    pub limit: u64,
    /// used / limit, as a percentage capped at 100
    pub percentage_used: f64,
    /// Whether the limit is lifetime-scoped
    pub is_lifetime: bool,
    /// All listings ever generated, regardless of tier scope
    pub lifetime_total: u64,
}

// == Generation Plan ==
/// Caller-level partial-fulfillment policy over a [`QuotaDecision`].
///
/// A partial plan must be surfaced to the user ("N of M") before
/// proceeding; generation is never silently truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationPlan {
    /// The full request fits
    Full { granted: u64 },
    /// Only part of the request fits
    Partial { granted: u64, requested: u64 },
    /// Nothing remains
    Denied,
}

impl GenerationPlan {
    /// Derives the plan for a request of `requested` listings.
    pub fn from_decision(requested: u64, decision: &QuotaDecision) -> Self {
        if decision.allowed {
            GenerationPlan::Full { granted: requested }
        } else if decision.remaining > 0 {
            GenerationPlan::Partial {
                granted: decision.remaining as u64,
                requested,
            }
        } else {
            GenerationPlan::Denied
        }
    }

    /// How many listings to actually generate.
    pub fn granted(&self) -> u64 {
        match self {
            GenerationPlan::Full { granted } => *granted,
            GenerationPlan::Partial { granted, .. } => *granted,
            GenerationPlan::Denied => 0,
        }
    }

    /// User-facing shortfall notice for partial plans.
    pub fn shortfall_notice(&self) -> Option<String> {
        match self {
            GenerationPlan::Partial { granted, requested } => Some(format!(
                "Quota allows {} of {} requested listings",
                granted, requested
            )),
            _ => None,
        }
    }
}

// == Quota Ledger ==
/// Per-user quota accounting over a durable store.
#[derive(Clone)]
pub struct QuotaLedger {
    store: Arc<dyn QuotaStore>,
}

impl QuotaLedger {
    // == Constructor ==
    pub fn new(store: Arc<dyn QuotaStore>) -> Self {
        Self { store }
    }

    // == Get Or Create ==
    /// Loads the user's record, creating and persisting a FREE-tier zeroed
    /// record on first access.
    pub async fn get_user_quota(&self, user_id: &str) -> Result<QuotaRecord, QuotaError> {
        self.get_user_quota_at(Utc::now(), user_id).await
    }

    /// Deterministic variant of [`get_user_quota`](Self::get_user_quota).
    pub async fn get_user_quota_at(
        &self,
        now: DateTime<Utc>,
        user_id: &str,
    ) -> Result<QuotaRecord, QuotaError> {
        if let Some(record) = self.store.load(user_id).await? {
            return Ok(record);
        }
        let record = QuotaRecord::new(user_id, &month_stamp(now));
        self.store.save(&record).await?;
        debug!(user_id, "created quota record");
        Ok(record)
    }

    // == Check ==
    /// Can `requested` more listings be generated?
    ///
    /// Lifetime tiers check the lifetime counter against the limit; monthly
    /// tiers check the monthly counter, treating a stale month stamp as zero
    /// usage. Fails open on store errors.
    pub async fn can_generate_listings(&self, user_id: &str, requested: u64) -> QuotaDecision {
        self.can_generate_listings_at(Utc::now(), user_id, requested)
            .await
    }

    /// Deterministic variant of
    /// [`can_generate_listings`](Self::can_generate_listings).
    pub async fn can_generate_listings_at(
        &self,
        now: DateTime<Utc>,
        user_id: &str,
        requested: u64,
    ) -> QuotaDecision {
        match self.check_at(now, user_id, requested).await {
            Ok(decision) => decision,
            Err(error) => {
                warn!(user_id, %error, "quota check failed, failing open");
                QuotaDecision::fail_open()
            }
        }
    }

    async fn check_at(
        &self,
        now: DateTime<Utc>,
        user_id: &str,
        requested: u64,
    ) -> Result<QuotaDecision, QuotaError> {
        let record = self.get_user_quota_at(now, user_id).await?;
        let policy = record.tier.policy();

        let used = if policy.is_lifetime {
            record.lifetime_used
        } else {
            record.effective_monthly_used(&month_stamp(now))
        };
        let remaining = policy.limit as i64 - used as i64;

        Ok(QuotaDecision {
            allowed: remaining >= requested as i64,
            remaining: remaining.max(0),
            limit: policy.limit,
            is_lifetime: policy.is_lifetime,
            tier: record.tier,
        })
    }

    // == Increment ==
    /// Commits `count` generated listings. Delegates the rollover-aware
    /// update to the store's atomic primitive; errors propagate.
    pub async fn increment_listing_count(
        &self,
        user_id: &str,
        count: u64,
    ) -> Result<QuotaRecord, QuotaError> {
        self.increment_listing_count_at(Utc::now(), user_id, count)
            .await
    }

    /// Deterministic variant of
    /// [`increment_listing_count`](Self::increment_listing_count).
    pub async fn increment_listing_count_at(
        &self,
        now: DateTime<Utc>,
        user_id: &str,
        count: u64,
    ) -> Result<QuotaRecord, QuotaError> {
        let record = self
            .store
            .commit_usage(user_id, count, &month_stamp(now))
            .await?;
        debug!(
            user_id,
            count,
            lifetime_used = record.lifetime_used,
            monthly_used = record.monthly_used,
            "committed listing usage"
        );
        Ok(record)
    }

    // == Update Tier ==
    /// Moves the user to `tier_name`. Unknown names are an error, never
    /// coerced; counters are left untouched.
    pub async fn update_subscription_tier(
        &self,
        user_id: &str,
        tier_name: &str,
    ) -> Result<QuotaRecord, QuotaError> {
        self.update_subscription_tier_at(Utc::now(), user_id, tier_name)
            .await
    }

    /// Deterministic variant of
    /// [`update_subscription_tier`](Self::update_subscription_tier).
    pub async fn update_subscription_tier_at(
        &self,
        now: DateTime<Utc>,
        user_id: &str,
        tier_name: &str,
    ) -> Result<QuotaRecord, QuotaError> {
        let tier: SubscriptionTier = tier_name.parse()?;
        let mut record = self.get_user_quota_at(now, user_id).await?;
        record.tier = tier;
        self.store.save(&record).await?;
        debug!(user_id, tier = %tier, "updated subscription tier");
        Ok(record)
    }

    // == Usage Stats ==
    /// Display-only usage summary using the same rollover math as the check
    /// path. Read-only: never creates or mutates records; store errors
    /// propagate since failing closed here has no availability cost.
    pub async fn get_usage_stats(&self, user_id: &str) -> Result<UsageStats, QuotaError> {
        self.get_usage_stats_at(Utc::now(), user_id).await
    }

    /// Deterministic variant of [`get_usage_stats`](Self::get_usage_stats).
    pub async fn get_usage_stats_at(
        &self,
        now: DateTime<Utc>,
        user_id: &str,
    ) -> Result<UsageStats, QuotaError> {
        let record = self
            .store
            .load(user_id)
            .await?
            .unwrap_or_else(|| QuotaRecord::new(user_id, &month_stamp(now)));
        let policy = record.tier.policy();

        let used = if policy.is_lifetime {
            record.lifetime_used
        } else {
            record.effective_monthly_used(&month_stamp(now))
        };
        let remaining = policy.limit.saturating_sub(used);
        let percentage_used = if policy.limit == 0 {
            0.0
        } else {
            (used as f64 / policy.limit as f64 * 100.0).min(100.0)
        };

        Ok(UsageStats {
            tier: record.tier,
            used,
            remaining,
            limit: policy.limit,
            percentage_used,
            is_lifetime: policy.is_lifetime,
            lifetime_total: record.lifetime_used,
        })
    }
}
