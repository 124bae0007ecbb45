//! Quota Record Module
//!
//! Per-user usage record: subscription tier, a lifetime counter that never
//! resets, and a monthly counter stamped with the month it applies to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quota::SubscriptionTier;

/// Formats the "YYYY-MM" month stamp for a point in time (UTC).
pub fn month_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

// == Quota Record ==
/// One usage record per external user id.
///
/// Invariant: `lifetime_used >= monthly_used`. For lifetime tiers only
/// `lifetime_used` is authoritative; for monthly tiers a stale
/// `current_month` means the monthly counter counts as zero until the next
/// commit restamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRecord {
    /// External identity string, opaque to this subsystem
    pub user_id: String,
    /// Current subscription tier
    pub tier: SubscriptionTier,
    /// All listings ever generated by this user; never reset
    pub lifetime_used: u64,
    /// Listings generated in `current_month`
    pub monthly_used: u64,
    /// "YYYY-MM" stamp the monthly counter applies to
    pub current_month: String,
}

impl QuotaRecord {
    // == Constructor ==
    /// Fresh FREE-tier record with zeroed counters.
    pub fn new(user_id: impl Into<String>, current_month: &str) -> Self {
        Self {
            user_id: user_id.into(),
            tier: SubscriptionTier::Free,
            lifetime_used: 0,
            monthly_used: 0,
            current_month: current_month.to_string(),
        }
    }

    // == Effective Monthly Usage ==
    /// The monthly counter as seen from `month`: zero when the record's
    /// stamp is stale.
    pub fn effective_monthly_used(&self, month: &str) -> u64 {
        if self.current_month == month {
            self.monthly_used
        } else {
            0
        }
    }

    // == Apply Usage ==
    /// Commits `count` generated listings against this record.
    ///
    /// Crossing a month boundary on a monthly tier sets the counter to
    /// `count` (not reset-then-add) and restamps the month. The lifetime
    /// counter accumulates unconditionally, every call, every tier.
    ///
    /// Counters saturate at `u64::MAX` rather than wrapping; any real usage
    /// is far past every limit long before that.
    pub fn apply_usage(&mut self, count: u64, month: &str) {
        let policy = self.tier.policy();
        if self.current_month != month && !policy.is_lifetime {
            self.monthly_used = count;
            self.current_month = month.to_string();
        } else {
            self.monthly_used = self.monthly_used.saturating_add(count);
        }
        self.lifetime_used = self.lifetime_used.saturating_add(count);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_stamp_format() {
        let now: DateTime<Utc> = "2024-02-15T08:30:00Z".parse().unwrap();
        assert_eq!(month_stamp(now), "2024-02");
    }

    #[test]
    fn test_new_record_defaults() {
        let record = QuotaRecord::new("u1", "2024-01");
        assert_eq!(record.user_id, "u1");
        assert_eq!(record.tier, SubscriptionTier::Free);
        assert_eq!(record.lifetime_used, 0);
        assert_eq!(record.monthly_used, 0);
        assert_eq!(record.current_month, "2024-01");
    }

    #[test]
    fn test_apply_usage_same_month() {
        let mut record = QuotaRecord::new("u1", "2024-01");
        record.tier = SubscriptionTier::Standard;

        record.apply_usage(3, "2024-01");
        record.apply_usage(2, "2024-01");

        assert_eq!(record.monthly_used, 5);
        assert_eq!(record.lifetime_used, 5);
        assert_eq!(record.current_month, "2024-01");
    }

    #[test]
    fn test_apply_usage_month_rollover_sets_not_adds() {
        let mut record = QuotaRecord::new("u1", "2024-01");
        record.tier = SubscriptionTier::Standard;
        record.monthly_used = 999;
        record.lifetime_used = 999;

        record.apply_usage(5, "2024-02");

        // Set to the new usage, not 999 + 5 and not 0 + add later.
        assert_eq!(record.monthly_used, 5);
        assert_eq!(record.current_month, "2024-02");
        assert_eq!(record.lifetime_used, 1004);
    }

    #[test]
    fn test_lifetime_tier_skips_rollover() {
        let mut record = QuotaRecord::new("u1", "2024-01");
        record.monthly_used = 4;
        record.lifetime_used = 4;

        // FREE is lifetime-capped: month change does not restamp or reset.
        record.apply_usage(2, "2024-02");

        assert_eq!(record.monthly_used, 6);
        assert_eq!(record.current_month, "2024-01");
        assert_eq!(record.lifetime_used, 6);
    }

    #[test]
    fn test_effective_monthly_used() {
        let mut record = QuotaRecord::new("u1", "2024-01");
        record.monthly_used = 7;

        assert_eq!(record.effective_monthly_used("2024-01"), 7);
        assert_eq!(record.effective_monthly_used("2024-02"), 0);
    }

    #[test]
    fn test_apply_usage_saturates_instead_of_wrapping() {
        let mut record = QuotaRecord::new("u1", "2024-01");
        record.tier = SubscriptionTier::Standard;

        record.apply_usage(u64::MAX, "2024-01");
        record.apply_usage(1, "2024-01");

        // Counters pin at the ceiling rather than wrapping to zero.
        assert_eq!(record.lifetime_used, u64::MAX);
        assert_eq!(record.monthly_used, u64::MAX);
    }

    #[test]
    fn test_lifetime_never_below_monthly() {
        let mut record = QuotaRecord::new("u1", "2024-01");
        record.tier = SubscriptionTier::Standard;

        record.apply_usage(10, "2024-01");
        record.apply_usage(3, "2024-02");
        record.apply_usage(1, "2024-02");

        assert!(record.lifetime_used >= record.monthly_used);
        assert_eq!(record.lifetime_used, 14);
        assert_eq!(record.monthly_used, 4);
    }
}
