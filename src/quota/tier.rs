//! Subscription Tier Module
//!
//! The fixed tier table: each tier carries a listing limit and whether that
//! limit is lifetime (never resets) or monthly (resets each calendar month).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// == Subscription Tier ==
/// Known subscription tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Trial tier: 10 listings, lifetime-capped
    Free,
    /// 1000 listings per month
    Standard,
    /// 5000 listings per month
    Growth,
}

// == Tier Policy ==
/// Limit semantics for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    /// Display name
    pub name: &'static str,
    /// Listing limit (lifetime or per-month depending on `is_lifetime`)
    pub limit: u64,
    /// True when the limit never resets
    pub is_lifetime: bool,
}

impl SubscriptionTier {
    /// The static limit table.
    pub const fn policy(self) -> TierPolicy {
        match self {
            SubscriptionTier::Free => TierPolicy {
                name: "free",
                limit: 10,
                is_lifetime: true,
            },
            SubscriptionTier::Standard => TierPolicy {
                name: "standard",
                limit: 1000,
                is_lifetime: false,
            },
            SubscriptionTier::Growth => TierPolicy {
                name: "growth",
                limit: 5000,
                is_lifetime: false,
            },
        }
    }

    /// Wire/display name of the tier.
    pub const fn as_str(self) -> &'static str {
        self.policy().name
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a tier name outside the known table.
///
/// Callers must never coerce an unknown tier to a default.
#[derive(Debug, Error)]
#[error("Invalid subscription tier: {0}")]
pub struct InvalidTier(pub String);

impl FromStr for SubscriptionTier {
    type Err = InvalidTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "standard" => Ok(SubscriptionTier::Standard),
            "growth" => Ok(SubscriptionTier::Growth),
            other => Err(InvalidTier(other.to_string())),
        }
    }
}
