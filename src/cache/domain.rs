//! Cache Domain Module
//!
//! Typed cache domains with a validated per-domain TTL table, plus the
//! deterministic key-formatting helpers used by the listing pipeline.
//! Domains are an explicit enum rather than free-form strings so a
//! misspelled domain is rejected at the boundary instead of silently
//! falling back to the default TTL.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// == Cache Domain ==
/// Named category of cached data, selecting the default TTL when a set
/// operation does not supply one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheDomain {
    /// Marketplace category lists
    Categories,
    /// Per-category item-specifics schemas
    CategoryFields,
    /// eBay business policies (payment/shipping/return)
    EbayPolicies,
    /// eBay category metadata lookups
    EbayCategories,
    /// Per-user session data
    UserSession,
    /// Generic memoized API responses
    ApiResponse,
}

impl CacheDomain {
    /// String tag used in snapshots and at the HTTP boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheDomain::Categories => "categories",
            CacheDomain::CategoryFields => "category_fields",
            CacheDomain::EbayPolicies => "ebay_policies",
            CacheDomain::EbayCategories => "ebay_categories",
            CacheDomain::UserSession => "user_session",
            CacheDomain::ApiResponse => "api_response",
        }
    }

    /// All known domains, in table order.
    pub fn all() -> [CacheDomain; 6] {
        [
            CacheDomain::Categories,
            CacheDomain::CategoryFields,
            CacheDomain::EbayPolicies,
            CacheDomain::EbayCategories,
            CacheDomain::UserSession,
            CacheDomain::ApiResponse,
        ]
    }
}

/// Error returned when a domain string does not name a known domain.
#[derive(Debug, Error)]
#[error("Unknown cache domain: {0}")]
pub struct UnknownDomain(pub String);

impl FromStr for CacheDomain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" => Ok(CacheDomain::Categories),
            "category_fields" => Ok(CacheDomain::CategoryFields),
            "ebay_policies" => Ok(CacheDomain::EbayPolicies),
            "ebay_categories" => Ok(CacheDomain::EbayCategories),
            "user_session" => Ok(CacheDomain::UserSession),
            "api_response" => Ok(CacheDomain::ApiResponse),
            other => Err(UnknownDomain(other.to_string())),
        }
    }
}

// == TTL Table ==
/// Error returned when a TTL table is constructed with a non-positive
/// duration.
#[derive(Debug, Error)]
#[error("Invalid TTL for {domain}: durations must be strictly positive")]
pub struct InvalidTtl {
    /// The offending domain, or "default" for the fallback TTL
    pub domain: String,
}

/// Per-domain default TTLs, validated at construction.
#[derive(Debug, Clone)]
pub struct TtlTable {
    ttls: HashMap<CacheDomain, Duration>,
    default_ttl: Duration,
}

impl TtlTable {
    /// Builds a table from an explicit domain->duration mapping.
    ///
    /// Every duration, including the default, must be strictly positive;
    /// configuration mistakes abort startup instead of degrading silently.
    pub fn new(
        ttls: HashMap<CacheDomain, Duration>,
        default_ttl: Duration,
    ) -> Result<Self, InvalidTtl> {
        if default_ttl <= Duration::zero() {
            return Err(InvalidTtl {
                domain: "default".to_string(),
            });
        }
        for (domain, ttl) in &ttls {
            if *ttl <= Duration::zero() {
                return Err(InvalidTtl {
                    domain: domain.as_str().to_string(),
                });
            }
        }
        Ok(Self { ttls, default_ttl })
    }

    /// The standard production table:
    /// categories 24h, category fields 12h, eBay policies 1h,
    /// eBay category metadata 24h, user sessions 30min, API responses 5min.
    pub fn standard(default_ttl: Duration) -> Result<Self, InvalidTtl> {
        let mut ttls = HashMap::new();
        ttls.insert(CacheDomain::Categories, Duration::hours(24));
        ttls.insert(CacheDomain::CategoryFields, Duration::hours(12));
        ttls.insert(CacheDomain::EbayPolicies, Duration::hours(1));
        ttls.insert(CacheDomain::EbayCategories, Duration::hours(24));
        ttls.insert(CacheDomain::UserSession, Duration::minutes(30));
        ttls.insert(CacheDomain::ApiResponse, Duration::minutes(5));
        Self::new(ttls, default_ttl)
    }

    /// Resolves the TTL for an optional domain tag.
    ///
    /// Entries stored without a domain, or with a domain missing from the
    /// table, use the default TTL.
    pub fn ttl_for(&self, domain: Option<CacheDomain>) -> Duration {
        domain
            .and_then(|d| self.ttls.get(&d).copied())
            .unwrap_or(self.default_ttl)
    }

    /// The fallback TTL for undomained entries.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

// == Key Formatting ==
// Deterministic key builders. Each domain owns a distinct prefix so keys
// from different domains can never collide.

/// Key for a marketplace's category list.
pub fn categories_key(marketplace: &str) -> String {
    format!("categories_{}", marketplace)
}

/// Key for a category's item-specifics schema.
pub fn category_fields_key(category: &str, subcategory: &str) -> String {
    format!("category_fields_{}_{}", category, subcategory)
}

/// Key for a user's business policies on a marketplace.
pub fn ebay_policies_key(user_id: &str, marketplace: &str) -> String {
    format!("ebay_policies_{}_{}", user_id, marketplace)
}

/// Key for an eBay category metadata lookup.
pub fn ebay_categories_key(query: &str) -> String {
    format!("ebay_categories_{}", query)
}

/// Key for a user's session data.
pub fn user_session_key(user_id: &str) -> String {
    format!("user_session_{}", user_id)
}

/// Key for a memoized API response.
pub fn api_response_key(endpoint: &str, params: &str) -> String {
    format!("api_response_{}_{}", endpoint, params)
}
