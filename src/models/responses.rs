//! Response DTOs for the service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::quota::{GenerationPlan, QuotaDecision, SubscriptionTier};

/// Response body for the cache GET operation (GET /cache/get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the cache SET operation (PUT /cache/set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// The key that was set
    pub key: String,
    /// Whether the entry was stored (false on best-effort rejection)
    pub stored: bool,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, stored: bool) -> Self {
        Self {
            key: key.into(),
            stored,
        }
    }
}

/// Response body for the existence check (GET /cache/has/:key)
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    /// The requested key
    pub key: String,
    /// Whether a live entry exists
    pub present: bool,
}

/// Response body for the DELETE operation (DELETE /cache/del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// The key that was targeted
    pub key: String,
    /// Whether an entry was actually removed
    pub deleted: bool,
}

/// Response body for the clear operation (POST /cache/clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Confirmation message
    pub message: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the cleanup operation (POST /cache/cleanup)
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    /// Number of expired entries removed
    pub removed: usize,
}

/// Response body for the import operation (POST /cache/import)
#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    /// Number of entries restored
    pub imported: usize,
}

/// Response body for a quota check (POST /quota/check)
///
/// Carries the raw decision plus the partial-fulfillment plan so a
/// shortfall is always surfaced to the caller, never silently truncated.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaCheckResponse {
    /// Whether the full requested count fits
    pub allowed: bool,
    /// Remaining quota; -1 means unknown/unenforced (fail-open)
    pub remaining: i64,
    /// The tier's limit
    pub limit: u64,
    /// Whether the limit is lifetime-scoped
    pub is_lifetime: bool,
    /// The user's tier
    pub tier: SubscriptionTier,
    /// How many listings the caller should actually generate
    pub granted: u64,
    /// Human-readable shortfall notice when the plan is partial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl QuotaCheckResponse {
    /// Builds the response from a decision and its derived plan.
    pub fn new(decision: QuotaDecision, plan: &GenerationPlan) -> Self {
        Self {
            allowed: decision.allowed,
            remaining: decision.remaining,
            limit: decision.limit,
            is_lifetime: decision.is_lifetime,
            tier: decision.tier,
            granted: plan.granted(),
            notice: plan.shortfall_notice(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"a": 1}));
        let encoded = serde_json::to_string(&resp).unwrap();
        assert!(encoded.contains("test_key"));
        assert!(encoded.contains("\"a\":1"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key", true);
        let encoded = serde_json::to_string(&resp).unwrap();
        assert!(encoded.contains("my_key"));
        assert!(encoded.contains("true"));
    }

    #[test]
    fn test_quota_check_response_partial() {
        let decision = QuotaDecision {
            allowed: false,
            remaining: 3,
            limit: 10,
            is_lifetime: true,
            tier: SubscriptionTier::Free,
        };
        let plan = GenerationPlan::from_decision(10, &decision);
        let resp = QuotaCheckResponse::new(decision, &plan);

        assert!(!resp.allowed);
        assert_eq!(resp.granted, 3);
        assert!(resp.notice.unwrap().contains("3 of 10"));
    }

    #[test]
    fn test_quota_check_response_full_omits_notice() {
        let decision = QuotaDecision {
            allowed: true,
            remaining: 10,
            limit: 10,
            is_lifetime: true,
            tier: SubscriptionTier::Free,
        };
        let plan = GenerationPlan::from_decision(2, &decision);
        let resp = QuotaCheckResponse::new(decision, &plan);
        let encoded = serde_json::to_string(&resp).unwrap();

        assert!(!encoded.contains("notice"));
        assert!(encoded.contains("\"granted\":2"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let encoded = serde_json::to_string(&resp).unwrap();
        assert!(encoded.contains("healthy"));
        assert!(encoded.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let encoded = serde_json::to_string(&resp).unwrap();
        assert!(encoded.contains("error"));
        assert!(encoded.contains("Something went wrong"));
    }
}
