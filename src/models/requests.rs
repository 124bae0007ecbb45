//! Request DTOs for the service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the cache SET operation (PUT /cache/set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Arbitrary JSON payload
/// - `ttl_ms`: Optional TTL override in milliseconds
/// - `domain`: Optional domain tag selecting the default TTL
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL override in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    /// Optional domain tag (e.g. "ebay_policies")
    #[serde(default)]
    pub domain: Option<String>,
}

impl SetRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl_ms == Some(0) {
            return Some("TTL must be greater than zero".to_string());
        }
        None
    }
}

/// Request body for a quota check (POST /quota/check)
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaCheckRequest {
    /// External user id
    pub user_id: String,
    /// Number of listings the caller wants to generate
    pub requested: u64,
}

impl QuotaCheckRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.user_id.is_empty() {
            return Some("user_id cannot be empty".to_string());
        }
        None
    }
}

/// Request body for a quota commit (POST /quota/increment)
#[derive(Debug, Clone, Deserialize)]
pub struct IncrementRequest {
    /// External user id
    pub user_id: String,
    /// Number of listings actually generated
    pub count: u64,
}

impl IncrementRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.user_id.is_empty() {
            return Some("user_id cannot be empty".to_string());
        }
        if self.count == 0 {
            return Some("count must be greater than zero".to_string());
        }
        None
    }
}

/// Request body for a tier change (PUT /quota/:user_id/tier)
#[derive(Debug, Clone, Deserialize)]
pub struct TierUpdateRequest {
    /// New tier name ("free", "standard", "growth")
    pub tier: String,
}
