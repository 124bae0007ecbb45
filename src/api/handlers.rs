//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Duration;
use tokio::sync::RwLock;

use crate::cache::{CacheDomain, CacheSnapshot, CacheStore, StatsSnapshot};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    CleanupResponse, ClearResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse,
    ImportResponse, IncrementRequest, QuotaCheckRequest, QuotaCheckResponse, SetRequest,
    SetResponse, TierUpdateRequest,
};
use crate::quota::{GenerationPlan, MemoryQuotaStore, QuotaLedger, QuotaRecord, UsageStats};

/// Application state shared across all handlers.
///
/// The cache is wrapped in Arc<RwLock<>> for thread-safe access; the ledger
/// carries its own shared store handle and is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
    /// Quota ledger over the durable record store
    pub quota: QuotaLedger,
}

impl AppState {
    /// Creates a new AppState from an already-built store and ledger.
    pub fn new(cache: CacheStore, quota: QuotaLedger) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            quota,
        }
    }

    /// Creates a new AppState from configuration, with the in-memory quota
    /// store. Fails if the TTL table does not validate.
    pub fn from_config(config: &Config) -> std::result::Result<Self, crate::cache::InvalidTtl> {
        let cache = CacheStore::new(config.max_entries, config.ttl_table()?);
        let quota = QuotaLedger::new(Arc::new(MemoryQuotaStore::new()));
        Ok(Self::new(cache, quota))
    }
}

// == Cache Handlers ==

/// Handler for PUT /cache/set
///
/// Stores a value with an optional TTL override and domain tag. An unknown
/// domain string is a 400, never a silent fallback to the default TTL.
pub async fn cache_set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let domain = match req.domain.as_deref() {
        Some(tag) => Some(
            tag.parse::<CacheDomain>()
                .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?,
        ),
        None => None,
    };
    let ttl = req.ttl_ms.map(|ms| Duration::milliseconds(ms as i64));

    let mut cache = state.cache.write().await;
    let stored = cache.set(&req.key, req.value, ttl, domain);

    Ok(Json(SetResponse::new(req.key, stored)))
}

/// Handler for GET /cache/get/:key
///
/// Retrieves a value from the cache by key; absent and expired entries are
/// both a 404.
pub async fn cache_get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a hit updates access metadata, a miss may remove an
    // expired entry.
    let mut cache = state.cache.write().await;
    match cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(ServiceError::NotFound(key)),
    }
}

/// Handler for GET /cache/has/:key
pub async fn cache_has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let mut cache = state.cache.write().await;
    let present = cache.has(&key);
    Json(HasResponse { key, present })
}

/// Handler for DELETE /cache/del/:key
pub async fn cache_delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let mut cache = state.cache.write().await;
    let deleted = cache.delete(&key);
    Json(DeleteResponse { key, deleted })
}

/// Handler for POST /cache/clear
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear();
    Json(ClearResponse::new())
}

/// Handler for POST /cache/cleanup
pub async fn cache_cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.cleanup();
    Json(CleanupResponse { removed })
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for GET /cache/export
pub async fn cache_export_handler(State(state): State<AppState>) -> Json<CacheSnapshot> {
    let cache = state.cache.read().await;
    Json(cache.export())
}

/// Handler for POST /cache/import
pub async fn cache_import_handler(
    State(state): State<AppState>,
    Json(snapshot): Json<CacheSnapshot>,
) -> Json<ImportResponse> {
    let mut cache = state.cache.write().await;
    let imported = cache.import(snapshot);
    Json(ImportResponse { imported })
}

// == Quota Handlers ==

/// Handler for GET /quota/:user_id
///
/// Returns the user's quota record, creating a FREE-tier zeroed record on
/// first access.
pub async fn quota_get_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<QuotaRecord>> {
    let record = state.quota.get_user_quota(&user_id).await?;
    Ok(Json(record))
}

/// Handler for GET /quota/:user_id/usage
pub async fn quota_usage_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UsageStats>> {
    let stats = state.quota.get_usage_stats(&user_id).await?;
    Ok(Json(stats))
}

/// Handler for POST /quota/check
///
/// Returns the quota decision plus the partial-fulfillment plan; a
/// shortfall always carries an explicit notice.
pub async fn quota_check_handler(
    State(state): State<AppState>,
    Json(req): Json<QuotaCheckRequest>,
) -> Result<Json<QuotaCheckResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let decision = state
        .quota
        .can_generate_listings(&req.user_id, req.requested)
        .await;
    let plan = GenerationPlan::from_decision(req.requested, &decision);

    Ok(Json(QuotaCheckResponse::new(decision, &plan)))
}

/// Handler for POST /quota/increment
///
/// Commits generated listings. Store failures propagate as errors here,
/// unlike the check path, since under-counting usage must not pass silently.
pub async fn quota_increment_handler(
    State(state): State<AppState>,
    Json(req): Json<IncrementRequest>,
) -> Result<Json<QuotaRecord>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let record = state
        .quota
        .increment_listing_count(&req.user_id, req.count)
        .await?;
    Ok(Json(record))
}

/// Handler for PUT /quota/:user_id/tier
pub async fn quota_tier_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<TierUpdateRequest>,
) -> Result<Json<QuotaRecord>> {
    let record = state
        .quota
        .update_subscription_tier(&user_id, &req.tier)
        .await?;
    Ok(Json(record))
}

// == Health ==

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
