//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_cleanup_handler, cache_clear_handler, cache_delete_handler, cache_export_handler,
    cache_get_handler, cache_has_handler, cache_import_handler, cache_set_handler,
    cache_stats_handler, health_handler, quota_check_handler, quota_get_handler,
    quota_increment_handler, quota_tier_handler, quota_usage_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cache/set", put(cache_set_handler))
        .route("/cache/get/:key", get(cache_get_handler))
        .route("/cache/has/:key", get(cache_has_handler))
        .route("/cache/del/:key", delete(cache_delete_handler))
        .route("/cache/clear", post(cache_clear_handler))
        .route("/cache/cleanup", post(cache_cleanup_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/export", get(cache_export_handler))
        .route("/cache/import", post(cache_import_handler))
        .route("/quota/check", post(quota_check_handler))
        .route("/quota/increment", post(quota_increment_handler))
        .route("/quota/:user_id", get(quota_get_handler))
        .route("/quota/:user_id/usage", get(quota_usage_handler))
        .route("/quota/:user_id/tier", put(quota_tier_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
