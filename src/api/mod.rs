//! API Module
//!
//! HTTP handlers and routing for the service REST API.
//!
//! # Endpoints
//! - `PUT /cache/set` - Store a value
//! - `GET /cache/get/:key` - Retrieve a value by key
//! - `GET /cache/has/:key` - Existence check
//! - `DELETE /cache/del/:key` - Delete a key
//! - `POST /cache/clear` - Drop all entries and reset counters
//! - `POST /cache/cleanup` - Remove expired entries
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/export` - Export non-expired entries
//! - `POST /cache/import` - Restore entries from an export
//! - `GET /quota/:user_id` - Get (or create) a user's quota record
//! - `GET /quota/:user_id/usage` - Display-oriented usage stats
//! - `POST /quota/check` - Can N more listings be generated?
//! - `POST /quota/increment` - Commit N listings as used
//! - `PUT /quota/:user_id/tier` - Change subscription tier
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
