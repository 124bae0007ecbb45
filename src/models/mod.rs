//! Request and Response models for the service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{IncrementRequest, QuotaCheckRequest, SetRequest, TierUpdateRequest};
pub use responses::{
    CleanupResponse, ClearResponse, DeleteResponse, ErrorResponse, GetResponse, HasResponse,
    HealthResponse, ImportResponse, QuotaCheckResponse, SetResponse,
};
