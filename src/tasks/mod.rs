//! Background Tasks Module
//!
//! Periodic maintenance tasks for the service.

pub mod cleanup;

pub use cleanup::spawn_cleanup_task;
