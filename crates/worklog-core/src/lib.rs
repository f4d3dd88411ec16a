//! Core types and trait definitions for the worklog tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod entity;
pub mod error;
pub mod store;
pub mod task;
pub mod work;

pub use entity::Entity;
pub use error::ValidationError;
