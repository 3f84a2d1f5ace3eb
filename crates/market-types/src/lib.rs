//! Common types module for the marketplace engine.
//!
//! This module defines the core data types and structures shared across
//! the engine crates. It provides a centralized location for domain types
//! to ensure consistency across all components.

/// API error types for the HTTP boundary.
pub mod api;
/// Caller identity types.
pub mod identity;
/// Order types including the lifecycle status and classification tag.
pub mod order;
/// Worker capability profile types.
pub mod profile;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Configuration schema validation for implementation sections.
pub mod schema;
/// Storage predicate, patch and query types.
pub mod storage;

// Re-export all types for convenient access
pub use api::*;
pub use identity::*;
pub use order::*;
pub use profile::*;
pub use registry::*;
pub use schema::*;
pub use storage::*;
