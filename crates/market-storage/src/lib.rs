//! Storage module for the marketplace engine.
//!
//! This module defines the backing-store contract consumed by the lifecycle
//! controller: order creation, reads, list queries, and the atomic
//! conditional update that serializes all lifecycle transitions. Backends
//! guarantee that predicate-check-then-patch is indivisible per record from
//! the perspective of other conditional updates on the same record.

use async_trait::async_trait;
use market_types::{
	CapabilityProfile, ConfigSchema, ImplementationRegistry, Order, OrderPatch, OrderQuery,
	UpdateOutcome, UpdatePredicate,
};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The requested record does not exist.
	#[error("Not found")]
	NotFound,
	/// A record with the same id already exists.
	#[error("Duplicate id: {0}")]
	Duplicate(String),
	/// Serialization or deserialization failed.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// The storage backend failed.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Configuration validation failed.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// The conditional update is the only way lifecycle state reaches disk or
/// memory: callers never read-then-blindly-write. A predicate that does not
/// hold at commit time leaves the record untouched and reports
/// `applied == false`.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Persists a newly created order. Fails on duplicate id.
	async fn insert_order(&self, order: &Order) -> Result<(), StorageError>;

	/// Retrieves an order by id.
	async fn get_order(&self, id: &str) -> Result<Order, StorageError>;

	/// Atomically applies `patch` to the order iff `predicate` holds against
	/// the record's state at commit time.
	async fn conditional_update(
		&self,
		id: &str,
		predicate: &UpdatePredicate,
		patch: &OrderPatch,
	) -> Result<UpdateOutcome, StorageError>;

	/// Lists orders matching the query, newest first.
	async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, StorageError>;

	/// Creates or replaces a worker's capability profile. Profiles are
	/// mutated only by their owner, so no conditional protocol is needed.
	async fn upsert_profile(&self, profile: &CapabilityProfile) -> Result<(), StorageError>;

	/// Retrieves a worker's capability profile, if one exists.
	async fn get_profile(&self, owner_id: &str)
		-> Result<Option<CapabilityProfile>, StorageError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for storage factory functions.
///
/// This is the function signature that all storage implementations must
/// provide to create instances of their storage interface.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Registry trait for storage implementations.
pub trait StorageRegistry: ImplementationRegistry<Factory = StorageFactory> {}

/// Get all registered storage implementations.
///
/// Returns a vector of (name, factory) tuples for all available storage
/// implementations, used by the service to wire the configured backend.
pub fn get_all_implementations() -> Vec<(&'static str, StorageFactory)> {
	use implementations::{file, memory};

	vec![
		(file::Registry::NAME, file::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}
