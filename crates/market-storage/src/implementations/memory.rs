//! In-memory storage backend for the marketplace engine.
//!
//! Stores orders and profiles in HashMaps behind a read-write lock. The
//! write guard makes predicate-check-then-patch indivisible, which is what
//! gives concurrent claim attempts their first-committed-wins arbitration.
//! Useful for tests and development; nothing survives a restart.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use market_types::{
	CapabilityProfile, ConfigSchema, ImplementationRegistry, Order, OrderPatch, OrderQuery,
	Schema, SchemaError, UpdateOutcome, UpdatePredicate,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
	orders: HashMap<String, Order>,
	profiles: HashMap<String, CapabilityProfile>,
}

/// In-memory storage implementation.
pub struct MemoryStorage {
	state: Arc<RwLock<MemoryState>>,
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance.
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(MemoryState::default())),
		}
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn insert_order(&self, order: &Order) -> Result<(), StorageError> {
		let mut state = self.state.write().await;
		if state.orders.contains_key(&order.id) {
			return Err(StorageError::Duplicate(order.id.clone()));
		}
		state.orders.insert(order.id.clone(), order.clone());
		Ok(())
	}

	async fn get_order(&self, id: &str) -> Result<Order, StorageError> {
		let state = self.state.read().await;
		state.orders.get(id).cloned().ok_or(StorageError::NotFound)
	}

	async fn conditional_update(
		&self,
		id: &str,
		predicate: &UpdatePredicate,
		patch: &OrderPatch,
	) -> Result<UpdateOutcome, StorageError> {
		// The write guard is held across check and patch, so no other
		// conditional update can interleave on the same record.
		let mut state = self.state.write().await;
		let order = state.orders.get_mut(id).ok_or(StorageError::NotFound)?;

		if !predicate.matches(order) {
			return Ok(UpdateOutcome { applied: false });
		}

		patch.apply(order);
		Ok(UpdateOutcome { applied: true })
	}

	async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, StorageError> {
		let state = self.state.read().await;
		let mut orders: Vec<Order> = state
			.orders
			.values()
			.filter(|order| query.matches(order))
			.cloned()
			.collect();
		orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(orders)
	}

	async fn upsert_profile(&self, profile: &CapabilityProfile) -> Result<(), StorageError> {
		let mut state = self.state.write().await;
		state
			.profiles
			.insert(profile.owner_id.clone(), profile.clone());
		Ok(())
	}

	async fn get_profile(
		&self,
		owner_id: &str,
	) -> Result<Option<CapabilityProfile>, StorageError> {
		let state = self.state.read().await;
		Ok(state.profiles.get(owner_id).cloned())
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryStorageSchema)
	}
}

/// Configuration schema for MemoryStorage.
pub struct MemoryStorageSchema;

impl ConfigSchema for MemoryStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), SchemaError> {
		// Memory storage has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Registry for the memory storage implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = crate::StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl crate::StorageRegistry for Registry {}

/// Factory function to create a memory storage backend from configuration.
///
/// Configuration parameters:
/// - None required for memory storage
pub fn create_storage(_config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	Ok(Box::new(MemoryStorage::new()))
}
