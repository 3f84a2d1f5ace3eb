//! File-based storage backend for the marketplace engine.
//!
//! Persists each order and profile as a JSON document under a data
//! directory. A single in-process write lock serializes inserts and
//! conditional updates, so check-then-patch stays indivisible per record.
//! Writes go through a temp file and rename to stay crash-consistent.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use market_types::{
	CapabilityProfile, ConfigSchema, Field, FieldType, ImplementationRegistry, Order, OrderPatch,
	OrderQuery, Schema, SchemaError, UpdateOutcome, UpdatePredicate,
};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

const ORDERS_DIR: &str = "orders";
const PROFILES_DIR: &str = "profiles";

/// File-based storage implementation.
pub struct FileStorage {
	base_path: PathBuf,
	/// Held across every mutation; readers go straight to the filesystem.
	write_lock: Mutex<()>,
}

impl FileStorage {
	/// Creates a new FileStorage rooted at the given directory.
	pub fn new(base_path: impl Into<PathBuf>) -> Self {
		Self {
			base_path: base_path.into(),
			write_lock: Mutex::new(()),
		}
	}

	fn record_path(&self, dir: &str, id: &str) -> Result<PathBuf, StorageError> {
		// Ids are opaque keys; anything that could escape the data
		// directory is rejected outright.
		if id.is_empty() || id.contains(['/', '\\', '.']) {
			return Err(StorageError::Backend(format!("Invalid record id: {}", id)));
		}
		Ok(self.base_path.join(dir).join(format!("{}.json", id)))
	}

	async fn ensure_dirs(&self) -> Result<(), StorageError> {
		for dir in [ORDERS_DIR, PROFILES_DIR] {
			fs::create_dir_all(self.base_path.join(dir))
				.await
				.map_err(|e| StorageError::Backend(e.to_string()))?;
		}
		Ok(())
	}

	async fn read_order(&self, path: &Path) -> Result<Order, StorageError> {
		let bytes = fs::read(path).await.map_err(|e| match e.kind() {
			std::io::ErrorKind::NotFound => StorageError::NotFound,
			_ => StorageError::Backend(e.to_string()),
		})?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	async fn write_json<T: serde::Serialize>(
		&self,
		path: &Path,
		value: &T,
	) -> Result<(), StorageError> {
		let bytes = serde_json::to_vec_pretty(value)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;
		let tmp = path.with_extension("json.tmp");
		fs::write(&tmp, bytes)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		fs::rename(&tmp, path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))
	}
}

#[async_trait]
impl StorageInterface for FileStorage {
	async fn insert_order(&self, order: &Order) -> Result<(), StorageError> {
		let _guard = self.write_lock.lock().await;
		self.ensure_dirs().await?;
		let path = self.record_path(ORDERS_DIR, &order.id)?;
		if fs::try_exists(&path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?
		{
			return Err(StorageError::Duplicate(order.id.clone()));
		}
		self.write_json(&path, order).await
	}

	async fn get_order(&self, id: &str) -> Result<Order, StorageError> {
		let path = self.record_path(ORDERS_DIR, id)?;
		self.read_order(&path).await
	}

	async fn conditional_update(
		&self,
		id: &str,
		predicate: &UpdatePredicate,
		patch: &OrderPatch,
	) -> Result<UpdateOutcome, StorageError> {
		let _guard = self.write_lock.lock().await;
		let path = self.record_path(ORDERS_DIR, id)?;
		let mut order = self.read_order(&path).await?;

		if !predicate.matches(&order) {
			return Ok(UpdateOutcome { applied: false });
		}

		patch.apply(&mut order);
		self.write_json(&path, &order).await?;
		Ok(UpdateOutcome { applied: true })
	}

	async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, StorageError> {
		let dir = self.base_path.join(ORDERS_DIR);
		if !fs::try_exists(&dir)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?
		{
			return Ok(Vec::new());
		}

		let mut entries = fs::read_dir(&dir)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		let mut orders = Vec::new();
		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?
		{
			let path = entry.path();
			if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
				continue;
			}
			match self.read_order(&path).await {
				Ok(order) => {
					if query.matches(&order) {
						orders.push(order);
					}
				},
				Err(e) => {
					tracing::warn!("Skipping unreadable order file {:?}: {}", path, e);
				},
			}
		}

		orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(orders)
	}

	async fn upsert_profile(&self, profile: &CapabilityProfile) -> Result<(), StorageError> {
		let _guard = self.write_lock.lock().await;
		self.ensure_dirs().await?;
		let path = self.record_path(PROFILES_DIR, &profile.owner_id)?;
		self.write_json(&path, profile).await
	}

	async fn get_profile(
		&self,
		owner_id: &str,
	) -> Result<Option<CapabilityProfile>, StorageError> {
		let path = self.record_path(PROFILES_DIR, owner_id)?;
		let bytes = match fs::read(&path).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(StorageError::Backend(e.to_string())),
		};
		serde_json::from_slice(&bytes)
			.map(Some)
			.map_err(|e| StorageError::Serialization(e.to_string()))
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FileStorageSchema)
	}
}

/// Configuration schema for FileStorage.
pub struct FileStorageSchema;

impl ConfigSchema for FileStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), SchemaError> {
		let schema = Schema::new(vec![Field::new("path", FieldType::String)], vec![]);
		schema.validate(config)
	}
}

/// Registry for the file storage implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "file";
	type Factory = crate::StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl crate::StorageRegistry for Registry {}

/// Factory function to create a file storage backend from configuration.
///
/// Configuration parameters:
/// - `path`: directory to store order and profile documents under
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	FileStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;
	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.ok_or_else(|| StorageError::Configuration("Missing 'path'".to_string()))?;
	Ok(Box::new(FileStorage::new(path)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use market_types::{Classification, OrderRequest, OrderStatus};
	use rust_decimal::Decimal;

	fn order(id: &str) -> Order {
		Order::new(
			id,
			"client-1",
			OrderRequest {
				client_phone: "+79215550011".to_string(),
				client_address: "Лиговский пр., 50".to_string(),
				vehicle_year: 2018,
				amount: Decimal::new(12000, 0),
				commission: Decimal::new(3000, 0),
				comment: "Домофон 12".to_string(),
				district: "Центральный".to_string(),
				specialization: "Слесарь".to_string(),
				classification: Classification::RoadsideService("Эвакуация".to_string()),
			},
			Utc::now(),
		)
	}

	#[tokio::test]
	async fn order_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		storage.insert_order(&order("o-1")).await.unwrap();
		let loaded = storage.get_order("o-1").await.unwrap();
		assert_eq!(loaded.request.district, "Центральный");
		assert_eq!(
			loaded.request.classification,
			Classification::RoadsideService("Эвакуация".to_string())
		);

		assert!(matches!(
			storage.insert_order(&order("o-1")).await,
			Err(StorageError::Duplicate(_))
		));
	}

	#[tokio::test]
	async fn conditional_update_persists_patch() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());
		storage.insert_order(&order("o-1")).await.unwrap();

		let patch = OrderPatch {
			status: Some(OrderStatus::Cancelled),
			taken_by: Some(None),
			taken_at: Some(None),
			completed_at: Some(None),
			..Default::default()
		};
		let predicate =
			UpdatePredicate::status(OrderStatus::Available).with_created_by("client-1");

		let outcome = storage
			.conditional_update("o-1", &predicate, &patch)
			.await
			.unwrap();
		assert!(outcome.applied);

		let loaded = storage.get_order("o-1").await.unwrap();
		assert_eq!(loaded.status, OrderStatus::Cancelled);

		// Terminal state: the same predicate no longer holds.
		let outcome = storage
			.conditional_update("o-1", &predicate, &patch)
			.await
			.unwrap();
		assert!(!outcome.applied);
	}

	#[tokio::test]
	async fn query_on_empty_directory_is_empty() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());
		let orders = storage.query_orders(&OrderQuery::default()).await.unwrap();
		assert!(orders.is_empty());
	}

	#[tokio::test]
	async fn rejects_path_escaping_ids() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());
		let result = storage.get_order("../escape").await;
		assert!(matches!(result, Err(StorageError::Backend(_))));
	}

	#[tokio::test]
	async fn profile_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		let mut profile = CapabilityProfile::new("worker-1");
		profile.districts.push("Невский".to_string());
		storage.upsert_profile(&profile).await.unwrap();

		let loaded = storage.get_profile("worker-1").await.unwrap().unwrap();
		assert_eq!(loaded.districts, vec!["Невский".to_string()]);
		assert!(storage.get_profile("worker-2").await.unwrap().is_none());
	}
}
