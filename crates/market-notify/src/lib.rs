//! Outbound notification module for the marketplace engine.
//!
//! When an order is created, its payload plus the submitter's identity is
//! posted to an external collaborator (a webhook). Dispatch is best-effort:
//! failures are logged and swallowed, and never roll back or fail the
//! already-committed creation.

use async_trait::async_trait;
use market_types::{ConfigSchema, Identity, ImplementationRegistry, Order};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod webhook;
}

/// Errors that can occur during notification delivery.
///
/// These never cross the engine boundary; the dispatch path logs them.
#[derive(Debug, Error)]
pub enum NotifyError {
	/// Network failure talking to the collaborator.
	#[error("Network error: {0}")]
	Network(String),
	/// The collaborator answered with a non-success status.
	#[error("Rejected with status {0}")]
	Rejected(u16),
	/// Configuration validation failed.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// The payload sent to the outbound collaborator: the created order plus
/// the submitter's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNotification {
	#[serde(flatten)]
	pub order: Order,
	pub submitter_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
}

impl OrderNotification {
	/// Builds the payload for a freshly created order.
	pub fn created(order: &Order, submitter: &Identity) -> Self {
		Self {
			order: order.clone(),
			submitter_id: submitter.id.clone(),
			username: submitter.username.clone(),
			first_name: submitter.first_name.clone(),
		}
	}
}

/// Trait defining the interface for notification channels.
#[async_trait]
pub trait NotifyInterface: Send + Sync {
	/// Returns the configuration schema for this notification implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Delivers one notification to the collaborator.
	async fn send(&self, notification: &OrderNotification) -> Result<(), NotifyError>;
}

/// Type alias for notification factory functions.
pub type NotifyFactory = fn(&toml::Value) -> Result<Box<dyn NotifyInterface>, NotifyError>;

/// Registry trait for notification implementations.
pub trait NotifyRegistry: ImplementationRegistry<Factory = NotifyFactory> {}

/// Get all registered notification implementations.
pub fn get_all_implementations() -> Vec<(&'static str, NotifyFactory)> {
	use implementations::webhook;

	vec![(webhook::Registry::NAME, webhook::Registry::factory())]
}

/// Service that dispatches notifications across the configured channels.
///
/// Every channel is attempted; a failing channel is logged and skipped.
/// The service exposes no failure to its caller.
pub struct NotifyService {
	channels: Vec<Box<dyn NotifyInterface>>,
}

impl NotifyService {
	/// Creates a new NotifyService with the given channels.
	pub fn new(channels: Vec<Box<dyn NotifyInterface>>) -> Self {
		Self { channels }
	}

	/// Creates a service with no channels; dispatch becomes a no-op.
	pub fn disabled() -> Self {
		Self {
			channels: Vec::new(),
		}
	}

	/// Dispatches an order-created notification, best-effort.
	pub async fn order_created(&self, order: &Order, submitter: &Identity) {
		let notification = OrderNotification::created(order, submitter);
		for channel in &self.channels {
			if let Err(e) = channel.send(&notification).await {
				tracing::warn!("Order {} notification failed: {}", order.id, e);
			}
		}
	}
}
