//! HTTP webhook notification channel.
//!
//! Posts the order-created payload as JSON to a configured URL. The channel
//! reports transport and non-success responses as errors; the dispatch
//! layer decides what to do with them (it logs and moves on).

use crate::{NotifyError, NotifyInterface, OrderNotification};
use async_trait::async_trait;
use market_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, SchemaError};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Webhook notification implementation backed by reqwest.
pub struct WebhookNotifier {
	client: reqwest::Client,
	url: String,
}

impl WebhookNotifier {
	/// Creates a notifier posting to the given URL with the given timeout.
	pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| NotifyError::Configuration(e.to_string()))?;
		Ok(Self {
			client,
			url: url.into(),
		})
	}
}

#[async_trait]
impl NotifyInterface for WebhookNotifier {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(WebhookSchema)
	}

	async fn send(&self, notification: &OrderNotification) -> Result<(), NotifyError> {
		let response = self
			.client
			.post(&self.url)
			.json(notification)
			.send()
			.await
			.map_err(|e| NotifyError::Network(e.to_string()))?;

		if !response.status().is_success() {
			return Err(NotifyError::Rejected(response.status().as_u16()));
		}

		tracing::debug!(
			"Order {} notification delivered to {}",
			notification.order.id,
			self.url
		);
		Ok(())
	}
}

/// Configuration schema for the webhook channel.
pub struct WebhookSchema;

impl ConfigSchema for WebhookSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), SchemaError> {
		let schema = Schema::new(
			vec![Field::new("url", FieldType::String).with_validator(|value| {
				let url = value.as_str().unwrap_or_default();
				if url.starts_with("http://") || url.starts_with("https://") {
					Ok(())
				} else {
					Err("must be an http(s) URL".to_string())
				}
			})],
			vec![Field::new(
				"timeout_seconds",
				FieldType::Integer {
					min: Some(1),
					max: Some(300),
				},
			)],
		);
		schema.validate(config)
	}
}

/// Registry for the webhook notification implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "webhook";
	type Factory = crate::NotifyFactory;

	fn factory() -> Self::Factory {
		create_notifier
	}
}

impl crate::NotifyRegistry for Registry {}

/// Factory function to create a webhook channel from configuration.
///
/// Configuration parameters:
/// - `url`: the collaborator endpoint to POST order payloads to
/// - `timeout_seconds` (optional): request timeout, default 10
pub fn create_notifier(config: &toml::Value) -> Result<Box<dyn NotifyInterface>, NotifyError> {
	WebhookSchema
		.validate(config)
		.map_err(|e| NotifyError::Configuration(e.to_string()))?;

	let url = config
		.get("url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| NotifyError::Configuration("Missing 'url'".to_string()))?;
	let timeout_seconds = config
		.get("timeout_seconds")
		.and_then(|v| v.as_integer())
		.map(|seconds| seconds as u64)
		.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

	Ok(Box::new(WebhookNotifier::new(
		url,
		Duration::from_secs(timeout_seconds),
	)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn factory_accepts_valid_config() {
		let config: toml::Value =
			toml::from_str("url = \"https://example.org/hook\"\ntimeout_seconds = 5").unwrap();
		assert!(create_notifier(&config).is_ok());
	}

	#[test]
	fn factory_rejects_non_http_url() {
		let config: toml::Value = toml::from_str("url = \"example.org/hook\"").unwrap();
		assert!(matches!(
			create_notifier(&config),
			Err(NotifyError::Configuration(_))
		));
	}

	#[test]
	fn factory_rejects_missing_url() {
		let config: toml::Value = toml::from_str("timeout_seconds = 5").unwrap();
		assert!(matches!(
			create_notifier(&config),
			Err(NotifyError::Configuration(_))
		));
	}
}
