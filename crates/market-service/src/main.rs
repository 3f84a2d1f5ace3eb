//! Main entry point for the marketplace engine service.
//!
//! This binary wires together a storage backend, the outbound notification
//! channels and the lifecycle controller, then serves the engine over HTTP.
//! Backends and channels are pluggable: which ones run is decided entirely
//! by the configuration file.

use clap::Parser;
use market_config::Config;
use market_lifecycle::LifecycleService;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the marketplace service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the marketplace service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the lifecycle engine from the configured implementations
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started marketplace service");

	// Load configuration
	let config = Config::from_file_async(&args.config).await?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	// Build the lifecycle engine from the configured implementations
	let engine = build_engine(&config)?;
	let engine = Arc::new(engine);

	let api_config = config.api.clone().unwrap_or_default();
	if !api_config.enabled {
		tracing::warn!("API server disabled in configuration, nothing to serve");
		return Ok(());
	}

	server::start_server(api_config, engine).await?;

	tracing::info!("Stopped marketplace service");
	Ok(())
}

/// Builds the lifecycle engine with all necessary implementations.
///
/// The storage backend is picked by `storage.primary` and constructed by
/// the matching registered factory; each configured notification channel is
/// constructed the same way. Factories validate their own configuration
/// sections against their schemas.
fn build_engine(config: &Config) -> Result<LifecycleService, Box<dyn std::error::Error>> {
	// Storage backend
	let storage_factories: std::collections::HashMap<_, _> =
		market_storage::get_all_implementations().into_iter().collect();
	let factory = storage_factories
		.get(config.storage.primary.as_str())
		.ok_or_else(|| format!("Unknown storage backend '{}'", config.storage.primary))?;
	let backend_config = config
		.storage
		.implementations
		.get(&config.storage.primary)
		.ok_or_else(|| {
			format!(
				"Missing configuration for storage backend '{}'",
				config.storage.primary
			)
		})?;
	let storage = factory(backend_config)?;
	tracing::info!("Using '{}' storage backend", config.storage.primary);

	// Notification channels
	let notify_factories: std::collections::HashMap<_, _> =
		market_notify::get_all_implementations().into_iter().collect();
	let mut channels = Vec::new();
	for (name, channel_config) in &config.notify.implementations {
		let factory = notify_factories
			.get(name.as_str())
			.ok_or_else(|| format!("Unknown notification channel '{}'", name))?;
		channels.push(factory(channel_config)?);
		tracing::info!("Registered '{}' notification channel", name);
	}
	let notify = if channels.is_empty() {
		market_notify::NotifyService::disabled()
	} else {
		market_notify::NotifyService::new(channels)
	};

	Ok(LifecycleService::new(Arc::from(storage), Arc::new(notify)))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_config(raw: &str) -> Config {
		Config::from_toml_str(raw).expect("config should parse")
	}

	#[test]
	fn args_default_values() {
		let args = Args {
			config: PathBuf::from("config.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn builds_engine_with_memory_backend() {
		let config = test_config(
			r#"
[service]
id = "test-market"

[storage]
primary = "memory"

[storage.implementations.memory]
"#,
		);

		assert!(build_engine(&config).is_ok());
	}

	#[test]
	fn builds_engine_with_webhook_channel() {
		let config = test_config(
			r#"
[service]
id = "test-market"

[storage]
primary = "memory"

[storage.implementations.memory]

[notify.implementations.webhook]
url = "https://example.org/hook"
"#,
		);

		assert!(build_engine(&config).is_ok());
	}

	#[test]
	fn builds_engine_with_file_backend() {
		let dir = tempfile::tempdir().expect("temp dir");
		let config = test_config(&format!(
			r#"
[service]
id = "test-market"

[storage]
primary = "file"

[storage.implementations.file]
path = "{}"
"#,
			dir.path().display()
		));

		assert!(build_engine(&config).is_ok());
	}

	#[test]
	fn rejects_unknown_notification_channel() {
		let config = test_config(
			r#"
[service]
id = "test-market"

[storage]
primary = "memory"

[storage.implementations.memory]

[notify.implementations.carrier_pigeon]
"#,
		);

		assert!(build_engine(&config).is_err());
	}

	#[test]
	fn rejects_invalid_backend_config() {
		// The file backend requires a path.
		let config = test_config(
			r#"
[service]
id = "test-market"

[storage]
primary = "file"

[storage.implementations.file]
"#,
		);

		assert!(build_engine(&config).is_err());
	}
}
