//! HTTP server for the marketplace engine API.
//!
//! This module provides the HTTP surface through which an external UI
//! drives the engine. Caller identity travels in request headers and is
//! threaded explicitly into every engine call.

use axum::{
	routing::{get, post, put},
	Router,
};
use market_config::ApiConfig;
use market_lifecycle::LifecycleService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the lifecycle engine for processing requests.
	pub engine: Arc<LifecycleService>,
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for the engine endpoints.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<LifecycleService>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState { engine };

	// Build the router with /api base path
	let app = Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/orders", post(crate::apis::orders::create).get(crate::apis::orders::list))
				.route("/orders/{id}", put(crate::apis::orders::edit))
				.route("/orders/{id}/claim", post(crate::apis::orders::claim))
				.route("/orders/{id}/cancel", post(crate::apis::orders::cancel))
				.route("/orders/{id}/complete", post(crate::apis::orders::complete))
				.route(
					"/profile",
					get(crate::apis::profile::fetch).put(crate::apis::profile::save),
				),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(app_state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Marketplace API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}
