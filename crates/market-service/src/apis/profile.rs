//! Capability profile endpoints.
//!
//! GET creates an empty profile on first access so the UI always has a
//! record to edit; PUT replaces the caller's profile wholesale. The engine
//! refuses to write a profile whose owner is not the caller.

use axum::{extract::State, response::Json};
use market_types::{ApiError, CapabilityProfile};

use crate::apis::{map_engine_error, Caller};
use crate::server::AppState;

/// Handles GET /api/profile requests.
pub async fn fetch(
	State(state): State<AppState>,
	Caller(identity): Caller,
) -> Result<Json<CapabilityProfile>, ApiError> {
	let profile = state
		.engine
		.load_profile(&identity)
		.await
		.map_err(map_engine_error)?;
	Ok(Json(profile))
}

/// Handles PUT /api/profile requests.
pub async fn save(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Json(profile): Json<CapabilityProfile>,
) -> Result<Json<CapabilityProfile>, ApiError> {
	let profile = state
		.engine
		.save_profile(&identity, profile)
		.await
		.map_err(map_engine_error)?;
	Ok(Json(profile))
}
