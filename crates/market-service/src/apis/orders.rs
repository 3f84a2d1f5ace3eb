//! Order endpoints.
//!
//! Create, edit and the three status transitions, plus the list views. The
//! transition endpoints return the refreshed order on success and 409 when
//! a guard no longer holds, so a stale client refreshes instead of
//! retrying blindly.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
};
use market_types::{ApiError, Order};
use market_validation::OrderForm;
use serde::Deserialize;

use crate::apis::{map_engine_error, Caller};
use crate::server::AppState;

/// Which slice of the order book to list.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
	/// Open orders the caller could claim, eligibility-filtered.
	#[default]
	Available,
	/// Orders the caller created, any status.
	Mine,
	/// Orders the caller has claimed and not yet completed.
	Claimed,
}

/// Query parameters for GET /api/orders.
#[derive(Debug, Deserialize)]
pub struct ListParams {
	#[serde(default)]
	pub view: View,
}

/// Handles POST /api/orders requests.
pub async fn create(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Json(form): Json<OrderForm>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
	let order = state
		.engine
		.create_order(&identity, &form)
		.await
		.map_err(map_engine_error)?;
	Ok((StatusCode::CREATED, Json(order)))
}

/// Handles GET /api/orders requests.
pub async fn list(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Query(params): Query<ListParams>,
) -> Result<Json<Vec<Order>>, ApiError> {
	let orders = match params.view {
		View::Available => state.engine.available_orders(&identity).await,
		View::Mine => state.engine.my_orders(&identity).await,
		View::Claimed => state.engine.claimed_orders(&identity).await,
	}
	.map_err(map_engine_error)?;
	Ok(Json(orders))
}

/// Handles PUT /api/orders/{id} requests.
pub async fn edit(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Path(id): Path<String>,
	Json(form): Json<OrderForm>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.edit_order(&identity, &id, &form)
		.await
		.map_err(map_engine_error)?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/claim requests.
pub async fn claim(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.claim_order(&identity, &id)
		.await
		.map_err(map_engine_error)?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/cancel requests.
pub async fn cancel(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.cancel_order(&identity, &id)
		.await
		.map_err(map_engine_error)?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/complete requests.
pub async fn complete(
	State(state): State<AppState>,
	Caller(identity): Caller,
	Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.complete_order(&identity, &id)
		.await
		.map_err(map_engine_error)?;
	Ok(Json(order))
}
