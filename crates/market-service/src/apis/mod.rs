//! HTTP API handlers for the marketplace engine.
//!
//! Handlers stay thin: they extract the caller identity from headers,
//! deserialize the payload and delegate to the lifecycle engine. All policy
//! lives behind the engine boundary.

use axum::{extract::FromRequestParts, http::request::Parts};
use market_lifecycle::LifecycleError;
use market_types::{ApiError, Identity};

pub mod orders;
pub mod profile;

/// The authenticated caller, extracted from request headers.
///
/// `x-user-id` is required; `x-user-name` and `x-user-first-name` are
/// optional display attributes forwarded to notification payloads. A
/// request without a usable id is rejected before any handler runs.
pub struct Caller(pub Identity);

impl<S> FromRequestParts<S> for Caller
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let header = |name: &str| {
			parts
				.headers
				.get(name)
				.and_then(|value| value.to_str().ok())
				.map(str::trim)
				.filter(|value| !value.is_empty())
				.map(str::to_string)
		};

		let id = header("x-user-id").ok_or_else(|| ApiError::Unauthorized {
			message: "Missing x-user-id header".to_string(),
		})?;

		Ok(Caller(Identity {
			id,
			username: header("x-user-name"),
			first_name: header("x-user-first-name"),
		}))
	}
}

/// Maps engine errors to their HTTP representation.
pub fn map_engine_error(err: LifecycleError) -> ApiError {
	match err {
		LifecycleError::ValidationFailed(_) | LifecycleError::ProfileIncomplete => {
			ApiError::BadRequest {
				message: err.to_string(),
			}
		},
		LifecycleError::PreconditionFailed => ApiError::Conflict {
			message: err.to_string(),
		},
		LifecycleError::StoreUnavailable(_) => ApiError::UpstreamUnavailable {
			message: err.to_string(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use market_validation::ValidationError;

	#[test]
	fn validation_failures_map_to_bad_request() {
		let err = map_engine_error(LifecycleError::ValidationFailed(
			ValidationError::InvalidAmount,
		));
		assert_eq!(err.status_code(), 400);

		let err = map_engine_error(LifecycleError::ProfileIncomplete);
		assert_eq!(err.status_code(), 400);
	}

	#[test]
	fn lost_races_map_to_conflict() {
		let err = map_engine_error(LifecycleError::PreconditionFailed);
		assert_eq!(err.status_code(), 409);
	}

	#[test]
	fn store_failures_map_to_bad_gateway() {
		let err = map_engine_error(LifecycleError::StoreUnavailable("io".to_string()));
		assert_eq!(err.status_code(), 502);
	}
}
