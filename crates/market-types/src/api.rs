//! API error types for the marketplace HTTP boundary.
//!
//! This module defines the error envelope returned by the HTTP API and the
//! mapping from engine error kinds to HTTP status codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
	/// Validation failure, reported verbatim to the submitter (400).
	BadRequest { message: String },
	/// Missing or unusable caller identity (401).
	Unauthorized { message: String },
	/// A transition guard no longer holds or a conditional update lost its
	/// race; the caller should refresh before retrying (409).
	Conflict { message: String },
	/// The backing store could not be reached (502).
	UpstreamUnavailable { message: String },
	/// Anything else (500).
	InternalServerError { message: String },
}

impl ApiError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest { .. } => 400,
			ApiError::Unauthorized { .. } => 401,
			ApiError::Conflict { .. } => 409,
			ApiError::UpstreamUnavailable { .. } => 502,
			ApiError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		let (error, message) = match self {
			ApiError::BadRequest { message } => ("validation_failed", message),
			ApiError::Unauthorized { message } => ("unauthorized", message),
			ApiError::Conflict { message } => ("precondition_failed", message),
			ApiError::UpstreamUnavailable { message } => ("store_unavailable", message),
			ApiError::InternalServerError { message } => ("internal_error", message),
		};
		ErrorResponse {
			error: error.to_string(),
			message: message.clone(),
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest { message } => write!(f, "Bad Request: {}", message),
			ApiError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
			ApiError::Conflict { message } => write!(f, "Conflict: {}", message),
			ApiError::UpstreamUnavailable { message } => write!(f, "Bad Gateway: {}", message),
			ApiError::InternalServerError { message } => {
				write!(f, "Internal Server Error: {}", message)
			},
		}
	}
}

impl std::error::Error for ApiError {}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		let error_response = self.to_error_response();
		(status, Json(error_response)).into_response()
	}
}
