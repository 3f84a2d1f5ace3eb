//! Caller identity types.
//!
//! The engine treats identities as opaque string keys supplied by an external
//! identity collaborator. Identity is always an explicit parameter on engine
//! operations, never ambient state.

use serde::{Deserialize, Serialize};

/// The stable identity of the caller of an engine operation.
///
/// `id` is the opaque key used as owner/assignee in storage predicates.
/// The display fields travel with outbound notifications only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
	/// Opaque stable identifier.
	pub id: String,
	/// Optional username for display.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Optional first name for display.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
}

impl Identity {
	/// Creates an identity from an opaque id with no display fields.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			username: None,
			first_name: None,
		}
	}
}
