//! Order types for the marketplace engine.
//!
//! This module defines the order record, its lifecycle status and the
//! classification tag that determines which workers may see an order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an order in the marketplace.
///
/// Transitions between statuses are performed exclusively by the lifecycle
/// controller through conditional updates against the backing store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
	/// Order is open and can be claimed, edited or cancelled.
	Available,
	/// Order has been claimed by a worker and is being fulfilled.
	InProgress,
	/// Reserved status. No transition currently produces or consumes it.
	PendingPayment,
	/// Order has been fulfilled by its assignee. Terminal.
	Completed,
	/// Order has been cancelled by its owner. Terminal.
	Cancelled,
}

impl OrderStatus {
	/// Returns true for statuses with no outgoing transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Available => write!(f, "available"),
			OrderStatus::InProgress => write!(f, "in_progress"),
			OrderStatus::PendingPayment => write!(f, "pending_payment"),
			OrderStatus::Completed => write!(f, "completed"),
			OrderStatus::Cancelled => write!(f, "cancelled"),
		}
	}
}

/// The single active category describing the nature of an order.
///
/// Exactly one arm is populated, enforced at construction by the validation
/// pipeline. Brand and service arms carry one concrete catalog option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "choice", rename_all = "snake_case")]
pub enum Classification {
	/// A passenger car of the given brand.
	PassengerBrand(String),
	/// A truck of the given brand.
	TruckBrand(String),
	/// A locksmith job of the given service type.
	LocksmithService(String),
	/// Roadside assistance of the given service type.
	RoadsideService(String),
	/// Special-purpose vehicle work.
	SpecialVehicle,
	/// Motorcycle work.
	Motorcycle,
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Classification::PassengerBrand(brand) => write!(f, "passenger:{}", brand),
			Classification::TruckBrand(brand) => write!(f, "truck:{}", brand),
			Classification::LocksmithService(service) => write!(f, "locksmith:{}", service),
			Classification::RoadsideService(service) => write!(f, "roadside:{}", service),
			Classification::SpecialVehicle => write!(f, "special_vehicle"),
			Classification::Motorcycle => write!(f, "motorcycle"),
		}
	}
}

/// The validated, normalized request attributes of an order.
///
/// These fields are immutable after creation except through the
/// edit-while-available transition, which replaces them wholesale with a
/// freshly validated instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
	/// Client contact phone in canonical form: `+7` followed by ten digits.
	pub client_phone: String,
	/// Free-text client address.
	pub client_address: String,
	/// Vehicle production year, within [1900, current year].
	pub vehicle_year: i32,
	/// Total order amount. Positive.
	pub amount: Decimal,
	/// Worker commission. Positive and strictly less than `amount`.
	pub commission: Decimal,
	/// Free-text comment from the client.
	#[serde(default)]
	pub comment: String,
	/// The single district the work is located in.
	pub district: String,
	/// The single specialization the work requires.
	pub specialization: String,
	/// The classification tag.
	pub classification: Classification,
}

/// A unit of requested work with lifecycle status.
///
/// Orders are never physically deleted; cancellation is a terminal status.
/// `taken_at` and `completed_at` are populated only when the status implies
/// that phase has occurred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order.
	pub id: String,
	/// Identity of the client that created the order.
	pub created_by: String,
	/// Identity of the worker that claimed the order, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub taken_by: Option<String>,
	/// The validated request attributes.
	#[serde(flatten)]
	pub request: OrderRequest,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Timestamp when the order was created. Set once.
	pub created_at: DateTime<Utc>,
	/// Timestamp when the order was claimed. Cleared on cancellation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub taken_at: Option<DateTime<Utc>>,
	/// Timestamp when the order was completed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
	/// Creates a new order in the `available` status.
	pub fn new(
		id: impl Into<String>,
		created_by: impl Into<String>,
		request: OrderRequest,
		created_at: DateTime<Utc>,
	) -> Self {
		Self {
			id: id.into(),
			created_by: created_by.into(),
			taken_by: None,
			request,
			status: OrderStatus::Available,
			created_at,
			taken_at: None,
			completed_at: None,
		}
	}

	/// Returns the classification tag of this order.
	pub fn classification(&self) -> &Classification {
		&self.request.classification
	}
}
