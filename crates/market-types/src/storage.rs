//! Storage predicate, patch and query types.
//!
//! Every lifecycle transition is expressed as a single conditional update:
//! a predicate over the record's current state plus a patch applied only if
//! the predicate holds at commit time. The store's atomic check-then-patch
//! is the engine's sole serialization point; there are no explicit locks.

use crate::order::{Order, OrderRequest, OrderStatus};
use chrono::{DateTime, Utc};

/// Equality constraints a conditional update requires to hold at commit time.
///
/// All populated fields must match simultaneously (logical AND). This is the
/// write-side re-expression of the guard the caller checked on its read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePredicate {
	/// Expected current status.
	pub status: Option<OrderStatus>,
	/// Expected order owner.
	pub created_by: Option<String>,
	/// Expected order assignee.
	pub taken_by: Option<String>,
}

impl UpdatePredicate {
	/// Predicate expecting only the given status.
	pub fn status(status: OrderStatus) -> Self {
		Self {
			status: Some(status),
			..Default::default()
		}
	}

	/// Adds an owner equality constraint.
	pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
		self.created_by = Some(created_by.into());
		self
	}

	/// Adds an assignee equality constraint.
	pub fn with_taken_by(mut self, taken_by: impl Into<String>) -> Self {
		self.taken_by = Some(taken_by.into());
		self
	}

	/// Evaluates the predicate against a record's current state.
	pub fn matches(&self, order: &Order) -> bool {
		if let Some(status) = self.status {
			if order.status != status {
				return false;
			}
		}
		if let Some(created_by) = &self.created_by {
			if &order.created_by != created_by {
				return false;
			}
		}
		if let Some(taken_by) = &self.taken_by {
			if order.taken_by.as_deref() != Some(taken_by.as_str()) {
				return false;
			}
		}
		true
	}
}

/// The fields a conditional update writes when its predicate holds.
///
/// Double options distinguish "leave unchanged" (outer `None`) from "set to
/// null" (inner `None`). A populated `request` replaces the mutable request
/// attributes wholesale, as the edit transition requires.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
	/// New status.
	pub status: Option<OrderStatus>,
	/// New assignee, or explicit clear.
	pub taken_by: Option<Option<String>>,
	/// New claim timestamp, or explicit clear.
	pub taken_at: Option<Option<DateTime<Utc>>>,
	/// New completion timestamp, or explicit clear.
	pub completed_at: Option<Option<DateTime<Utc>>>,
	/// Replacement request attributes.
	pub request: Option<OrderRequest>,
}

impl OrderPatch {
	/// Applies all populated fields to the record. Backends call this while
	/// holding whatever makes check-then-patch indivisible for them.
	pub fn apply(&self, order: &mut Order) {
		if let Some(status) = self.status {
			order.status = status;
		}
		if let Some(taken_by) = &self.taken_by {
			order.taken_by = taken_by.clone();
		}
		if let Some(taken_at) = self.taken_at {
			order.taken_at = taken_at;
		}
		if let Some(completed_at) = self.completed_at {
			order.completed_at = completed_at;
		}
		if let Some(request) = &self.request {
			order.request = request.clone();
		}
	}
}

/// Outcome of a conditional update.
///
/// `applied == false` means the predicate no longer held at commit time:
/// another actor transitioned the record first (a lost race).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
	/// Whether the patch was applied.
	pub applied: bool,
}

/// Filter for order list queries. Populated fields are ANDed together;
/// results are returned newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
	/// Match a specific status.
	pub status: Option<OrderStatus>,
	/// Match a specific owner.
	pub created_by: Option<String>,
	/// Exclude a specific owner.
	pub not_created_by: Option<String>,
	/// Match a specific assignee.
	pub taken_by: Option<String>,
}

impl OrderQuery {
	/// Orders visible in the available pool for the given viewer:
	/// still open and not their own.
	pub fn available_excluding(viewer_id: impl Into<String>) -> Self {
		Self {
			status: Some(OrderStatus::Available),
			not_created_by: Some(viewer_id.into()),
			..Default::default()
		}
	}

	/// Orders created by the given owner, regardless of status.
	pub fn created_by(owner_id: impl Into<String>) -> Self {
		Self {
			created_by: Some(owner_id.into()),
			..Default::default()
		}
	}

	/// Orders the given worker has claimed and not yet completed.
	pub fn claimed_by(worker_id: impl Into<String>) -> Self {
		Self {
			status: Some(OrderStatus::InProgress),
			taken_by: Some(worker_id.into()),
			..Default::default()
		}
	}

	/// Evaluates the filter against a record.
	pub fn matches(&self, order: &Order) -> bool {
		if let Some(status) = self.status {
			if order.status != status {
				return false;
			}
		}
		if let Some(created_by) = &self.created_by {
			if &order.created_by != created_by {
				return false;
			}
		}
		if let Some(not_created_by) = &self.not_created_by {
			if &order.created_by == not_created_by {
				return false;
			}
		}
		if let Some(taken_by) = &self.taken_by {
			if order.taken_by.as_deref() != Some(taken_by.as_str()) {
				return false;
			}
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::order::Classification;
	use rust_decimal::Decimal;

	fn order(id: &str, created_by: &str) -> Order {
		Order::new(
			id,
			created_by,
			OrderRequest {
				client_phone: "+79215550011".to_string(),
				client_address: "ул. Рубинштейна, 5".to_string(),
				vehicle_year: 2010,
				amount: Decimal::new(7000, 0),
				commission: Decimal::new(1500, 0),
				comment: String::new(),
				district: "Невский".to_string(),
				specialization: "Автоэлектрик".to_string(),
				classification: Classification::Motorcycle,
			},
			Utc::now(),
		)
	}

	#[test]
	fn predicate_requires_all_constraints() {
		let mut record = order("o-1", "client-1");
		record.status = OrderStatus::InProgress;
		record.taken_by = Some("worker-1".to_string());

		let predicate =
			UpdatePredicate::status(OrderStatus::InProgress).with_taken_by("worker-1");
		assert!(predicate.matches(&record));

		let wrong_worker =
			UpdatePredicate::status(OrderStatus::InProgress).with_taken_by("worker-2");
		assert!(!wrong_worker.matches(&record));

		let wrong_status = UpdatePredicate::status(OrderStatus::Available);
		assert!(!wrong_status.matches(&record));
	}

	#[test]
	fn patch_distinguishes_clear_from_unchanged() {
		let mut record = order("o-1", "client-1");
		record.taken_by = Some("worker-1".to_string());
		record.taken_at = Some(Utc::now());

		// Unchanged: empty patch leaves the assignee alone.
		OrderPatch::default().apply(&mut record);
		assert_eq!(record.taken_by.as_deref(), Some("worker-1"));

		// Explicit clear.
		let clear = OrderPatch {
			taken_by: Some(None),
			taken_at: Some(None),
			..Default::default()
		};
		clear.apply(&mut record);
		assert!(record.taken_by.is_none());
		assert!(record.taken_at.is_none());
	}

	#[test]
	fn available_query_excludes_own_orders() {
		let mine = order("o-1", "worker-1");
		let other = order("o-2", "client-1");

		let query = OrderQuery::available_excluding("worker-1");
		assert!(!query.matches(&mine));
		assert!(query.matches(&other));
	}
}
