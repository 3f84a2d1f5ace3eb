//! Lifecycle controller for the marketplace engine.
//!
//! The sole authority for order status transitions. Every transition is
//! submitted as a single conditional update whose predicate re-expresses
//! the guard against the record's state at commit time; the store's atomic
//! conditional write is the only serialization point. A predicate that no
//! longer holds is a lost race, surfaced as a distinct "no longer
//! available" condition so the caller refreshes instead of blindly
//! retrying. First accepted update wins.

use chrono::Utc;
use market_notify::NotifyService;
use market_storage::{StorageError, StorageInterface};
use market_types::{
	CapabilityProfile, Identity, Order, OrderPatch, OrderQuery, OrderRequest, OrderStatus,
	UpdatePredicate,
};
use market_validation::{OrderForm, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors a lifecycle operation can report.
///
/// Every public operation returns a success value or one of these kinds;
/// nothing escapes the boundary uncaught. Notification failures are not
/// represented here: they are logged inside dispatch and never surfaced.
#[derive(Debug, Error)]
pub enum LifecycleError {
	/// Input did not satisfy the validation pipeline. Recoverable locally,
	/// reported verbatim to the submitter.
	#[error("Validation failed: {0}")]
	ValidationFailed(#[from] ValidationError),
	/// The submitter's profile is missing the fields that gate order
	/// creation (phone, district, specialization).
	#[error("Complete your profile before creating orders")]
	ProfileIncomplete,
	/// A transition guard did not hold, or the conditional update affected
	/// zero rows. The order is no longer available (or no longer yours to
	/// modify); refresh before retrying.
	#[error("Order is no longer available")]
	PreconditionFailed,
	/// I/O failure talking to the backing store. Retried only at the
	/// user's discretion.
	#[error("Store unavailable: {0}")]
	StoreUnavailable(String),
}

impl LifecycleError {
	/// Maps store errors on the transition path. A missing record reads as
	/// "no longer available" to the caller, same as a lost race.
	fn from_transition(err: StorageError) -> Self {
		match err {
			StorageError::NotFound => LifecycleError::PreconditionFailed,
			other => LifecycleError::StoreUnavailable(other.to_string()),
		}
	}

	fn from_store(err: StorageError) -> Self {
		LifecycleError::StoreUnavailable(err.to_string())
	}
}

/// The lifecycle controller service.
///
/// Owns the storage backend and the notification dispatcher. All order
/// mutation in the system goes through this service.
pub struct LifecycleService {
	storage: Arc<dyn StorageInterface>,
	notify: Arc<NotifyService>,
}

impl LifecycleService {
	/// Creates a new LifecycleService over the given backend and notifier.
	pub fn new(storage: Arc<dyn StorageInterface>, notify: Arc<NotifyService>) -> Self {
		Self { storage, notify }
	}

	/// Creates a new order from a raw submission.
	///
	/// The submitter's profile must be complete (phone, at least one
	/// district, at least one specialization). On success the order is
	/// persisted in the `available` status and the outbound notification
	/// is dispatched post-commit, best-effort.
	#[tracing::instrument(skip(self, form), fields(submitter = %submitter.id))]
	pub async fn create_order(
		&self,
		submitter: &Identity,
		form: &OrderForm,
	) -> Result<Order, LifecycleError> {
		let profile = self
			.storage
			.get_profile(&submitter.id)
			.await
			.map_err(LifecycleError::from_store)?;
		if !profile.is_some_and(|profile| profile.is_complete()) {
			return Err(LifecycleError::ProfileIncomplete);
		}

		let request = market_validation::validate(form)?;
		let order = Order::new(
			Uuid::new_v4().to_string(),
			submitter.id.clone(),
			request,
			Utc::now(),
		);

		self.storage
			.insert_order(&order)
			.await
			.map_err(LifecycleError::from_store)?;
		tracing::info!("Order {} created by {}", order.id, submitter.id);

		// Post-commit hook: failure here is logged, never propagated.
		self.notify.order_created(&order, submitter).await;

		Ok(order)
	}

	/// Claims an available order for a worker.
	///
	/// Guard: the actor is not the owner, and the order is still
	/// `available` at commit time. Owner inequality cannot be expressed as
	/// a store predicate, so it is checked against a pre-read; `created_by`
	/// is immutable, so the check cannot race with the conditional write.
	#[tracing::instrument(skip(self), fields(worker = %worker.id))]
	pub async fn claim_order(
		&self,
		worker: &Identity,
		order_id: &str,
	) -> Result<Order, LifecycleError> {
		let order = self
			.storage
			.get_order(order_id)
			.await
			.map_err(LifecycleError::from_transition)?;
		if order.created_by == worker.id {
			return Err(LifecycleError::PreconditionFailed);
		}

		let patch = OrderPatch {
			status: Some(OrderStatus::InProgress),
			taken_by: Some(Some(worker.id.clone())),
			taken_at: Some(Some(Utc::now())),
			..Default::default()
		};
		self.transition(order_id, &UpdatePredicate::status(OrderStatus::Available), &patch)
			.await
	}

	/// Replaces an available order's request attributes with a freshly
	/// validated payload. Owner-only; the status does not change.
	#[tracing::instrument(skip(self, form), fields(owner = %owner.id))]
	pub async fn edit_order(
		&self,
		owner: &Identity,
		order_id: &str,
		form: &OrderForm,
	) -> Result<Order, LifecycleError> {
		let request: OrderRequest = market_validation::validate(form)?;

		let patch = OrderPatch {
			request: Some(request),
			..Default::default()
		};
		let predicate =
			UpdatePredicate::status(OrderStatus::Available).with_created_by(owner.id.clone());
		self.transition(order_id, &predicate, &patch).await
	}

	/// Cancels an available order. Owner-only, terminal.
	#[tracing::instrument(skip(self), fields(owner = %owner.id))]
	pub async fn cancel_order(
		&self,
		owner: &Identity,
		order_id: &str,
	) -> Result<Order, LifecycleError> {
		let patch = OrderPatch {
			status: Some(OrderStatus::Cancelled),
			taken_by: Some(None),
			taken_at: Some(None),
			completed_at: Some(None),
			..Default::default()
		};
		let predicate =
			UpdatePredicate::status(OrderStatus::Available).with_created_by(owner.id.clone());
		self.transition(order_id, &predicate, &patch).await
	}

	/// Completes an in-progress order. Assignee-only, terminal.
	#[tracing::instrument(skip(self), fields(worker = %worker.id))]
	pub async fn complete_order(
		&self,
		worker: &Identity,
		order_id: &str,
	) -> Result<Order, LifecycleError> {
		let patch = OrderPatch {
			status: Some(OrderStatus::Completed),
			completed_at: Some(Some(Utc::now())),
			..Default::default()
		};
		let predicate =
			UpdatePredicate::status(OrderStatus::InProgress).with_taken_by(worker.id.clone());
		self.transition(order_id, &predicate, &patch).await
	}

	/// Submits one conditional update and interprets its outcome. Zero
	/// rows affected means someone else transitioned the record first.
	async fn transition(
		&self,
		order_id: &str,
		predicate: &UpdatePredicate,
		patch: &OrderPatch,
	) -> Result<Order, LifecycleError> {
		let outcome = self
			.storage
			.conditional_update(order_id, predicate, patch)
			.await
			.map_err(LifecycleError::from_transition)?;

		if !outcome.applied {
			tracing::debug!("Order {} transition lost its race", order_id);
			return Err(LifecycleError::PreconditionFailed);
		}

		self.storage
			.get_order(order_id)
			.await
			.map_err(LifecycleError::from_store)
	}

	/// The available-order pool for a worker: open orders not their own,
	/// filtered through the eligibility matcher against their profile.
	/// A worker without a profile sees nothing.
	pub async fn available_orders(&self, worker: &Identity) -> Result<Vec<Order>, LifecycleError> {
		let Some(profile) = self
			.storage
			.get_profile(&worker.id)
			.await
			.map_err(LifecycleError::from_store)?
		else {
			return Ok(Vec::new());
		};

		let orders = self
			.storage
			.query_orders(&OrderQuery::available_excluding(worker.id.clone()))
			.await
			.map_err(LifecycleError::from_store)?;

		Ok(market_matching::filter_eligible(orders, &profile))
	}

	/// Orders created by the caller, any status. Bypasses the matcher.
	pub async fn my_orders(&self, owner: &Identity) -> Result<Vec<Order>, LifecycleError> {
		self.storage
			.query_orders(&OrderQuery::created_by(owner.id.clone()))
			.await
			.map_err(LifecycleError::from_store)
	}

	/// Orders the caller has claimed and not yet completed. Bypasses the
	/// matcher.
	pub async fn claimed_orders(&self, worker: &Identity) -> Result<Vec<Order>, LifecycleError> {
		self.storage
			.query_orders(&OrderQuery::claimed_by(worker.id.clone()))
			.await
			.map_err(LifecycleError::from_store)
	}

	/// Loads the caller's capability profile, creating an empty one on
	/// first access.
	pub async fn load_profile(&self, caller: &Identity) -> Result<CapabilityProfile, LifecycleError> {
		if let Some(profile) = self
			.storage
			.get_profile(&caller.id)
			.await
			.map_err(LifecycleError::from_store)?
		{
			return Ok(profile);
		}

		let profile = CapabilityProfile::new(caller.id.clone());
		self.storage
			.upsert_profile(&profile)
			.await
			.map_err(LifecycleError::from_store)?;
		Ok(profile)
	}

	/// Replaces the caller's capability profile. Profiles are mutated only
	/// by their owner.
	pub async fn save_profile(
		&self,
		caller: &Identity,
		profile: CapabilityProfile,
	) -> Result<CapabilityProfile, LifecycleError> {
		if profile.owner_id != caller.id {
			return Err(LifecycleError::PreconditionFailed);
		}
		self.storage
			.upsert_profile(&profile)
			.await
			.map_err(LifecycleError::from_store)?;
		Ok(profile)
	}
}
