//! Worker capability profile types.
//!
//! A capability profile is the set of service capabilities a worker has
//! declared. It is pure data; the eligibility matcher consumes it to filter
//! the available-order pool.

use serde::{Deserialize, Serialize};

/// How a worker wants to be paid out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PayoutMethod {
	/// Bank card transfer.
	Card { number: String, bank: String },
	/// Fast payment system transfer keyed by phone number.
	Sbp { phone: String, bank: String },
}

/// A worker's declared eligibility attributes.
///
/// Created implicitly on first login and mutated only by its owner. Read by
/// the matcher without synchronization; a stale read can only mis-filter the
/// available view, never violate the order lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapabilityProfile {
	/// Identity of the worker that owns this profile.
	pub owner_id: String,
	/// Contact phone. Empty until the worker fills it in.
	#[serde(default)]
	pub phone: String,
	/// Districts the worker serves.
	#[serde(default)]
	pub districts: Vec<String>,
	/// Specializations the worker offers.
	#[serde(default)]
	pub specializations: Vec<String>,
	/// Passenger car brands the worker handles.
	#[serde(default)]
	pub passenger_car_brands: Vec<String>,
	/// Truck brands the worker handles.
	#[serde(default)]
	pub truck_brands: Vec<String>,
	/// Locksmith service types the worker offers.
	#[serde(default)]
	pub locksmith_services: Vec<String>,
	/// Roadside assistance service types the worker offers.
	#[serde(default)]
	pub roadside_services: Vec<String>,
	/// Whether the worker handles special-purpose vehicles.
	#[serde(default)]
	pub special_vehicles: bool,
	/// Whether the worker handles motorcycles.
	#[serde(default)]
	pub motorcycles: bool,
	/// Payout details, if configured.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payout: Option<PayoutMethod>,
}

impl CapabilityProfile {
	/// Creates an empty profile for the given owner.
	pub fn new(owner_id: impl Into<String>) -> Self {
		Self {
			owner_id: owner_id.into(),
			phone: String::new(),
			districts: Vec::new(),
			specializations: Vec::new(),
			passenger_car_brands: Vec::new(),
			truck_brands: Vec::new(),
			locksmith_services: Vec::new(),
			roadside_services: Vec::new(),
			special_vehicles: false,
			motorcycles: false,
			payout: None,
		}
	}

	/// Returns true when the profile has a phone, at least one district and
	/// at least one specialization. Completeness gates whether verification
	/// and order-creation flows are reachable.
	pub fn is_complete(&self) -> bool {
		!self.phone.is_empty() && !self.districts.is_empty() && !self.specializations.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_profile_is_incomplete() {
		let profile = CapabilityProfile::new("worker-1");
		assert!(!profile.is_complete());
	}

	#[test]
	fn profile_with_phone_district_and_specialization_is_complete() {
		let mut profile = CapabilityProfile::new("worker-1");
		profile.phone = "+79215550011".to_string();
		profile.districts.push("Центральный".to_string());
		assert!(!profile.is_complete());

		profile.specializations.push("Слесарь".to_string());
		assert!(profile.is_complete());
	}

	#[test]
	fn payout_method_round_trips() {
		let mut profile = CapabilityProfile::new("worker-1");
		profile.payout = Some(PayoutMethod::Sbp {
			phone: "+79215550011".to_string(),
			bank: "Т-Банк".to_string(),
		});

		let json = serde_json::to_string(&profile).unwrap();
		let back: CapabilityProfile = serde_json::from_str(&json).unwrap();
		assert_eq!(back, profile);
	}
}
