//! Eligibility matching for the marketplace engine.
//!
//! A pure predicate deciding whether a worker may see an order in the
//! available pool. Eligibility is boolean, not ranked: district match AND
//! specialization match AND classification match. The "my orders" and
//! "claimed" views filter by identity and bypass the matcher entirely.

use market_types::{CapabilityProfile, Classification, Order};

/// Returns true when the worker's profile covers the order's district,
/// specialization and classification tag.
pub fn is_eligible(order: &Order, profile: &CapabilityProfile) -> bool {
	let district_match = profile.districts.contains(&order.request.district);
	let specialization_match = profile
		.specializations
		.contains(&order.request.specialization);

	district_match && specialization_match && classification_match(order, profile)
}

/// Classification arm of the predicate: which capability set (or flag) the
/// order's tag is checked against.
fn classification_match(order: &Order, profile: &CapabilityProfile) -> bool {
	match order.classification() {
		Classification::PassengerBrand(brand) => profile.passenger_car_brands.contains(brand),
		Classification::TruckBrand(brand) => profile.truck_brands.contains(brand),
		Classification::LocksmithService(service) => profile.locksmith_services.contains(service),
		Classification::RoadsideService(service) => profile.roadside_services.contains(service),
		Classification::SpecialVehicle => profile.special_vehicles,
		Classification::Motorcycle => profile.motorcycles,
	}
}

/// Filters an available-order list down to the ones the worker may see.
pub fn filter_eligible(orders: Vec<Order>, profile: &CapabilityProfile) -> Vec<Order> {
	orders
		.into_iter()
		.filter(|order| is_eligible(order, profile))
		.collect()
}
