//! Validation pipeline for the marketplace engine.
//!
//! Turns the flat string record coming off the submission form into a typed,
//! normalized `OrderRequest`, or reports the first failing rule. Rules run
//! in a fixed order; the first failure determines the reported error.

use chrono::{Datelike, Utc};
use market_types::{Classification, OrderRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Earliest accepted vehicle production year.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Length of a valid phone number after stripping non-digits.
const PHONE_DIGITS: usize = 11;

/// A raw order submission: flat strings exactly as the form sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderForm {
	#[serde(default)]
	pub client_phone: String,
	#[serde(default)]
	pub client_address: String,
	#[serde(default)]
	pub vehicle_year: String,
	#[serde(default)]
	pub amount: String,
	#[serde(default)]
	pub commission: String,
	#[serde(default)]
	pub comment: String,
	#[serde(default)]
	pub district: String,
	#[serde(default)]
	pub specialization: String,
	/// The chosen classification tag: one of `passenger`, `truck`,
	/// `locksmith`, `roadside`, `special`, `moto`. Empty if not chosen.
	#[serde(default)]
	pub vehicle_type: String,
	/// The concrete brand or service option for brand/service tags.
	#[serde(default)]
	pub selected_option: String,
}

/// A validation failure. Always recoverable locally; the message is
/// reported verbatim to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("Please fill in all required fields")]
	MissingRequiredFields,
	#[error("Phone number must contain exactly 11 digits, got {0}")]
	InvalidPhone(usize),
	#[error("Vehicle year must be between {min} and {max}")]
	InvalidYear { min: i32, max: i32 },
	#[error("Order amount must be a positive number")]
	InvalidAmount,
	#[error("Commission must be positive and strictly less than the amount")]
	InvalidCommission,
	#[error("Select a district")]
	MissingDistrict,
	#[error("Select a specialization")]
	MissingSpecialization,
	#[error("Select a vehicle or work type")]
	MissingClassification,
	#[error("Unknown vehicle or work type: {0}")]
	UnknownClassificationKind(String),
	#[error("Select a brand or service type")]
	MissingOption,
	#[error("Unknown catalog option: {0}")]
	UnknownOption(String),
}

/// Validates a submission against the current calendar year.
pub fn validate(form: &OrderForm) -> Result<OrderRequest, ValidationError> {
	validate_at(form, Utc::now().year())
}

/// Validates a submission with an explicit upper bound for the vehicle year.
///
/// Rules run in order; the first failure is returned:
/// 1. phone, address, amount and commission are non-empty
/// 2. phone normalizes to exactly 11 digits
/// 3. vehicle year is an integer in [1900, current year]
/// 4. amount parses as a positive number
/// 5. commission parses as a positive number strictly below amount
/// 6. exactly one district is selected
/// 7. exactly one specialization is selected
/// 8. exactly one classification tag, with a concrete catalog option for
///    brand/service tags
pub fn validate_at(form: &OrderForm, current_year: i32) -> Result<OrderRequest, ValidationError> {
	if form.client_phone.is_empty()
		|| form.client_address.is_empty()
		|| form.amount.is_empty()
		|| form.commission.is_empty()
	{
		return Err(ValidationError::MissingRequiredFields);
	}

	let client_phone = normalize_phone(&form.client_phone)?;

	let vehicle_year = form
		.vehicle_year
		.trim()
		.parse::<i32>()
		.ok()
		.filter(|year| (MIN_VEHICLE_YEAR..=current_year).contains(year))
		.ok_or(ValidationError::InvalidYear {
			min: MIN_VEHICLE_YEAR,
			max: current_year,
		})?;

	let amount = Decimal::from_str(form.amount.trim())
		.ok()
		.filter(|amount| amount.is_sign_positive() && !amount.is_zero())
		.ok_or(ValidationError::InvalidAmount)?;

	let commission = Decimal::from_str(form.commission.trim())
		.ok()
		.filter(|commission| {
			commission.is_sign_positive() && !commission.is_zero() && *commission < amount
		})
		.ok_or(ValidationError::InvalidCommission)?;

	if form.district.is_empty() {
		return Err(ValidationError::MissingDistrict);
	}
	if form.specialization.is_empty() {
		return Err(ValidationError::MissingSpecialization);
	}

	let classification = resolve_classification(&form.vehicle_type, &form.selected_option)?;

	Ok(OrderRequest {
		client_phone,
		client_address: form.client_address.clone(),
		vehicle_year,
		amount,
		commission,
		comment: form.comment.clone(),
		district: form.district.clone(),
		specialization: form.specialization.clone(),
		classification,
	})
}

/// Strips non-digit characters and canonicalizes to `+7` plus the last ten
/// digits. Exactly 11 digits are required after stripping.
fn normalize_phone(raw: &str) -> Result<String, ValidationError> {
	let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
	if digits.len() != PHONE_DIGITS {
		return Err(ValidationError::InvalidPhone(digits.len()));
	}
	Ok(format!("+7{}", &digits[1..]))
}

/// Resolves the tagged classification choice, enforcing that brand/service
/// tags name a concrete option from the corresponding catalog.
fn resolve_classification(
	vehicle_type: &str,
	selected_option: &str,
) -> Result<Classification, ValidationError> {
	if vehicle_type.is_empty() {
		return Err(ValidationError::MissingClassification);
	}

	let requires_option = |contains: fn(&str) -> bool| -> Result<String, ValidationError> {
		if selected_option.is_empty() {
			return Err(ValidationError::MissingOption);
		}
		if !contains(selected_option) {
			return Err(ValidationError::UnknownOption(selected_option.to_string()));
		}
		Ok(selected_option.to_string())
	};

	match vehicle_type {
		"passenger" => Ok(Classification::PassengerBrand(requires_option(
			market_catalog::is_car_brand,
		)?)),
		"truck" => Ok(Classification::TruckBrand(requires_option(
			market_catalog::is_truck_brand,
		)?)),
		"locksmith" => Ok(Classification::LocksmithService(requires_option(
			market_catalog::is_locksmith_service,
		)?)),
		"roadside" => Ok(Classification::RoadsideService(requires_option(
			market_catalog::is_roadside_service,
		)?)),
		"special" => Ok(Classification::SpecialVehicle),
		"moto" => Ok(Classification::Motorcycle),
		other => Err(ValidationError::UnknownClassificationKind(other.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CURRENT_YEAR: i32 = 2026;

	fn form() -> OrderForm {
		OrderForm {
			client_phone: "8 (921) 555-00-11".to_string(),
			client_address: "Невский пр., 1".to_string(),
			vehicle_year: "2015".to_string(),
			amount: "5000".to_string(),
			commission: "1000".to_string(),
			comment: "Код домофона 42".to_string(),
			district: "Центральный".to_string(),
			specialization: "Слесарь".to_string(),
			vehicle_type: "locksmith".to_string(),
			selected_option: "Замена замка".to_string(),
		}
	}

	#[test]
	fn valid_form_produces_normalized_request() {
		let request = validate_at(&form(), CURRENT_YEAR).unwrap();
		assert_eq!(request.client_phone, "+79215550011");
		assert_eq!(request.vehicle_year, 2015);
		assert_eq!(
			request.classification,
			Classification::LocksmithService("Замена замка".to_string())
		);
	}

	#[test]
	fn missing_required_fields_reported_first() {
		let mut bad = form();
		bad.amount = String::new();
		bad.client_phone = "123".to_string(); // would also fail rule 2
		assert_eq!(
			validate_at(&bad, CURRENT_YEAR),
			Err(ValidationError::MissingRequiredFields)
		);
	}

	#[test]
	fn phone_boundaries() {
		// 11 digits after stripping: accepted.
		let mut ok = form();
		ok.client_phone = "+7 921 555-00-11".to_string();
		assert!(validate_at(&ok, CURRENT_YEAR).is_ok());

		// 10 digits: rejected.
		let mut short = form();
		short.client_phone = "921 555-00-11".to_string();
		assert_eq!(
			validate_at(&short, CURRENT_YEAR),
			Err(ValidationError::InvalidPhone(10))
		);

		// 12 digits: rejected.
		let mut long = form();
		long.client_phone = "+7 9215 555-00-11".to_string();
		assert_eq!(
			validate_at(&long, CURRENT_YEAR),
			Err(ValidationError::InvalidPhone(12))
		);
	}

	#[test]
	fn year_boundaries() {
		for (year, ok) in [
			("1900", true),
			("1899", false),
			(&CURRENT_YEAR.to_string(), true),
			(&(CURRENT_YEAR + 1).to_string(), false),
		] {
			let mut submission = form();
			submission.vehicle_year = year.to_string();
			assert_eq!(
				validate_at(&submission, CURRENT_YEAR).is_ok(),
				ok,
				"year {}",
				year
			);
		}
	}

	#[test]
	fn year_must_be_an_integer() {
		let mut bad = form();
		bad.vehicle_year = "двенадцатый".to_string();
		assert!(matches!(
			validate_at(&bad, CURRENT_YEAR),
			Err(ValidationError::InvalidYear { .. })
		));
	}

	#[test]
	fn amount_must_be_positive() {
		for amount in ["0", "-100", "abc"] {
			let mut bad = form();
			bad.amount = amount.to_string();
			assert_eq!(
				validate_at(&bad, CURRENT_YEAR),
				Err(ValidationError::InvalidAmount),
				"amount {}",
				amount
			);
		}
	}

	#[test]
	fn commission_must_be_strictly_below_amount() {
		let mut equal = form();
		equal.commission = equal.amount.clone();
		assert_eq!(
			validate_at(&equal, CURRENT_YEAR),
			Err(ValidationError::InvalidCommission)
		);

		let mut above = form();
		above.commission = "6000".to_string();
		assert_eq!(
			validate_at(&above, CURRENT_YEAR),
			Err(ValidationError::InvalidCommission)
		);

		let mut just_below = form();
		just_below.commission = "4999.99".to_string();
		assert!(validate_at(&just_below, CURRENT_YEAR).is_ok());
	}

	#[test]
	fn district_and_specialization_are_required() {
		let mut no_district = form();
		no_district.district = String::new();
		assert_eq!(
			validate_at(&no_district, CURRENT_YEAR),
			Err(ValidationError::MissingDistrict)
		);

		let mut no_specialization = form();
		no_specialization.specialization = String::new();
		assert_eq!(
			validate_at(&no_specialization, CURRENT_YEAR),
			Err(ValidationError::MissingSpecialization)
		);
	}

	#[test]
	fn flag_tags_need_no_option() {
		let mut special = form();
		special.vehicle_type = "special".to_string();
		special.selected_option = String::new();
		assert_eq!(
			validate_at(&special, CURRENT_YEAR).unwrap().classification,
			Classification::SpecialVehicle
		);

		let mut moto = form();
		moto.vehicle_type = "moto".to_string();
		moto.selected_option = String::new();
		assert_eq!(
			validate_at(&moto, CURRENT_YEAR).unwrap().classification,
			Classification::Motorcycle
		);
	}

	#[test]
	fn brand_tags_require_a_catalog_option() {
		let mut no_option = form();
		no_option.vehicle_type = "passenger".to_string();
		no_option.selected_option = String::new();
		assert_eq!(
			validate_at(&no_option, CURRENT_YEAR),
			Err(ValidationError::MissingOption)
		);

		let mut unknown = form();
		unknown.vehicle_type = "passenger".to_string();
		unknown.selected_option = "НЛО".to_string();
		assert_eq!(
			validate_at(&unknown, CURRENT_YEAR),
			Err(ValidationError::UnknownOption("НЛО".to_string()))
		);

		let mut known = form();
		known.vehicle_type = "passenger".to_string();
		known.selected_option = "TOYOTA".to_string();
		assert_eq!(
			validate_at(&known, CURRENT_YEAR).unwrap().classification,
			Classification::PassengerBrand("TOYOTA".to_string())
		);
	}

	#[test]
	fn missing_and_unknown_tags_are_rejected() {
		let mut none = form();
		none.vehicle_type = String::new();
		assert_eq!(
			validate_at(&none, CURRENT_YEAR),
			Err(ValidationError::MissingClassification)
		);

		let mut unknown = form();
		unknown.vehicle_type = "submarine".to_string();
		assert_eq!(
			validate_at(&unknown, CURRENT_YEAR),
			Err(ValidationError::UnknownClassificationKind(
				"submarine".to_string()
			))
		);
	}
}
