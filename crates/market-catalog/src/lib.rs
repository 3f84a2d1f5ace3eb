//! Static reference data for the marketplace engine.
//!
//! Districts, specializations, vehicle-brand catalogs (keyed by region) and
//! service-type catalogs, consumed read-only by the validation pipeline and
//! by tests. The data is a fixed enumeration; there is no runtime mutation.

/// Districts of Saint Petersburg served by the marketplace.
pub const DISTRICTS: &[&str] = &[
	"Адмиралтейский",
	"Василеостровский",
	"Выборгский",
	"Калининский",
	"Кировский",
	"Колпинский",
	"Красногвардейский",
	"Красносельский",
	"Кронштадтский",
	"Курортный",
	"Московский",
	"Невский",
	"Петроградский",
	"Петродворцовый",
	"Приморский",
	"Пушкинский",
	"Фрунзенский",
	"Центральный",
];

/// Worker specializations.
pub const SPECIALIZATIONS: &[&str] = &[
	"Автоэлектрик",
	"Диагност",
	"Моторист",
	"Слесарь",
	"Ходовик",
	"Шиномонтажник",
	"Эвакуаторщик",
];

/// Passenger car brands, grouped by region of origin.
pub const CAR_BRANDS_BY_REGION: &[(&str, &[&str])] = &[
	(
		"Европа",
		&[
			"AUDI", "BMW", "CITROEN", "FIAT", "LAND ROVER", "MERCEDES-BENZ", "OPEL", "PEUGEOT",
			"PORSCHE", "RENAULT", "SKODA", "VOLKSWAGEN", "VOLVO",
		],
	),
	(
		"Америка",
		&["CADILLAC", "CHEVROLET", "CHRYSLER", "DODGE", "FORD", "JEEP", "TESLA"],
	),
	(
		"Азия",
		&[
			"HONDA", "HYUNDAI", "INFINITI", "KIA", "LEXUS", "MAZDA", "MITSUBISHI", "NISSAN",
			"SUBARU", "SUZUKI", "TOYOTA",
		],
	),
	(
		"Китай",
		&["CHANGAN", "CHERY", "EXEED", "GEELY", "HAVAL", "OMODA"],
	),
	("Россия", &["LADA", "UAZ", "ГАЗ", "МОСКВИЧ"]),
];

/// Truck brands, grouped by region of origin.
pub const TRUCK_BRANDS_BY_REGION: &[(&str, &[&str])] = &[
	(
		"Европа",
		&[
			"BPW", "DAF", "ERF", "CASE", "GAZ", "IVECO", "JCB", "KAMAZ", "KAVZ", "MAN", "MAZ",
			"MZSA", "MERCEDES-BENZ", "PAZ", "ROR", "RENAULT", "SMB", "SCANIA", "TONAR", "URAL",
			"VOLVO",
		],
	),
	(
		"Америка",
		&["INTERNATIONAL HARVESTER", "FORD", "FRUEHAUF", "INTERNATIONAL"],
	),
	("Китай", &["BAW", "FAW", "FOTON", "JAC"]),
	(
		"Азия",
		&["DAEWOO", "HINO", "HYUNDAI", "ISUZU", "NISSAN", "SSANGYONG"],
	),
];

/// Locksmith service types.
pub const LOCKSMITH_SERVICES: &[&str] = &[
	"Вскрытие авто",
	"Вскрытие замка",
	"Замена замка",
	"Замена личинки",
	"Изготовление ключа",
	"Привязка ключа",
	"Ремонт замка зажигания",
];

/// Roadside assistance service types.
pub const ROADSIDE_SERVICES: &[&str] = &[
	"Эвакуация",
	"Запуск двигателя",
	"Замена колеса",
	"Подвоз топлива",
	"Отогрев авто",
	"Аварийное вскрытие",
];

/// Returns all passenger car brands across regions.
pub fn car_brands() -> impl Iterator<Item = &'static str> {
	CAR_BRANDS_BY_REGION
		.iter()
		.flat_map(|(_, brands)| brands.iter().copied())
}

/// Returns all truck brands across regions.
pub fn truck_brands() -> impl Iterator<Item = &'static str> {
	TRUCK_BRANDS_BY_REGION
		.iter()
		.flat_map(|(_, brands)| brands.iter().copied())
}

/// Whether the given passenger car brand exists in the catalog.
pub fn is_car_brand(brand: &str) -> bool {
	car_brands().any(|known| known == brand)
}

/// Whether the given truck brand exists in the catalog.
pub fn is_truck_brand(brand: &str) -> bool {
	truck_brands().any(|known| known == brand)
}

/// Whether the given locksmith service type exists in the catalog.
pub fn is_locksmith_service(service: &str) -> bool {
	LOCKSMITH_SERVICES.contains(&service)
}

/// Whether the given roadside service type exists in the catalog.
pub fn is_roadside_service(service: &str) -> bool {
	ROADSIDE_SERVICES.contains(&service)
}

/// Whether the given district exists in the catalog.
pub fn is_district(district: &str) -> bool {
	DISTRICTS.contains(&district)
}

/// Whether the given specialization exists in the catalog.
pub fn is_specialization(specialization: &str) -> bool {
	SPECIALIZATIONS.contains(&specialization)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn catalogs_contain_expected_entries() {
		assert!(is_district("Центральный"));
		assert!(is_specialization("Слесарь"));
		assert!(is_locksmith_service("Замена замка"));
		assert!(is_roadside_service("Эвакуация"));
		assert!(is_car_brand("TOYOTA"));
		assert!(is_truck_brand("SCANIA"));
	}

	#[test]
	fn lookups_reject_unknown_entries() {
		assert!(!is_district("Атлантида"));
		assert!(!is_car_brand("НЛО"));
		assert!(!is_locksmith_service("Ремонт часов"));
	}

	#[test]
	fn brand_catalogs_have_no_empty_regions() {
		for (region, brands) in CAR_BRANDS_BY_REGION.iter().chain(TRUCK_BRANDS_BY_REGION) {
			assert!(!region.is_empty());
			assert!(!brands.is_empty());
		}
	}
}
