use serde_json::Value;

use crate::{filters::FilterSet, property::PropertyRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
	Area,
	Developer,
	PropertyType,
	Status,
	SaleStatus,
	Furnished,
	PaymentPlan,
}
impl TextField {
	pub const ALL: [Self; 7] = [
		Self::Area,
		Self::Developer,
		Self::PropertyType,
		Self::Status,
		Self::SaleStatus,
		Self::Furnished,
		Self::PaymentPlan,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Area => "area",
			Self::Developer => "developer",
			Self::PropertyType => "property_type",
			Self::Status => "status",
			Self::SaleStatus => "sale_status",
			Self::Furnished => "furnished",
			Self::PaymentPlan => "payment_plan",
		}
	}

	fn requested(self, filters: &FilterSet) -> Option<&str> {
		match self {
			Self::Area => filters.area.as_deref(),
			Self::Developer => filters.developer.as_deref(),
			Self::PropertyType => filters.property_type.as_deref(),
			Self::Status => filters.status.as_deref(),
			Self::SaleStatus => filters.sale_status.as_deref(),
			Self::Furnished => filters.furnished.as_deref(),
			Self::PaymentPlan => filters.payment_plan.as_deref(),
		}
	}

	fn lookup(self, record: &PropertyRecord) -> Option<&str> {
		match self {
			Self::Area => record.area.as_deref(),
			Self::Developer => record.developer.as_deref(),
			Self::PropertyType => record.property_type.as_deref(),
			Self::Status => record.status.as_deref(),
			Self::SaleStatus => record.sale_status.as_deref(),
			Self::Furnished => record.furnished.as_deref(),
			Self::PaymentPlan => record.payment_plan.as_deref(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericField {
	Bedrooms,
	Bathrooms,
	MinPrice,
	MaxPrice,
	AreaSqft,
	Floor,
}
impl NumericField {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bedrooms => "bedrooms",
			Self::Bathrooms => "bathrooms",
			Self::MinPrice => "min_price",
			Self::MaxPrice => "max_price",
			Self::AreaSqft => "area_sqft",
			Self::Floor => "floor",
		}
	}

	pub fn lookup(self, record: &PropertyRecord) -> Option<f64> {
		match self {
			Self::Bedrooms => record.bedrooms.map(f64::from),
			Self::Bathrooms => record.bathrooms.map(f64::from),
			Self::MinPrice => record.min_price,
			Self::MaxPrice => record.max_price,
			Self::AreaSqft => record.area_sqft,
			Self::Floor => record.floor.map(f64::from),
		}
	}
}

/// Predicate tree over catalog records. A record missing the inspected field never matches a
/// leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	All,
	And(Vec<Predicate>),
	Or(Vec<Predicate>),
	/// Case-insensitive substring match.
	Contains { field: TextField, value: String },
	Eq { field: NumericField, value: f64 },
	Gte { field: NumericField, value: f64 },
	Lte { field: NumericField, value: f64 },
	/// The amenity list holds at least one entry containing `tag`, case-insensitively.
	HasAmenity { tag: String },
}
impl Predicate {
	pub fn matches(&self, record: &PropertyRecord) -> bool {
		match self {
			Self::All => true,
			Self::And(nodes) => nodes.iter().all(|node| node.matches(record)),
			Self::Or(nodes) => nodes.iter().any(|node| node.matches(record)),
			Self::Contains { field, value } => field
				.lookup(record)
				.map(|text| contains_ignore_case(text, value))
				.unwrap_or(false),
			Self::Eq { field, value } => field.lookup(record).is_some_and(|n| n == *value),
			Self::Gte { field, value } => field.lookup(record).is_some_and(|n| n >= *value),
			Self::Lte { field, value } => field.lookup(record).is_some_and(|n| n <= *value),
			Self::HasAmenity { tag } =>
				record.amenities.iter().any(|amenity| contains_ignore_case(amenity, tag)),
		}
	}

	pub fn to_value(&self) -> Value {
		match self {
			Self::All => serde_json::json!({ "op": "all" }),
			Self::And(nodes) => {
				serde_json::json!({ "op": "and", "args": Value::Array(nodes.iter().map(Self::to_value).collect()) })
			},
			Self::Or(nodes) => {
				serde_json::json!({ "op": "or", "args": Value::Array(nodes.iter().map(Self::to_value).collect()) })
			},
			Self::Contains { field, value } => {
				serde_json::json!({ "op": "contains", "field": field.as_str(), "value": value })
			},
			Self::Eq { field, value } => {
				serde_json::json!({ "op": "eq", "field": field.as_str(), "value": value })
			},
			Self::Gte { field, value } => {
				serde_json::json!({ "op": "gte", "field": field.as_str(), "value": value })
			},
			Self::Lte { field, value } => {
				serde_json::json!({ "op": "lte", "field": field.as_str(), "value": value })
			},
			Self::HasAmenity { tag } => {
				serde_json::json!({ "op": "has_amenity", "field": "amenities", "value": tag })
			},
		}
	}
}

/// Compiled form of a [`FilterSet`], consumed by catalog backends.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyQuery {
	pub predicate: Predicate,
}
impl PropertyQuery {
	pub fn build(filters: &FilterSet) -> Self {
		let mut clauses = Vec::new();

		for field in TextField::ALL {
			if let Some(value) = field.requested(filters) {
				clauses.push(Predicate::Contains { field, value: value.to_string() });
			}
		}

		if let Some(bedrooms) = filters.bedrooms {
			clauses.push(Predicate::Eq { field: NumericField::Bedrooms, value: bedrooms.into() });
		}
		if let Some(bathrooms) = filters.bathrooms {
			clauses.push(Predicate::Eq { field: NumericField::Bathrooms, value: bathrooms.into() });
		}
		if let Some(price) = price_overlap(filters.min_price, filters.max_price) {
			clauses.push(price);
		}
		if let Some(min) = filters.min_area_sqft {
			clauses.push(Predicate::Gte { field: NumericField::AreaSqft, value: min });
		}
		if let Some(max) = filters.max_area_sqft {
			clauses.push(Predicate::Lte { field: NumericField::AreaSqft, value: max });
		}
		if let Some(range) = filters.floor_range {
			if let Some(min) = range.min {
				clauses.push(Predicate::Gte { field: NumericField::Floor, value: min.into() });
			}
			if let Some(max) = range.max {
				clauses.push(Predicate::Lte { field: NumericField::Floor, value: max.into() });
			}
		}

		for tag in &filters.amenities {
			clauses.push(Predicate::HasAmenity { tag: tag.clone() });
		}

		if clauses.is_empty() {
			return Self::unconstrained();
		}

		Self { predicate: Predicate::And(clauses) }
	}

	pub fn unconstrained() -> Self {
		Self { predicate: Predicate::All }
	}

	pub fn is_unconstrained(&self) -> bool {
		self.predicate == Predicate::All
	}

	pub fn matches(&self, record: &PropertyRecord) -> bool {
		self.predicate.matches(record)
	}

	pub fn to_value(&self) -> Value {
		self.predicate.to_value()
	}
}

/// A listing's price is itself a range. With both bounds, a record matches when its range
/// overlaps the request, or when its own minimum lies inside the request. One bound alone is a
/// one-sided overlap test.
fn price_overlap(min: Option<f64>, max: Option<f64>) -> Option<Predicate> {
	match (min, max) {
		(Some(min), Some(max)) => Some(Predicate::Or(vec![
			Predicate::And(vec![
				Predicate::Lte { field: NumericField::MinPrice, value: max },
				Predicate::Gte { field: NumericField::MaxPrice, value: min },
			]),
			Predicate::And(vec![
				Predicate::Gte { field: NumericField::MinPrice, value: min },
				Predicate::Lte { field: NumericField::MinPrice, value: max },
			]),
		])),
		(Some(min), None) => Some(Predicate::Gte { field: NumericField::MaxPrice, value: min }),
		(None, Some(max)) => Some(Predicate::Lte { field: NumericField::MinPrice, value: max }),
		(None, None) => None,
	}
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}
