use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every recognized key, in the order they are rendered.
pub const FILTER_KEYS: [&str; 15] = [
	"area",
	"developer",
	"property_type",
	"bedrooms",
	"bathrooms",
	"min_price",
	"max_price",
	"min_area_sqft",
	"max_area_sqft",
	"status",
	"sale_status",
	"amenities",
	"floor_range",
	"furnished",
	"payment_plan",
];

/// Validated search intent. Every present value has passed type and positivity checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub area: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub developer: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub property_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bedrooms: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bathrooms: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "crate::amount::serialize")]
	pub min_price: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "crate::amount::serialize")]
	pub max_price: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "crate::amount::serialize")]
	pub min_area_sqft: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "crate::amount::serialize")]
	pub max_area_sqft: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sale_status: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub amenities: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub floor_range: Option<FloorRange>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub furnished: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payment_plan: Option<String>,
}
impl FilterSet {
	/// Cleans an untrusted candidate object. Fields that fail validation are dropped one by one;
	/// anything that is not an object yields the empty set.
	pub fn from_candidate(raw: &Value) -> Self {
		let Some(obj) = raw.as_object() else {
			return Self::default();
		};

		Self {
			area: clean_text(obj, "area"),
			developer: clean_text(obj, "developer"),
			property_type: clean_text(obj, "property_type"),
			bedrooms: clean_count(obj.get("bedrooms")),
			bathrooms: clean_count(obj.get("bathrooms")),
			min_price: clean_amount(obj.get("min_price")),
			max_price: clean_amount(obj.get("max_price")),
			min_area_sqft: clean_amount(obj.get("min_area_sqft")),
			max_area_sqft: clean_amount(obj.get("max_area_sqft")),
			status: clean_text(obj, "status"),
			sale_status: clean_text(obj, "sale_status"),
			amenities: clean_tags(obj.get("amenities")),
			floor_range: obj.get("floor_range").and_then(FloorRange::from_candidate),
			furnished: clean_text(obj, "furnished"),
			payment_plan: clean_text(obj, "payment_plan"),
		}
	}

	pub fn is_empty(&self) -> bool {
		self == &Self::default()
	}

	/// Renders the applied filters as `key: value` pairs for prompts, or "No specific filters".
	pub fn describe(&self) -> String {
		let Value::Object(map) = serde_json::to_value(self).unwrap_or(Value::Null) else {
			return "No specific filters".to_string();
		};

		if map.is_empty() {
			return "No specific filters".to_string();
		}

		FILTER_KEYS
			.iter()
			.filter_map(|key| map.get(*key).map(|value| (key, value)))
			.map(|(key, value)| match value {
				Value::Array(items) => format!(
					"{key}: {}",
					items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", ")
				),
				other => format!("{key}: {other}"),
			})
			.collect::<Vec<_>>()
			.join(", ")
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorRange {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<u32>,
}
impl FloorRange {
	fn from_candidate(raw: &Value) -> Option<Self> {
		let obj = raw.as_object()?;
		let range = Self { min: clean_count(obj.get("min")), max: clean_count(obj.get("max")) };

		(range.min.is_some() || range.max.is_some()).then_some(range)
	}
}

fn clean_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
	let trimmed = obj.get(key)?.as_str()?.trim();

	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clean_count(raw: Option<&Value>) -> Option<u32> {
	let value = raw?.as_f64()?;

	if value <= 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
		return None;
	}

	Some(value as u32)
}

fn clean_amount(raw: Option<&Value>) -> Option<f64> {
	let value = raw?.as_f64()?;

	(value.is_finite() && value > 0.0).then_some(value)
}

fn clean_tags(raw: Option<&Value>) -> Vec<String> {
	let Some(items) = raw.and_then(Value::as_array) else {
		return Vec::new();
	};

	items
		.iter()
		.filter_map(Value::as_str)
		.map(str::trim)
		.filter(|tag| !tag.is_empty())
		.map(str::to_string)
		.collect()
}
