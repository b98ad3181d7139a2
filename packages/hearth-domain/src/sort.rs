use std::cmp::Ordering;

use serde_json::Value;

use crate::{filters::FilterSet, property::PropertyRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
	MinPrice,
	AreaSqft,
	Status,
}
impl SortField {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::MinPrice => "min_price",
			Self::AreaSqft => "area_sqft",
			Self::Status => "status",
		}
	}

	fn compare(self, a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
		match self {
			Self::MinPrice => cmp_number(a.min_price, b.min_price),
			Self::AreaSqft => cmp_number(a.area_sqft, b.area_sqft),
			Self::Status => a.status.cmp(&b.status),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Ascending,
	Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
	pub field: SortField,
	pub direction: Direction,
}
impl SortKey {
	pub const fn asc(field: SortField) -> Self {
		Self { field, direction: Direction::Ascending }
	}

	pub const fn desc(field: SortField) -> Self {
		Self { field, direction: Direction::Descending }
	}
}

/// Ordered ranking keys; earlier keys dominate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
	pub keys: Vec<SortKey>,
}
impl SortSpec {
	/// Missing values sort first when ascending and last when descending.
	pub fn compare(&self, a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
		for key in &self.keys {
			let ordering = match key.direction {
				Direction::Ascending => key.field.compare(a, b),
				Direction::Descending => key.field.compare(b, a),
			};

			if ordering != Ordering::Equal {
				return ordering;
			}
		}

		Ordering::Equal
	}

	pub fn to_value(&self) -> Value {
		Value::Array(
			self.keys
				.iter()
				.map(|key| {
					let direction = match key.direction {
						Direction::Ascending => "asc",
						Direction::Descending => "desc",
					};

					serde_json::json!({ "field": key.field.as_str(), "direction": direction })
				})
				.collect(),
		)
	}
}
impl From<&[SortKey]> for SortSpec {
	fn from(keys: &[SortKey]) -> Self {
		Self { keys: keys.to_vec() }
	}
}

pub struct SortRule {
	pub keywords: &'static [&'static str],
	pub keys: &'static [SortKey],
}
impl SortRule {
	pub fn applies(&self, lowered: &str) -> bool {
		self.keywords.iter().any(|keyword| lowered.contains(keyword))
	}
}

/// Groups listings by status, cheapest first within each group.
pub const DEFAULT_SORT: &[SortKey] =
	&[SortKey::asc(SortField::Status), SortKey::asc(SortField::MinPrice)];

/// Evaluated in order; the first rule whose keyword appears in the utterance wins.
pub const SORT_RULES: &[SortRule] = &[
	SortRule {
		keywords: &["cheapest", "budget", "affordable"],
		keys: &[SortKey::asc(SortField::MinPrice)],
	},
	SortRule {
		keywords: &["expensive", "luxury", "premium"],
		keys: &[SortKey::desc(SortField::MinPrice)],
	},
	SortRule {
		keywords: &["biggest", "largest", "spacious"],
		keys: &[SortKey::desc(SortField::AreaSqft)],
	},
	SortRule { keywords: &["compact", "small"], keys: &[SortKey::asc(SortField::AreaSqft)] },
	SortRule { keywords: &["ready", "immediate"], keys: DEFAULT_SORT },
];

/// Picks a ranking from intent keywords in the raw utterance. Only the utterance is consulted.
pub fn select_sort(utterance: &str, _filters: &FilterSet) -> SortSpec {
	let lowered = utterance.to_lowercase();

	SORT_RULES
		.iter()
		.find(|rule| rule.applies(&lowered))
		.map(|rule| SortSpec::from(rule.keys))
		.unwrap_or_else(|| SortSpec::from(DEFAULT_SORT))
}

fn cmp_number(a: Option<f64>, b: Option<f64>) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => a.total_cmp(&b),
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}
