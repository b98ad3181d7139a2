use serde::{Deserialize, Serialize};

/// Read-only projection of a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyRecord {
	pub id: String,
	pub name: String,
	pub area: Option<String>,
	pub developer: Option<String>,
	pub property_type: Option<String>,
	pub bedrooms: Option<u32>,
	pub bathrooms: Option<u32>,
	#[serde(serialize_with = "crate::amount::serialize")]
	pub min_price: Option<f64>,
	#[serde(serialize_with = "crate::amount::serialize")]
	pub max_price: Option<f64>,
	#[serde(serialize_with = "crate::amount::serialize")]
	pub area_sqft: Option<f64>,
	pub floor: Option<u32>,
	pub status: Option<String>,
	pub sale_status: Option<String>,
	pub furnished: Option<String>,
	pub payment_plan: Option<String>,
	pub amenities: Vec<String>,
	pub description: Option<String>,
}

/// Distinct values of each filterable field across the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
	pub areas: Vec<String>,
	pub developers: Vec<String>,
	pub property_types: Vec<String>,
	pub statuses: Vec<String>,
	pub bedroom_options: Vec<u32>,
	pub price_range: PriceRange,
}
impl FilterOptions {
	pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Self {
		let mut options = Self::default();

		for record in records {
			options.areas.extend(record.area.clone());
			options.developers.extend(record.developer.clone());
			options.property_types.extend(record.property_type.clone());
			options.statuses.extend(record.status.clone());
			options.bedroom_options.extend(record.bedrooms);

			if let Some(price) = record.min_price.filter(|price| *price != 0.0) {
				options.price_range.min =
					Some(options.price_range.min.map_or(price, |min| min.min(price)));
			}
			if let Some(price) = record.max_price.filter(|price| *price != 0.0) {
				options.price_range.max =
					Some(options.price_range.max.map_or(price, |max| max.max(price)));
			}
		}

		options.normalized()
	}

	/// Sorts and deduplicates every list and drops empty strings.
	pub fn normalized(mut self) -> Self {
		for values in
			[&mut self.areas, &mut self.developers, &mut self.property_types, &mut self.statuses]
		{
			values.retain(|value| !value.is_empty());
			values.sort();
			values.dedup();
		}

		self.bedroom_options.sort_unstable();
		self.bedroom_options.dedup();

		self
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
}
