use std::time::Duration;

use regex::Regex;
use serde_json::Value;

use crate::{Error, HearthService, Result, stage};
use hearth_config::Assistant;
use hearth_domain::filters::FilterSet;

impl HearthService {
	/// Turns an utterance into a cleaned filter set. Any failure along the way yields the empty
	/// set.
	pub async fn extract_filters(&self, utterance: &str) -> FilterSet {
		let timeout = Duration::from_millis(self.cfg.search.completion_timeout_ms);
		let filters = stage::soften(
			"extraction",
			timeout,
			self.request_filters(utterance),
			FilterSet::default,
		)
		.await;

		tracing::info!(filters = %filters.describe(), "Filters extracted.");

		filters
	}

	async fn request_filters(&self, utterance: &str) -> Result<FilterSet> {
		let instruction = build_instruction(&self.cfg.assistant, utterance);
		let raw = self
			.providers
			.extractor
			.complete(&self.cfg.providers.llm_extractor, &instruction, utterance)
			.await?;
		let candidate = first_json_object(&raw).ok_or_else(|| Error::Provider {
			message: "Extraction reply did not contain a JSON object.".to_string(),
		})?;

		Ok(FilterSet::from_candidate(&candidate))
	}
}

pub fn build_instruction(assistant: &Assistant, utterance: &str) -> String {
	let Assistant { persona, site, market, .. } = assistant;

	format!(
		r#"The user typed this property search: "{utterance}"

You are {persona}, the AI assistant of {site}, helping people find property in {market}.

Extract every search filter the request mentions and return them as JSON with this shape:

{{
  "area": "area or community name, if mentioned (e.g. Damac Hills, Downtown Dubai)",
  "developer": "developer name, if mentioned (e.g. DAMAC, Emaar, Sobha)",
  "property_type": "Villa/Apartment/Penthouse/Studio/Townhouse, if mentioned",
  "bedrooms": number of bedrooms, if mentioned,
  "bathrooms": number of bathrooms, if mentioned,
  "min_price": number, if mentioned,
  "max_price": number, if mentioned,
  "min_area_sqft": minimum square feet, if mentioned,
  "max_area_sqft": maximum square feet, if mentioned,
  "status": "Under Construction/Ready/Off Plan, if mentioned",
  "sale_status": "Available/Sold/Reserved, if mentioned",
  "amenities": ["Swimming Pool", "Gym", "Parking"],
  "floor_range": {{"min": number, "max": number}},
  "furnished": "Furnished/Unfurnished/Semi-furnished, if mentioned",
  "payment_plan": "Cash/Installment/Mortgage, if mentioned"
}}

Leave out every key the request does not mention. Prices are plain numbers in currency units.

Examples:
"3 bedroom villa in Damac Hills" -> {{"area": "Damac Hills", "property_type": "Villa", "bedrooms": 3}}
"DAMAC apartments with a swimming pool" -> {{"developer": "DAMAC", "property_type": "Apartment", "amenities": ["Swimming Pool"]}}
"50 lakh to 1 crore" -> {{"min_price": 5000000, "max_price": 10000000}}
"ready to move properties" -> {{"status": "Ready"}}
"furnished studio apartment" -> {{"property_type": "Studio", "furnished": "Furnished"}}
"more than 2000 sqft" -> {{"min_area_sqft": 2000}}
"high floor apartment" -> {{"property_type": "Apartment", "floor_range": {{"min": 10}}}}

Return only the JSON object, with no other text."#
	)
}

/// Finds the JSON object in a completion that may wrap it in prose or code fences. The widest
/// brace span is tried first, then each opening brace in turn.
pub fn first_json_object(raw: &str) -> Option<Value> {
	let widest = Regex::new(r"(?s)\{.*\}")
		.ok()
		.and_then(|re| re.find(raw))
		.and_then(|span| serde_json::from_str::<Value>(span.as_str()).ok())
		.filter(Value::is_object);

	if widest.is_some() {
		return widest;
	}

	raw.match_indices('{').find_map(|(start, _)| {
		let mut stream = serde_json::Deserializer::from_str(&raw[start..]).into_iter::<Value>();

		match stream.next() {
			Some(Ok(value @ Value::Object(_))) => Some(value),
			_ => None,
		}
	})
}
