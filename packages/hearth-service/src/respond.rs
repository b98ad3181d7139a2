use std::{fmt::Write, time::Duration};

use crate::{HearthService, stage};
use hearth_config::Assistant;
use hearth_domain::{filters::FilterSet, property::PropertyRecord};

const NOT_SPECIFIED: &str = "Not specified";

impl HearthService {
	/// Writes the conversational reply. Never fails: a missing or empty completion is replaced by
	/// a fixed apology.
	pub async fn synthesize(
		&self,
		utterance: &str,
		matches: &[PropertyRecord],
		filters: &FilterSet,
	) -> String {
		let assistant = &self.cfg.assistant;
		let search = &self.cfg.search;
		let digest = render_digest(
			matches,
			&assistant.currency,
			search.digest_size as usize,
			search.digest_amenities as usize,
		);
		let instruction = build_instruction(assistant, utterance, filters, matches.len(), &digest);
		let timeout = Duration::from_millis(search.completion_timeout_ms);
		let reply = stage::soften(
			"synthesis",
			timeout,
			async {
				self.providers
					.responder
					.complete(&self.cfg.providers.llm_responder, &instruction, utterance)
					.await
					.map(Some)
			},
			|| None,
		)
		.await;

		match reply {
			Some(text) if !text.trim().is_empty() => text,
			Some(_) => {
				tracing::warn!(stage = "synthesis", "Completion returned no text.");

				no_reply_fallback(assistant)
			},
			None => unavailable_fallback(assistant),
		}
	}
}

pub fn build_instruction(
	assistant: &Assistant,
	utterance: &str,
	filters: &FilterSet,
	found: usize,
	digest: &str,
) -> String {
	let Assistant { persona, site, market, .. } = assistant;
	let applied = filters.describe();

	format!(
		r#"User query: "{utterance}"
Applied filters: {applied}
Found: {found} matching properties

You are {persona}, the friendly AI assistant of {site}. You help people with {market} real estate.

Top matching properties:
{digest}

Write a natural, helpful reply in English that:
1. Greets the user warmly as {persona} from {site}
2. Acknowledges their search request
3. Says how many properties were found
4. Highlights key details of the top 2-3 properties conversationally
5. Mentions the applied filters naturally, if there are any
6. Suggests relaxing the criteria or alternatives if nothing was found
7. Offers to help with more specific searches
8. Keeps a friendly, professional and helpful tone

Make the reply feel conversational, not like a list."#
	)
}

/// Numbered summary of the first `size` matches, each showing at most `amenities` amenities.
pub fn render_digest(
	matches: &[PropertyRecord],
	currency: &str,
	size: usize,
	amenities: usize,
) -> String {
	let mut out = String::new();

	for (idx, record) in matches.iter().take(size).enumerate() {
		let _ = writeln!(out, "{}. **{}**", idx + 1, record.name);
		let _ = writeln!(out, "   Location: {}", text_or_missing(&record.area));
		let _ = writeln!(out, "   Developer: {}", text_or_missing(&record.developer));
		let _ = writeln!(out, "   Type: {}", text_or_missing(&record.property_type));
		let _ = writeln!(out, "   Bedrooms: {}", count_or_missing(record.bedrooms));
		let _ = writeln!(out, "   Bathrooms: {}", count_or_missing(record.bathrooms));
		let _ = writeln!(out, "   Price: {}", price_range(record, currency));
		let _ = writeln!(
			out,
			"   Area: {}",
			record
				.area_sqft
				.map(|sqft| format!("{} sqft", group_thousands(sqft)))
				.unwrap_or_else(|| NOT_SPECIFIED.to_string())
		);
		let _ = writeln!(out, "   Status: {}", text_or_missing(&record.status));
		let _ = writeln!(out, "   Availability: {}", text_or_missing(&record.sale_status));

		if !record.amenities.is_empty() {
			let shown = record.amenities.iter().take(amenities).cloned().collect::<Vec<_>>();
			let more = if record.amenities.len() > amenities { "..." } else { "" };

			let _ = writeln!(out, "   Amenities: {}{more}", shown.join(", "));
		}
	}

	out
}

pub fn no_reply_fallback(assistant: &Assistant) -> String {
	format!(
		"Hi! I'm {} from {}. I couldn't process your request right now, but I'm here to help you \
		 find the perfect property. Could you please try again?",
		assistant.persona, assistant.site
	)
}

pub fn unavailable_fallback(assistant: &Assistant) -> String {
	format!(
		"Hi! I'm {} from {}. I'm experiencing some technical difficulties right now, but I'm here \
		 to help you find your dream property. Please try your search again!",
		assistant.persona, assistant.site
	)
}

/// Formats a positive amount as `4,500,000`, keeping up to two decimals.
pub fn group_thousands(value: f64) -> String {
	let fixed = format!("{:.2}", value.abs());
	let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
	let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);

	if value < 0.0 {
		grouped.push('-');
	}

	for (idx, digit) in whole.chars().enumerate() {
		if idx > 0 && (whole.len() - idx) % 3 == 0 {
			grouped.push(',');
		}

		grouped.push(digit);
	}

	let fraction = fraction.trim_end_matches('0');

	if !fraction.is_empty() {
		grouped.push('.');
		grouped.push_str(fraction);
	}

	grouped
}

fn price_range(record: &PropertyRecord, currency: &str) -> String {
	let side = |price: Option<f64>| {
		price
			.map(|price| format!("{currency} {}", group_thousands(price)))
			.unwrap_or_else(|| NOT_SPECIFIED.to_string())
	};

	match (record.min_price, record.max_price) {
		(None, None) => NOT_SPECIFIED.to_string(),
		(min, max) => format!("{} - {}", side(min), side(max)),
	}
}

fn text_or_missing(value: &Option<String>) -> &str {
	value.as_deref().unwrap_or(NOT_SPECIFIED)
}

fn count_or_missing(value: Option<u32>) -> String {
	value.map(|count| count.to_string()).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}
