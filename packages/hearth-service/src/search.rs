use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::{Error, HearthService, Result};
use hearth_domain::{
	filters::FilterSet, property::PropertyRecord, query::PropertyQuery, sort::select_sort,
};

pub const EMPTY_QUERY_MESSAGE: &str = "Please provide a search message!";
pub const EMPTY_QUERY_EXAMPLE: &str = "Try: '3 bedroom villa in Damac Hills under 2 crore'";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub success: bool,
	pub message: String,
	pub search_summary: SearchSummary,
	pub properties: Vec<PropertyRecord>,
	pub metadata: SearchMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSummary {
	pub query: String,
	pub filters_applied: FilterSet,
	/// Matched records, bounded by the catalog result cap.
	pub total_found: usize,
	/// Records included in `properties`.
	pub showing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
	pub compiled_query: Value,
	pub sort_applied: Value,
	#[serde(with = "crate::timestamp")]
	pub response_time: OffsetDateTime,
}

impl HearthService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let utterance = req.msg.trim();

		if utterance.is_empty() {
			return Err(Error::InvalidRequest { message: EMPTY_QUERY_MESSAGE.to_string() });
		}

		tracing::info!(query = utterance, "Search received.");

		let filters = self.extract_filters(utterance).await;
		let query = PropertyQuery::build(&filters);
		let sort = select_sort(utterance, &filters);
		let result_cap = self.cfg.search.result_cap as usize;
		let mut matches = self
			.catalog
			.find(&query, &sort, result_cap)
			.await
			.inspect_err(|err| tracing::error!(error = %err, "Catalog lookup failed."))?;
		let total_found = matches.len();

		tracing::info!(result_count = total_found, "Catalog lookup finished.");

		let message = self.synthesize(utterance, &matches, &filters).await;

		matches.truncate(self.cfg.search.display_cap as usize);

		let showing = matches.len();

		Ok(SearchResponse {
			success: true,
			message,
			search_summary: SearchSummary {
				query: utterance.to_string(),
				filters_applied: filters,
				total_found,
				showing,
			},
			properties: matches,
			metadata: SearchMetadata {
				compiled_query: query.to_value(),
				sort_applied: sort.to_value(),
				response_time: OffsetDateTime::now_utc(),
			},
		})
	}
}
