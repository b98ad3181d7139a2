use serde::{Deserialize, Serialize};

use crate::{HearthService, Result};
use hearth_domain::property::FilterOptions;

pub const FILTER_OPTIONS_FAILURE: &str = "Could not fetch filter options";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
	pub success: bool,
	pub available_filters: FilterOptions,
}

impl HearthService {
	/// Distinct values of each filterable field, aggregated over the whole catalog.
	pub async fn filter_options(&self) -> Result<FilterOptionsResponse> {
		let available_filters = self
			.catalog
			.filter_options()
			.await
			.inspect_err(|err| tracing::error!(error = %err, "Filter options lookup failed."))?;

		Ok(FilterOptionsResponse { success: true, available_filters })
	}
}
