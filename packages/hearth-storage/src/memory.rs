use std::{fs, path::Path};

use crate::{Error, Result};
use hearth_domain::{
	property::{FilterOptions, PropertyRecord},
	query::PropertyQuery,
	sort::SortSpec,
};

/// Catalog held in process, loaded from a JSON array of listings.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
	records: Vec<PropertyRecord>,
}
impl MemoryCatalog {
	pub fn new(records: Vec<PropertyRecord>) -> Self {
		Self { records }
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
		let records: Vec<PropertyRecord> = serde_json::from_str(&raw)
			.map_err(|source| Error::Decode { path: path.to_path_buf(), source })?;

		tracing::info!(path = %path.display(), count = records.len(), "Loaded property catalog.");

		Ok(Self::new(records))
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Matches, ranks and truncates. The sort is stable, so ties keep catalog order.
	pub fn find(&self, query: &PropertyQuery, sort: &SortSpec, limit: usize) -> Vec<PropertyRecord> {
		let mut hits =
			self.records.iter().filter(|record| query.matches(record)).cloned().collect::<Vec<_>>();

		hits.sort_by(|a, b| sort.compare(a, b));
		hits.truncate(limit);

		hits
	}

	pub fn filter_options(&self) -> FilterOptions {
		FilterOptions::from_records(&self.records)
	}
}
