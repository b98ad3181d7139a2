pub mod extract;
pub mod filter_options;
pub mod respond;
pub mod search;
pub mod stage;
pub mod timestamp;

mod error;

pub use error::{Error, Result};
pub use filter_options::FilterOptionsResponse;
pub use search::{SearchMetadata, SearchRequest, SearchResponse, SearchSummary};

use std::{future::Future, pin::Pin, sync::Arc};

use hearth_config::{Config, LlmProviderConfig};
use hearth_domain::{
	property::{FilterOptions, PropertyRecord},
	query::PropertyQuery,
	sort::SortSpec,
};
use hearth_providers::completion;
use hearth_storage::{db::Db, memory::MemoryCatalog, properties};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Single-turn text completion: a system instruction plus one user message in, free text out.
pub trait TextCompleter
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		instruction: &'a str,
		input: &'a str,
	) -> BoxFuture<'a, hearth_providers::Result<String>>;
}

/// Read-only access to the property listings.
pub trait PropertyCatalog
where
	Self: Send + Sync,
{
	fn find<'a>(
		&'a self,
		query: &'a PropertyQuery,
		sort: &'a SortSpec,
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<PropertyRecord>>>;

	fn filter_options(&self) -> BoxFuture<'_, Result<FilterOptions>>;
}

#[derive(Clone)]
pub struct Providers {
	pub extractor: Arc<dyn TextCompleter>,
	pub responder: Arc<dyn TextCompleter>,
}
impl Providers {
	pub fn new(extractor: Arc<dyn TextCompleter>, responder: Arc<dyn TextCompleter>) -> Self {
		Self { extractor, responder }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { extractor: provider.clone(), responder: provider }
	}
}

pub struct HearthService {
	pub cfg: Config,
	pub catalog: Arc<dyn PropertyCatalog>,
	pub providers: Providers,
}
impl HearthService {
	pub fn new(cfg: Config, catalog: Arc<dyn PropertyCatalog>) -> Self {
		Self { cfg, catalog, providers: Providers::default() }
	}

	pub fn with_providers(
		cfg: Config,
		catalog: Arc<dyn PropertyCatalog>,
		providers: Providers,
	) -> Self {
		Self { cfg, catalog, providers }
	}
}

struct DefaultProviders;
impl TextCompleter for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		instruction: &'a str,
		input: &'a str,
	) -> BoxFuture<'a, hearth_providers::Result<String>> {
		Box::pin(completion::complete(cfg, instruction, input))
	}
}

impl PropertyCatalog for Db {
	fn find<'a>(
		&'a self,
		query: &'a PropertyQuery,
		sort: &'a SortSpec,
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<PropertyRecord>>> {
		Box::pin(async move { Ok(properties::find_properties(self, query, sort, limit).await?) })
	}

	fn filter_options(&self) -> BoxFuture<'_, Result<FilterOptions>> {
		Box::pin(async move { Ok(properties::filter_options(self).await?) })
	}
}

impl PropertyCatalog for MemoryCatalog {
	fn find<'a>(
		&'a self,
		query: &'a PropertyQuery,
		sort: &'a SortSpec,
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<PropertyRecord>>> {
		Box::pin(async move { Ok(MemoryCatalog::find(self, query, sort, limit)) })
	}

	fn filter_options(&self) -> BoxFuture<'_, Result<FilterOptions>> {
		Box::pin(async move { Ok(MemoryCatalog::filter_options(self)) })
	}
}
