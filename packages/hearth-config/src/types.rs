use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	pub assistant: Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// One of "production" or "development". Only development responses carry error details.
	#[serde(default = "default_environment")]
	pub environment: String,
}
impl Service {
	pub fn exposes_error_details(&self) -> bool {
		self.environment == "development"
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// One of "postgres" or "file".
	pub backend: String,
	pub postgres: Option<Postgres>,
	/// JSON array of property records, read once at startup by the "file" backend.
	pub catalog_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub llm_extractor: LlmProviderConfig,
	pub llm_responder: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Upper bound on records fetched from the catalog and counted as matches.
	pub result_cap: u32,
	/// Upper bound on records returned to the caller for display.
	pub display_cap: u32,
	/// Number of top results described to the responder.
	pub digest_size: u32,
	/// Number of amenities listed per digested result.
	pub digest_amenities: u32,
	/// Applied by the pipeline to each completion call, on top of the provider's own timeout.
	pub completion_timeout_ms: u64,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			result_cap: 50,
			display_cap: 20,
			digest_size: 3,
			digest_amenities: 3,
			completion_timeout_ms: 30_000,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
	pub persona: String,
	pub site: String,
	pub market: String,
	pub currency: String,
}

fn default_environment() -> String {
	"production".to_string()
}
