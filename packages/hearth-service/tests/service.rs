use std::{
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use serde_json::{Map, Value};

use hearth_config::{
	Assistant, Config, LlmProviderConfig, Providers as ProviderConfigs, Search, Service, Storage,
};
use hearth_domain::{
	property::{FilterOptions, PropertyRecord},
	query::PropertyQuery,
	sort::SortSpec,
};
use hearth_service::{
	BoxFuture, Error, HearthService, PropertyCatalog, Providers, SearchRequest, TextCompleter,
	respond,
};
use hearth_storage::memory::MemoryCatalog;
use hearth_testkit::fixtures;

const DAMAC_FILTERS: &str = r#"```json
{"area": "Damac Hills", "property_type": "Villa", "bedrooms": 3, "max_price": 10000000, "developer": ""}
```"#;

enum Script {
	Reply(&'static str),
	Fail,
	Hang,
}

struct StubCompleter {
	script: Script,
	calls: AtomicUsize,
	instructions: Mutex<Vec<String>>,
}
impl StubCompleter {
	fn new(script: Script) -> Arc<Self> {
		Arc::new(Self { script, calls: AtomicUsize::new(0), instructions: Mutex::new(Vec::new()) })
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn last_instruction(&self) -> String {
		self.instructions
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.last()
			.cloned()
			.expect("Expected a recorded instruction.")
	}
}
impl TextCompleter for StubCompleter {
	fn complete<'a>(
		&'a self,
		_: &'a LlmProviderConfig,
		instruction: &'a str,
		_: &'a str,
	) -> BoxFuture<'a, hearth_providers::Result<String>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.instructions
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push(instruction.to_string());

		Box::pin(async move {
			match self.script {
				Script::Reply(text) => Ok(text.to_string()),
				Script::Fail => Err(hearth_providers::Error::InvalidResponse {
					message: "Stub completion failure.".to_string(),
				}),
				Script::Hang => {
					tokio::time::sleep(Duration::from_secs(30)).await;

					Ok("Too late.".to_string())
				},
			}
		})
	}
}

struct CountingCatalog {
	inner: MemoryCatalog,
	calls: AtomicUsize,
}
impl CountingCatalog {
	fn new(records: Vec<PropertyRecord>) -> Arc<Self> {
		Arc::new(Self { inner: MemoryCatalog::new(records), calls: AtomicUsize::new(0) })
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl PropertyCatalog for CountingCatalog {
	fn find<'a>(
		&'a self,
		query: &'a PropertyQuery,
		sort: &'a SortSpec,
		limit: usize,
	) -> BoxFuture<'a, hearth_service::Result<Vec<PropertyRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		PropertyCatalog::find(&self.inner, query, sort, limit)
	}

	fn filter_options(&self) -> BoxFuture<'_, hearth_service::Result<FilterOptions>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		PropertyCatalog::filter_options(&self.inner)
	}
}

struct BrokenCatalog;
impl PropertyCatalog for BrokenCatalog {
	fn find<'a>(
		&'a self,
		_: &'a PropertyQuery,
		_: &'a SortSpec,
		_: usize,
	) -> BoxFuture<'a, hearth_service::Result<Vec<PropertyRecord>>> {
		Box::pin(async { Err(Error::Catalog { message: "Connection refused.".to_string() }) })
	}

	fn filter_options(&self) -> BoxFuture<'_, hearth_service::Result<FilterOptions>> {
		Box::pin(async { Err(Error::Catalog { message: "Connection refused.".to_string() }) })
	}
}

fn provider(temperature: f32) -> LlmProviderConfig {
	LlmProviderConfig {
		provider_id: "stub".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/chat/completions".to_string(),
		model: "stub-model".to_string(),
		temperature,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			environment: "development".to_string(),
		},
		storage: Storage { backend: "file".to_string(), postgres: None, catalog_file: None },
		providers: ProviderConfigs { llm_extractor: provider(0.0), llm_responder: provider(0.7) },
		search: Search { completion_timeout_ms: 200, ..Default::default() },
		assistant: Assistant {
			persona: "Shora".to_string(),
			site: "RoreReality.ae".to_string(),
			market: "Dubai".to_string(),
			currency: "AED".to_string(),
		},
	}
}

struct Harness {
	service: HearthService,
	extractor: Arc<StubCompleter>,
	responder: Arc<StubCompleter>,
	catalog: Arc<CountingCatalog>,
}

fn harness(records: Vec<PropertyRecord>, extraction: Script, synthesis: Script) -> Harness {
	let extractor = StubCompleter::new(extraction);
	let responder = StubCompleter::new(synthesis);
	let catalog = CountingCatalog::new(records);
	let service = HearthService::with_providers(
		test_config(),
		catalog.clone(),
		Providers::new(extractor.clone(), responder.clone()),
	);

	Harness { service, extractor, responder, catalog }
}

fn request(msg: &str) -> SearchRequest {
	SearchRequest { msg: msg.to_string() }
}

#[tokio::test]
async fn damac_request_without_matches_reports_zero() {
	let records = fixtures::sample_properties()
		.into_iter()
		.filter(|record| record.name != "Akoya Villa")
		.collect();
	let h = harness(
		records,
		Script::Reply(DAMAC_FILTERS),
		Script::Reply("Nothing yet. Shall we widen the budget or try a nearby community?"),
	);
	let response = h
		.service
		.search(request("3 bedroom villa in Damac Hills under 10000000"))
		.await
		.expect("Search should succeed.");

	assert_eq!(
		serde_json::to_value(&response.search_summary.filters_applied)
			.expect("Filters should serialize."),
		serde_json::json!({
			"area": "Damac Hills",
			"property_type": "Villa",
			"bedrooms": 3,
			"max_price": 10000000,
		})
	);
	assert_eq!(response.search_summary.total_found, 0);
	assert_eq!(response.search_summary.showing, 0);
	assert!(response.properties.is_empty());
	assert_eq!(
		response.message,
		"Nothing yet. Shall we widen the budget or try a nearby community?"
	);
	assert!(h.responder.last_instruction().contains("Found: 0 matching properties"));
	assert!(h.responder.last_instruction().contains(
		"Applied filters: area: \"Damac Hills\", property_type: \"Villa\", bedrooms: 3, max_price: 10000000"
	));
	assert_eq!(h.extractor.calls(), 1);
	assert_eq!(h.responder.calls(), 1);
}

#[tokio::test]
async fn damac_request_finds_the_villa() {
	let h = harness(
		fixtures::sample_properties(),
		Script::Reply(DAMAC_FILTERS),
		Script::Reply("I found Akoya Villa for you."),
	);
	let response = h
		.service
		.search(request("  3 bedroom villa in Damac Hills under 10000000 "))
		.await
		.expect("Search should succeed.");

	assert_eq!(response.search_summary.query, "3 bedroom villa in Damac Hills under 10000000");
	assert_eq!(response.search_summary.total_found, 1);
	assert_eq!(response.properties[0].name, "Akoya Villa");
	assert_eq!(response.metadata.compiled_query["op"], "and");
	assert_eq!(
		response.metadata.sort_applied,
		serde_json::json!([
			{ "field": "status", "direction": "asc" },
			{ "field": "min_price", "direction": "asc" },
		])
	);
	assert!(h.responder.last_instruction().contains("1. **Akoya Villa**"));
	assert!(h.responder.last_instruction().contains("Price: AED 4,500,000 - AED 12,000,000"));
}

#[tokio::test]
async fn blank_query_is_rejected_before_any_call() {
	for msg in ["", "   ", "\n\t"] {
		let h = harness(
			fixtures::sample_properties(),
			Script::Reply("{}"),
			Script::Reply("Hello."),
		);
		let err = h.service.search(request(msg)).await.expect_err("Blank query should fail.");

		assert!(matches!(err, Error::InvalidRequest { .. }));
		assert_eq!(h.extractor.calls(), 0);
		assert_eq!(h.responder.calls(), 0);
		assert_eq!(h.catalog.calls(), 0);
	}
}

#[tokio::test]
async fn unparseable_extraction_searches_everything() {
	let h = harness(
		fixtures::sample_properties(),
		Script::Reply("Sorry, I am not sure what you mean."),
		Script::Reply("Here is everything we have."),
	);
	let response =
		h.service.search(request("surprise me")).await.expect("Search should succeed.");

	assert_eq!(response.search_summary.filters_applied, Default::default());
	assert_eq!(response.search_summary.total_found, 5);
	assert_eq!(response.metadata.compiled_query, serde_json::json!({ "op": "all" }));
	assert!(h.responder.last_instruction().contains("Applied filters: No specific filters"));
	// Default ranking groups by status in byte order, cheapest first inside each group.
	assert_eq!(
		response.properties.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
		vec![
			"Creek Edge Studio",
			"Damac Hills Townhouse",
			"Marina Heights 2BR",
			"Akoya Villa",
			"Sobha Hartland Penthouse",
		]
	);
}

#[tokio::test]
async fn failed_extraction_degrades_to_empty_filters() {
	let h = harness(fixtures::sample_properties(), Script::Fail, Script::Reply("Hi there."));
	let response = h
		.service
		.search(request("cheapest place in town"))
		.await
		.expect("Search should succeed.");

	assert!(response.search_summary.filters_applied.is_empty());
	assert_eq!(response.properties[0].name, "Creek Edge Studio");
	assert_eq!(response.message, "Hi there.");
}

#[tokio::test]
async fn stalled_extraction_times_out_and_degrades() {
	let h = harness(fixtures::sample_properties(), Script::Hang, Script::Reply("Hi there."));
	let response = tokio::time::timeout(
		Duration::from_secs(5),
		h.service.search(request("villa with a pool")),
	)
	.await
	.expect("Search must not hang.")
	.expect("Search should succeed.");

	assert!(response.search_summary.filters_applied.is_empty());
	assert_eq!(response.search_summary.total_found, 5);
}

#[tokio::test]
async fn failed_synthesis_uses_technical_difficulties_reply() {
	let h = harness(fixtures::sample_properties(), Script::Reply("{}"), Script::Fail);
	let response = h.service.search(request("anything")).await.expect("Search should succeed.");
	let cfg = test_config();

	assert_eq!(response.message, respond::unavailable_fallback(&cfg.assistant));
	assert!(response.success);
}

#[tokio::test]
async fn stalled_synthesis_uses_technical_difficulties_reply() {
	let h = harness(fixtures::sample_properties(), Script::Reply("{}"), Script::Hang);
	let response = h.service.search(request("anything")).await.expect("Search should succeed.");

	assert!(response.message.contains("technical difficulties"));
	assert_eq!(response.properties.len(), 5);
}

#[tokio::test]
async fn empty_synthesis_uses_could_not_process_reply() {
	let h = harness(fixtures::sample_properties(), Script::Reply("{}"), Script::Reply("  "));
	let response = h.service.search(request("anything")).await.expect("Search should succeed.");
	let cfg = test_config();

	assert_eq!(response.message, respond::no_reply_fallback(&cfg.assistant));
}

#[tokio::test]
async fn counts_up_to_result_cap_and_shows_up_to_display_cap() {
	let h = harness(
		fixtures::bulk_properties(60),
		Script::Reply(r#"{"area": "Marina"}"#),
		Script::Reply("Plenty to choose from."),
	);
	let response =
		h.service.search(request("flats in the marina")).await.expect("Search should succeed.");

	assert_eq!(response.search_summary.total_found, 50);
	assert_eq!(response.search_summary.showing, 20);
	assert_eq!(response.properties.len(), 20);
	assert!(h.responder.last_instruction().contains("Found: 50 matching properties"));
	assert!(!h.responder.last_instruction().contains("4. **"));
}

#[tokio::test]
async fn sort_keywords_reorder_results() {
	let h = harness(
		fixtures::sample_properties(),
		Script::Reply("{}"),
		Script::Reply("The biggest first."),
	);
	let response =
		h.service.search(request("show me the most spacious homes")).await.expect("Search.");

	assert_eq!(response.properties[0].name, "Sobha Hartland Penthouse");
	assert_eq!(
		response.metadata.sort_applied,
		serde_json::json!([{ "field": "area_sqft", "direction": "desc" }])
	);
}

#[tokio::test]
async fn catalog_failure_surfaces_as_error() {
	let extractor = StubCompleter::new(Script::Reply("{}"));
	let responder = StubCompleter::new(Script::Reply("Hello."));
	let service = HearthService::with_providers(
		test_config(),
		Arc::new(BrokenCatalog),
		Providers::new(extractor, responder.clone()),
	);
	let err = service.search(request("villa")).await.expect_err("Catalog failure should surface.");

	assert!(matches!(err, Error::Catalog { .. }));
	assert_eq!(responder.calls(), 0);
}

#[tokio::test]
async fn filter_options_aggregate_the_catalog() {
	let h = harness(fixtures::sample_properties(), Script::Fail, Script::Fail);
	let response = h.service.filter_options().await.expect("Filter options should load.");
	let options = response.available_filters;

	assert!(response.success);
	assert_eq!(options.property_types, vec!["Apartment", "Penthouse", "Studio", "Townhouse", "Villa"]);
	assert_eq!(options.statuses, vec!["Off Plan", "Ready", "Under Construction"]);
	assert_eq!(options.bedroom_options, vec![2, 3, 4]);
	assert_eq!(options.price_range.min, Some(750_000.0));
	assert_eq!(options.price_range.max, Some(18_000_000.0));

	let value: Value = serde_json::to_value(&options).expect("Options should serialize.");

	assert_eq!(value["price_range"], serde_json::json!({ "min": 750000.0, "max": 18000000.0 }));
}
