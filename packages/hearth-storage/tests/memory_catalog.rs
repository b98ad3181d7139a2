use std::path::PathBuf;

use hearth_domain::{
	filters::FilterSet,
	query::PropertyQuery,
	sort::{SortField, SortKey, SortSpec},
};
use hearth_storage::memory::MemoryCatalog;

fn example_catalog() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/catalog.example.json")
}

#[test]
fn example_catalog_loads_and_answers_queries() {
	let catalog = MemoryCatalog::from_path(&example_catalog()).expect("Failed to load catalog.");

	assert_eq!(catalog.len(), 3);

	let filters = FilterSet { amenities: vec!["pool".to_string()], ..Default::default() };
	let sort = SortSpec { keys: vec![SortKey::desc(SortField::AreaSqft)] };
	let hits = catalog.find(&PropertyQuery::build(&filters), &sort, 50);
	let names = hits.iter().map(|hit| hit.name.as_str()).collect::<Vec<_>>();

	assert_eq!(names, vec!["Akoya Villa", "Marina Heights 2BR", "Creek Edge Studio"]);
	assert_eq!(hits[2].bedrooms, None);
}

#[test]
fn example_catalog_filter_options() {
	let catalog = MemoryCatalog::from_path(&example_catalog()).expect("Failed to load catalog.");
	let options = catalog.filter_options();

	assert_eq!(options.areas, vec!["Damac Hills", "Dubai Creek Harbour", "Dubai Marina"]);
	assert_eq!(options.developers, vec!["Damac Properties", "Emaar"]);
	assert_eq!(options.bedroom_options, vec![2, 3]);
	assert_eq!(options.price_range.min, Some(750_000.0));
	assert_eq!(options.price_range.max, Some(12_000_000.0));
}

#[test]
fn malformed_catalog_is_a_decode_error() {
	let path = std::env::temp_dir().join(format!("hearth-bad-catalog-{}.json", std::process::id()));

	std::fs::write(&path, "{\"not\": \"an array\"}").expect("Failed to write fixture.");

	let err = MemoryCatalog::from_path(&path).expect_err("Expected decode failure.");

	assert!(matches!(err, hearth_storage::Error::Decode { .. }));

	let _ = std::fs::remove_file(&path);
}
