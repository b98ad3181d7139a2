use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::PropertyRow};
use hearth_domain::{
	property::{FilterOptions, PriceRange, PropertyRecord},
	query::{Predicate, PropertyQuery},
	sort::{Direction, SortField, SortSpec},
};

const PROPERTY_COLUMNS: &str = "\
property_id, name, area, developer, property_type, bedrooms, bathrooms, min_price, max_price, \
area_sqft, floor, status, sale_status, furnished, payment_plan, amenities, description";

type OptionsRow =
	(Vec<String>, Vec<String>, Vec<String>, Vec<String>, Vec<i32>, Option<f64>, Option<f64>);

pub async fn find_properties(
	db: &Db,
	query: &PropertyQuery,
	sort: &SortSpec,
	limit: usize,
) -> Result<Vec<PropertyRecord>> {
	let mut builder = build_select(query, sort, limit)?;
	let rows: Vec<PropertyRow> = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows.into_iter().map(PropertyRecord::from).collect())
}

pub async fn filter_options(db: &Db) -> Result<FilterOptions> {
	let row: OptionsRow = sqlx::query_as(
		"\
SELECT
	COALESCE(array_agg(DISTINCT area) FILTER (WHERE area IS NOT NULL), '{}'),
	COALESCE(array_agg(DISTINCT developer) FILTER (WHERE developer IS NOT NULL), '{}'),
	COALESCE(array_agg(DISTINCT property_type) FILTER (WHERE property_type IS NOT NULL), '{}'),
	COALESCE(array_agg(DISTINCT status) FILTER (WHERE status IS NOT NULL), '{}'),
	COALESCE(array_agg(DISTINCT bedrooms) FILTER (WHERE bedrooms IS NOT NULL), '{}'),
	MIN(min_price) FILTER (WHERE min_price <> 0),
	MAX(max_price) FILTER (WHERE max_price <> 0)
FROM properties",
	)
	.fetch_one(&db.pool)
	.await?;
	let (areas, developers, property_types, statuses, bedrooms, min, max) = row;
	let options = FilterOptions {
		areas,
		developers,
		property_types,
		statuses,
		bedroom_options: bedrooms.into_iter().filter_map(|v| u32::try_from(v).ok()).collect(),
		price_range: PriceRange { min, max },
	};

	Ok(options.normalized())
}

/// Inserts a listing and returns its id. A record id that is not a UUID gets a fresh one.
pub async fn insert_property(db: &Db, record: &PropertyRecord) -> Result<Uuid> {
	let property_id = Uuid::parse_str(&record.id).unwrap_or_else(|_| Uuid::new_v4());

	sqlx::query(
		"\
INSERT INTO properties (
	property_id, name, area, developer, property_type, bedrooms, bathrooms, min_price, max_price,
	area_sqft, floor, status, sale_status, furnished, payment_plan, amenities, description
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
	)
	.bind(property_id)
	.bind(&record.name)
	.bind(&record.area)
	.bind(&record.developer)
	.bind(&record.property_type)
	.bind(to_column_int("bedrooms", record.bedrooms)?)
	.bind(to_column_int("bathrooms", record.bathrooms)?)
	.bind(record.min_price)
	.bind(record.max_price)
	.bind(record.area_sqft)
	.bind(to_column_int("floor", record.floor)?)
	.bind(&record.status)
	.bind(&record.sale_status)
	.bind(&record.furnished)
	.bind(&record.payment_plan)
	.bind(&record.amenities)
	.bind(&record.description)
	.execute(&db.pool)
	.await?;

	Ok(property_id)
}

/// Renders the full catalog read for a compiled query.
pub fn build_select(
	query: &PropertyQuery,
	sort: &SortSpec,
	limit: usize,
) -> Result<QueryBuilder<'static, Postgres>> {
	let limit = i64::try_from(limit)
		.map_err(|_| Error::InvalidArgument(format!("limit {limit} is out of range.")))?;
	let mut builder = QueryBuilder::new(format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE "));

	push_predicate(&mut builder, &query.predicate);
	builder.push(" ORDER BY ");

	for key in &sort.keys {
		let column = match key.field {
			SortField::Status => "status COLLATE \"C\"",
			field => field.as_str(),
		};
		let direction = match key.direction {
			Direction::Ascending => "ASC NULLS FIRST",
			Direction::Descending => "DESC NULLS LAST",
		};

		builder.push(column).push(" ").push(direction).push(", ");
	}

	builder.push("property_id LIMIT ");
	builder.push_bind(limit);

	Ok(builder)
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
	match predicate {
		Predicate::All => {
			builder.push("TRUE");
		},
		Predicate::And(nodes) => push_group(builder, nodes, " AND ", "TRUE"),
		Predicate::Or(nodes) => push_group(builder, nodes, " OR ", "FALSE"),
		Predicate::Contains { field, value } => {
			builder.push("strpos(lower(").push(field.as_str()).push("), lower(");
			builder.push_bind(value.clone());
			builder.push(")) > 0");
		},
		Predicate::Eq { field, value } => push_comparison(builder, field.as_str(), "=", *value),
		Predicate::Gte { field, value } => push_comparison(builder, field.as_str(), ">=", *value),
		Predicate::Lte { field, value } => push_comparison(builder, field.as_str(), "<=", *value),
		Predicate::HasAmenity { tag } => {
			builder.push(
				"EXISTS (SELECT 1 FROM unnest(amenities) AS amenity WHERE strpos(lower(amenity), lower(",
			);
			builder.push_bind(tag.clone());
			builder.push(")) > 0)");
		},
	}
}

fn push_group(
	builder: &mut QueryBuilder<'static, Postgres>,
	nodes: &[Predicate],
	separator: &str,
	identity: &str,
) {
	if nodes.is_empty() {
		builder.push(identity);

		return;
	}

	builder.push("(");

	for (idx, node) in nodes.iter().enumerate() {
		if idx > 0 {
			builder.push(separator);
		}

		push_predicate(builder, node);
	}

	builder.push(")");
}

fn push_comparison(
	builder: &mut QueryBuilder<'static, Postgres>,
	column: &str,
	operator: &str,
	value: f64,
) {
	builder.push(column).push("::double precision ").push(operator).push(" ");
	builder.push_bind(value);
}

fn to_column_int(column: &str, value: Option<u32>) -> Result<Option<i32>> {
	value
		.map(|v| {
			i32::try_from(v)
				.map_err(|_| Error::InvalidArgument(format!("{column} value {v} is out of range.")))
		})
		.transpose()
}

#[cfg(test)]
mod tests {
	use super::*;
	use hearth_domain::{
		filters::FilterSet,
		sort::{DEFAULT_SORT, SortKey},
	};

	#[test]
	fn unconstrained_select_matches_everything() {
		let builder =
			build_select(&PropertyQuery::unconstrained(), &SortSpec::from(DEFAULT_SORT), 50)
				.expect("Select should render.");

		assert!(builder.sql().contains("FROM properties WHERE TRUE ORDER BY "));
		assert!(builder.sql().ends_with(
			"status COLLATE \"C\" ASC NULLS FIRST, min_price ASC NULLS FIRST, property_id LIMIT $1"
		));
	}

	#[test]
	fn filters_render_as_bound_predicates() {
		let filters = FilterSet {
			area: Some("Damac Hills".to_string()),
			bedrooms: Some(3),
			amenities: vec!["Pool".to_string()],
			..Default::default()
		};
		let sort = SortSpec { keys: vec![SortKey::desc(SortField::AreaSqft)] };
		let builder =
			build_select(&PropertyQuery::build(&filters), &sort, 20).expect("Select should render.");
		let sql = builder.sql();

		assert!(sql.contains("strpos(lower(area), lower($1)) > 0"));
		assert!(sql.contains("bedrooms::double precision = $2"));
		assert!(sql.contains("unnest(amenities) AS amenity WHERE strpos(lower(amenity), lower($3))"));
		assert!(sql.contains("area_sqft DESC NULLS LAST, property_id LIMIT $4"));
		assert!(!sql.contains("Damac"));
	}

	#[test]
	fn price_overlap_renders_both_branches() {
		let filters =
			FilterSet { min_price: Some(100.0), max_price: Some(200.0), ..Default::default() };
		let builder = build_select(&PropertyQuery::build(&filters), &SortSpec::from(DEFAULT_SORT), 5)
			.expect("Select should render.");

		assert!(builder.sql().contains(
			"((min_price::double precision <= $1 AND max_price::double precision >= $2) OR \
			 (min_price::double precision >= $3 AND min_price::double precision <= $4))"
		));
	}

	#[test]
	fn empty_groups_collapse_to_identity() {
		let query = PropertyQuery { predicate: Predicate::Or(Vec::new()) };
		let builder = build_select(&query, &SortSpec { keys: Vec::new() }, 1)
			.expect("Select should render.");

		assert!(builder.sql().contains("WHERE FALSE ORDER BY property_id LIMIT $1"));
	}
}
