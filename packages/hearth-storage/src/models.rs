use uuid::Uuid;

use hearth_domain::property::PropertyRecord;

#[derive(Debug, sqlx::FromRow)]
pub struct PropertyRow {
	pub property_id: Uuid,
	pub name: String,
	pub area: Option<String>,
	pub developer: Option<String>,
	pub property_type: Option<String>,
	pub bedrooms: Option<i32>,
	pub bathrooms: Option<i32>,
	pub min_price: Option<f64>,
	pub max_price: Option<f64>,
	pub area_sqft: Option<f64>,
	pub floor: Option<i32>,
	pub status: Option<String>,
	pub sale_status: Option<String>,
	pub furnished: Option<String>,
	pub payment_plan: Option<String>,
	pub amenities: Vec<String>,
	pub description: Option<String>,
}
impl From<PropertyRow> for PropertyRecord {
	fn from(row: PropertyRow) -> Self {
		Self {
			id: row.property_id.to_string(),
			name: row.name,
			area: row.area,
			developer: row.developer,
			property_type: row.property_type,
			bedrooms: row.bedrooms.and_then(|v| u32::try_from(v).ok()),
			bathrooms: row.bathrooms.and_then(|v| u32::try_from(v).ok()),
			min_price: row.min_price,
			max_price: row.max_price,
			area_sqft: row.area_sqft,
			floor: row.floor.and_then(|v| u32::try_from(v).ok()),
			status: row.status,
			sale_status: row.sale_status,
			furnished: row.furnished,
			payment_plan: row.payment_plan,
			amenities: row.amenities,
			description: row.description,
		}
	}
}
