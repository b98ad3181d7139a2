use hearth_domain::property::PropertyRecord;

/// A small Dubai catalog. Ids are UUIDs so the rows survive a Postgres round trip unchanged.
pub fn sample_properties() -> Vec<PropertyRecord> {
	vec![
		PropertyRecord {
			id: "00000000-0000-4000-8000-000000000001".to_string(),
			name: "Akoya Villa".to_string(),
			area: Some("Damac Hills".to_string()),
			developer: Some("Damac Properties".to_string()),
			property_type: Some("Villa".to_string()),
			bedrooms: Some(3),
			bathrooms: Some(4),
			min_price: Some(4_500_000.0),
			max_price: Some(12_000_000.0),
			area_sqft: Some(3_200.0),
			floor: None,
			status: Some("Ready".to_string()),
			sale_status: Some("Available".to_string()),
			furnished: Some("Unfurnished".to_string()),
			payment_plan: Some("60/40".to_string()),
			amenities: vec![
				"Swimming Pool".to_string(),
				"Gym".to_string(),
				"Golf Course".to_string(),
				"Kids Play Area".to_string(),
			],
			description: Some("Golf-facing villa with a private garden.".to_string()),
		},
		PropertyRecord {
			id: "00000000-0000-4000-8000-000000000002".to_string(),
			name: "Marina Heights 2BR".to_string(),
			area: Some("Dubai Marina".to_string()),
			developer: Some("Emaar".to_string()),
			property_type: Some("Apartment".to_string()),
			bedrooms: Some(2),
			bathrooms: Some(2),
			min_price: Some(1_800_000.0),
			max_price: Some(2_400_000.0),
			area_sqft: Some(1_250.0),
			floor: Some(32),
			status: Some("Ready".to_string()),
			sale_status: Some("Available".to_string()),
			furnished: Some("Furnished".to_string()),
			payment_plan: None,
			amenities: vec!["Gym".to_string(), "Sea View".to_string(), "Pool".to_string()],
			description: Some("High floor apartment overlooking the marina.".to_string()),
		},
		PropertyRecord {
			id: "00000000-0000-4000-8000-000000000003".to_string(),
			name: "Creek Edge Studio".to_string(),
			area: Some("Dubai Creek Harbour".to_string()),
			developer: Some("Emaar".to_string()),
			property_type: Some("Studio".to_string()),
			bedrooms: None,
			bathrooms: Some(1),
			min_price: Some(750_000.0),
			max_price: Some(900_000.0),
			area_sqft: Some(450.0),
			floor: Some(5),
			status: Some("Off Plan".to_string()),
			sale_status: Some("Available".to_string()),
			furnished: None,
			payment_plan: Some("80/20".to_string()),
			amenities: vec!["Pool".to_string()],
			description: None,
		},
		PropertyRecord {
			id: "00000000-0000-4000-8000-000000000004".to_string(),
			name: "Sobha Hartland Penthouse".to_string(),
			area: Some("Mohammed Bin Rashid City".to_string()),
			developer: Some("Sobha Realty".to_string()),
			property_type: Some("Penthouse".to_string()),
			bedrooms: Some(4),
			bathrooms: Some(5),
			min_price: Some(15_000_000.0),
			max_price: Some(18_000_000.0),
			area_sqft: Some(6_100.0),
			floor: Some(40),
			status: Some("Under Construction".to_string()),
			sale_status: Some("Available".to_string()),
			furnished: Some("Semi-Furnished".to_string()),
			payment_plan: Some("70/30".to_string()),
			amenities: vec![
				"Private Pool".to_string(),
				"Gym".to_string(),
				"Concierge".to_string(),
			],
			description: Some("Full-floor penthouse with skyline views.".to_string()),
		},
		PropertyRecord {
			id: "00000000-0000-4000-8000-000000000005".to_string(),
			name: "Damac Hills Townhouse".to_string(),
			area: Some("Damac Hills".to_string()),
			developer: Some("Damac Properties".to_string()),
			property_type: Some("Townhouse".to_string()),
			bedrooms: Some(3),
			bathrooms: Some(3),
			min_price: Some(2_600_000.0),
			max_price: Some(3_100_000.0),
			area_sqft: Some(2_100.0),
			floor: None,
			status: Some("Off Plan".to_string()),
			sale_status: Some("Sold Out".to_string()),
			furnished: None,
			payment_plan: Some("60/40".to_string()),
			amenities: vec!["Park".to_string(), "Gym".to_string()],
			description: None,
		},
	]
}

/// `count` interchangeable Dubai Marina apartments for exercising result caps.
pub fn bulk_properties(count: usize) -> Vec<PropertyRecord> {
	(0..count)
		.map(|idx| PropertyRecord {
			id: format!("00000000-0000-4000-9000-{idx:012}"),
			name: format!("Marina Unit {idx}"),
			area: Some("Dubai Marina".to_string()),
			property_type: Some("Apartment".to_string()),
			bedrooms: Some(1),
			min_price: Some(1_000_000.0 + idx as f64 * 1_000.0),
			max_price: Some(1_200_000.0 + idx as f64 * 1_000.0),
			status: Some("Ready".to_string()),
			..Default::default()
		})
		.collect()
}
