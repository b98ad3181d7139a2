use serde::Serializer;

// Largest magnitude below which every whole f64 is exact as an i64.
const EXACT_WHOLE_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Writes whole amounts as integers so `10000000.0` renders as `10000000`.
pub(crate) fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(amount) if amount.fract() == 0.0 && amount.abs() < EXACT_WHOLE_LIMIT => {
			serializer.serialize_i64(*amount as i64)
		},
		Some(amount) => serializer.serialize_f64(*amount),
		None => serializer.serialize_none(),
	}
}
