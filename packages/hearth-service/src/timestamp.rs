//! `response_time` on the wire: UTC with millisecond precision, e.g. `2026-10-19T08:30:00.125Z`.

use serde::{Deserialize, Deserializer, Serializer};
use time::{
	OffsetDateTime, UtcOffset,
	format_description::{BorrowedFormatItem, well_known::Rfc3339},
	macros::format_description,
};

const UTC_MILLIS: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted =
		value.to_offset(UtcOffset::UTC).format(UTC_MILLIS).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

/// Accepts any RFC 3339 timestamp, not only the millisecond form written above.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	OffsetDateTime::parse(&raw, &Rfc3339).map_err(serde::de::Error::custom)
}
