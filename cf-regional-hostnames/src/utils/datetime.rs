//! Serde adapter for `Option<DateTime<Utc>>` fields.
//!
//! - Serialization: `Some` → RFC 3339 string in UTC with a `Z` suffix,
//!   `None` → `null` (callers pair this with `skip_serializing_if`).
//! - Deserialization: RFC 3339 string, Unix timestamp (seconds or
//!   milliseconds), or `null` / missing → `None`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Formats a timestamp the way the API emits it.
pub fn format_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[allow(clippy::ref_option)]
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&format_rfc3339(dt)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireTimestamp {
        Text(String),
        Unix(i64),
    }

    match Option::<WireTimestamp>::deserialize(deserializer)? {
        Some(WireTimestamp::Text(s)) if s.is_empty() => Ok(None),
        Some(WireTimestamp::Text(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("invalid RFC 3339 timestamp '{s}': {e}"))),
        Some(WireTimestamp::Unix(ts)) => from_unix(ts)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("invalid Unix timestamp {ts}"))),
        None => Ok(None),
    }
}

/// Values above 10^11 are treated as milliseconds.
fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
