//! Tolerant date handling for values coming back from the store.
//!
//! The store persists dates as strings and is not consistent about whether a
//! time component is attached. Everything here is total: malformed input
//! degrades to `None`, never to an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Trim an optional stored date string down to its calendar-date portion.
///
/// Accepts `YYYY-MM-DD` as well as combined date-time strings (`T` or space
/// separated); only the portion before the separator is used. Returns `None`
/// for null, empty, or unparseable input.
pub fn normalize_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse a stored timestamp, tolerating the representations the store has
/// been observed to return: RFC 3339 with offset, naive date-times with `T`
/// or space separators, and bare calendar dates (treated as midnight).
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Serde codec for optional timestamps that must survive heterogeneous store
/// representations. Serializes as ISO 8601; deserializes via
/// [`parse_datetime`], degrading malformed values to `None`.
pub mod flexible_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_datetime))
    }
}
