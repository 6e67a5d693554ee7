//! Lenient timestamp decoding.
//!
//! The backend sends RFC 3339 timestamps for most columns, naive ISO 8601
//! timestamps for some, and bare dates where a computed record borrows its
//! measurement date as `created_at`. All three decode to a [`Timestamp`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serializer};

pub type Timestamp = DateTime<FixedOffset>;

/// Parses any timestamp shape the backend is known to emit. Naive values are
/// read as UTC.
pub fn parse(value: &str) -> Option<Timestamp> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {raw}")))
}

/// Same as the parent module, for optional columns. Use together with
/// `#[serde(default)]` so absent keys decode to `None`.
pub mod option {
    use super::{parse, Timestamp};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let parsed = parse("2025-03-01T08:30:00+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.hour(), 8);
    }

    #[test]
    fn test_parse_naive_datetime_is_utc() {
        let parsed = parse("2025-03-01T08:30:00.123456").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let parsed = parse("2025-03-01").unwrap();
        assert_eq!(parsed.day(), 1);
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
