// src/utils/de.rs

//! Defensive deserializers for loosely-typed wire payloads.
//!
//! The grading platform's endpoints are not consistent about field types:
//! counts may arrive as strings, timestamps in several formats, and any of
//! them may be null or absent. All tolerance lives here so the rest of the
//! engine only ever sees clean values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a count that may arrive as a number, a string-typed number,
/// null, or be absent entirely. Anything unusable becomes 0.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Int(n)) if n > 0 => n as u32,
        Some(Raw::Float(f)) if f > 0.0 => f as u32,
        Some(Raw::Text(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Deserialize an optional timestamp, tolerating empty strings and
/// unrecognized formats. Unparsable input becomes `None`.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_datetime))
}

/// Deserialize an optional calendar date with the same tolerance.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Parse a timestamp string in any of the formats the platform emits.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc())
}

/// Parse a date string, accepting ISO and day-first forms.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "string_or_number")]
        count: u32,
        #[serde(default, deserialize_with = "lenient_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_count_from_string() {
        let h: Holder = serde_json::from_str(r#"{"count": "42", "at": null}"#).unwrap();
        assert_eq!(h.count, 42);
    }

    #[test]
    fn test_count_from_number() {
        let h: Holder = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(h.count, 7);
    }

    #[test]
    fn test_count_invalid_falls_back_to_zero() {
        let h: Holder = serde_json::from_str(r#"{"count": "lots"}"#).unwrap();
        assert_eq!(h.count, 0);
        let h: Holder = serde_json::from_str(r#"{"count": null}"#).unwrap();
        assert_eq!(h.count, 0);
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(h.count, 0);
    }

    #[test]
    fn test_datetime_formats() {
        assert!(parse_datetime("2024-01-01T10:30:00Z").is_some());
        assert!(parse_datetime("2024-01-01T10:30:00.123").is_some());
        assert!(parse_datetime("2024-01-01 10:30:00").is_some());
        assert!(parse_datetime("2024-01-01").is_some());
    }

    #[test]
    fn test_datetime_garbage_is_none() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("   ").is_none());
        assert!(parse_datetime("not a date").is_none());
    }

    #[test]
    fn test_date_day_first() {
        let d = parse_date("15/03/2002").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2002, 3, 15).unwrap());
    }
}
