//! Lenient publication timestamp parsing.
//!
//! Providers report publication times in different shapes: NewsAPI and the
//! Guardian use RFC 3339 (`2024-05-01T10:00:00Z`), NewsData uses a naive
//! `2024-05-01 10:00:00`, and RSS-derived feeds use RFC 2822. Naive values
//! are interpreted as UTC. Anything else yields `None`, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive datetime layouts tried after RFC 3339 and RFC 2822.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a provider timestamp into UTC.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Absolute gap in hours between two parsed timestamps.
pub fn hours_apart(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (a - b).num_milliseconds().abs() as f64 / 3_600_000.0
}
