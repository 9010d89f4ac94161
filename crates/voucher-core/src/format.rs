//! Display formatting shared by the views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a backend timestamp.
///
/// The backend emits ISO-8601 without a zone offset (`2024-01-15T10:30:00`,
/// optionally with fractional seconds). RFC 3339 timestamps are converted to
/// UTC and bare dates are taken at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Collapse the distance between `then` and `now` into a coarse label.
///
/// Whole elapsed days decide the bucket: 0 is "Today", 1 is "Yesterday",
/// under a week counts days, under 30 days counts weeks, anything older
/// counts 30-day months. Timestamps in the future read as "Today".
pub fn relative_date(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let days = (now - then).num_days();

    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d => format!("{} months ago", d / 30),
    }
}

/// Pick the singular or plural noun for a count.
pub fn pluralize<'a>(count: u64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Format a count with its noun, e.g. "5 codes".
pub fn count_label(count: u64, singular: &str, plural: &str) -> String {
    format!("{} {}", count, pluralize(count, singular, plural))
}
