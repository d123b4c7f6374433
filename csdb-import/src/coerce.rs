//! Lenient field coercion
//!
//! Numeric and date cells in the source exports are frequently blank or
//! malformed. They coerce to `None` so the surrounding row still imports
//! with a degraded field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse an integer cell, or `None`.
pub fn int(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}

/// Parse a decimal cell, or `None`.
pub fn float(value: Option<&str>) -> Option<f64> {
    value?.trim().parse().ok()
}

/// Parse a timestamp cell, or `None`.
///
/// The two export formats disagree on date shapes; accept the known ones.
pub fn datetime(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Subscription-platform exports write timestamps like
    // "2024-03-01 10:15:00 UTC"; statement files write bare dates.
    let bare = value.strip_suffix(" UTC").unwrap_or(value);

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(bare, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(bare, format) {
            return Some(Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}
