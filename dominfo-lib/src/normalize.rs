//! Date normalization for extracted records.
//!
//! Only the registration dates are converted. A value that does not parse
//! stays as the registry wrote it.

use crate::types::{FieldValue, WhoisField, WhoisRecord};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tracing::debug;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Convert the date fields of `record` to timestamps where possible.
///
/// Absent, multi-valued, and already converted fields are left alone, so
/// normalizing twice gives the same record.
pub fn normalize(mut record: WhoisRecord) -> WhoisRecord {
    for field in WhoisField::DATES {
        let parsed = match record.get(field) {
            FieldValue::Text(text) => match parse_timestamp(text) {
                Some(ts) => ts,
                None => {
                    debug!(field = %field, value = %text, "Leaving unparseable date as text");
                    continue;
                }
            },
            _ => continue,
        };
        record.set(field, FieldValue::Timestamp(parsed));
    }

    record
}

/// Parse an ISO-8601-like registry timestamp.
///
/// A trailing `Z` means UTC. Values without an offset, including bare
/// dates, are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    let text = match text.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(rest) => format!("{}+00:00", rest),
        None => text.to_string(),
    };

    for fmt in &OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&text, fmt) {
            return Some(ts);
        }
    }

    for fmt in &NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}
