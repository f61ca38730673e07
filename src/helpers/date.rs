//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FILE_NAME_DATE: Regex = Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap();
}

/// Today's date (UTC) as `YYYY-MM-DD`
pub fn today_iso() -> String {
    format_iso(Utc::now().date_naive())
}

/// Format a date as `YYYY-MM-DD`
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a front-matter date string in the formats posts are written with.
///
/// Front-matter dates are free text, so anything unrecognized yields `None`
/// rather than an error.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, normalized to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Extract the first `YYYY-MM-DD` sequence from a file name
pub fn date_from_file_name(file_name: &str) -> Option<String> {
    FILE_NAME_DATE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
