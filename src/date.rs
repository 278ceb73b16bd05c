use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%b %d, %Y";

/// Formats a publication date as `Mar 05, 2024`.
///
/// Returns an empty string for empty or unrecognised input.
pub fn format_date(date_str: &str) -> String {
    parse_date(date_str)
        .map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // The conversion proxy normalises pubDate to this form
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
