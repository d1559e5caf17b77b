//! Date utilities for fairdraw.
//!
//! Win dates are calendar days in the caller's local time zone, stored as
//! ISO `YYYY-MM-DD` strings.

use chrono::NaiveDate;

/// Format used for every stored win date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return today's date in the local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Render a date as an ISO `YYYY-MM-DD` string.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a zero-padded ISO `YYYY-MM-DD` string. Returns `None` for anything
/// else, including unpadded forms like `2024-1-5`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == s)
}
