//! Display formatting for timestamps.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::TODAY;

const YESTERDAY: &str = "Yesterday";

/// Date formats accepted for last-message labels, tried in order.
const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Format a wall-clock time as a two-digit 12-hour clock (`"03:45 PM"`).
pub fn clock_label(at: NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

/// Format a contact's raw last-message time for the directory list.
///
/// Clock times and relative day labels pass through unchanged, calendar
/// dates are shortened to `"Jan 12"`. A missing label means today.
/// Unrecognized labels are shown as given.
pub fn list_time_label(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or(TODAY);
    if raw.contains("AM") || raw.contains("PM") || raw == TODAY || raw == YESTERDAY {
        return raw.to_string();
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map_or_else(|| raw.to_string(), |date| date.format("%b %-d").to_string())
}
