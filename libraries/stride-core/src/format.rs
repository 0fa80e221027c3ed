//! Human-readable date rendering for API responses

use chrono::{Datelike, NaiveDate};

/// Render a date in long form, e.g. `Monday January 1st 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{} {}",
        date.format("%A %B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// English ordinal suffix for a day of the month
fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
