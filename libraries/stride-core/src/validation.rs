//! Pure predicates and parsers applied to raw request values
//!
//! These mirror the loose coercion rules clients of the exercise API have
//! always relied on: numeric fields may arrive as strings, and dates may be
//! plain calendar days or full timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar-day layouts accepted by [`parse_date`]
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%B %d %Y"];

/// Timestamp layouts without an offset accepted by [`parse_date`]
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a date-like string into a calendar date
///
/// Timestamps are reduced to the calendar day they name in their own offset.
/// Returns `None` for empty input, for impossible dates such as
/// `2024-02-30`, and for years not written with exactly four digits.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !has_four_digit_year(value) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// The year leads (`2024-01-01`) or ends (`January 1, 2024`) the text as
/// exactly four digits
fn has_four_digit_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() <= 4 {
        return false;
    }
    let leading =
        bytes[..4].iter().all(u8::is_ascii_digit) && matches!(bytes[4], b'-' | b'/');
    let tail = &bytes[bytes.len() - 5..];
    let trailing = tail[1..].iter().all(u8::is_ascii_digit) && !tail[0].is_ascii_digit();
    leading || trailing
}

/// True iff `value` parses to a valid calendar date
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Coerce text to a number the way a loosely typed client expects
///
/// Blank text is `0`; anything that is not a decimal number is `NaN`.
pub fn parse_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    // Rust also accepts "inf"/"nan" spellings; only digits, sign, dot and
    // exponent are meaningful here.
    if value
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
    {
        return f64::NAN;
    }
    value.parse().unwrap_or(f64::NAN)
}

/// Parse the leading integer of `value`, ignoring any trailing text
///
/// `"10"`, `" 10 "` and `"10abc"` all yield `10`; text without leading
/// digits yields `None`, as does a value outside the `i64` range.
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// True iff the sign of `value` is `+1`
///
/// Zero, negative numbers and `NaN` are all rejected.
pub fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Parse a result-count limit, accepting only positive integers
///
/// Limits beyond `u32::MAX` are clamped.
pub fn parse_limit(value: &str) -> Option<u32> {
    let limit = parse_int(value)?;
    if limit.signum() != 1 {
        return None;
    }
    Some(u32::try_from(limit).unwrap_or(u32::MAX))
}
