//! Display helpers for decoded column values.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Text for a cell. NULL renders as nothing.
pub fn display(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Numeric reading of a value. Numeric strings (DECIMAL columns) count.
pub fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flag columns arrive as booleans, integers or single-letter codes.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            !(s.is_empty()
                || s.eq_ignore_ascii_case("f")
                || s == "0"
                || s.eq_ignore_ascii_case("false"))
        }
        Some(_) => true,
    }
}

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `M/D/YYYY` for a date or datetime; anything unparseable passes through.
pub fn short_date(value: Option<&Value>) -> String {
    let raw = display(value);
    let date = parse_datetime(&raw)
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());
    match date {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.into_owned(),
    }
}

/// `M/D/YYYY, h:mm:ss AM` for a datetime; anything unparseable passes through.
pub fn short_datetime(value: Option<&Value>) -> String {
    let raw = display(value);
    match parse_datetime(&raw) {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.into_owned(),
    }
}
