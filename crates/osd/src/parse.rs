//! Parse-or-default combinators.
//!
//! Every lossy text conversion in the crate goes through these helpers so a
//! failed parse always degrades to the same documented default.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Parses trimmed `text`, falling back to `T::default()`.
pub fn parse_or_default<T: FromStr + Default>(text: &str) -> T {
    text.trim().parse().unwrap_or_default()
}

/// Exact, case-sensitive boolean token match: only `"true"` and `"1"` are true.
pub fn parse_boolean(text: &str) -> bool {
    matches!(text, "true" | "1")
}

pub fn parse_integer(text: &str) -> i64 {
    parse_or_default(text)
}

/// Like [`parse_integer`] but also accepts real-valued text, rounding toward
/// negative infinity.
pub fn parse_integer_loose(text: &str) -> i64 {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return i;
    }
    match text.parse::<f64>() {
        Ok(f) if !f.is_nan() => f.floor() as i64,
        _ => 0,
    }
}

/// `"nan"` (any case) yields NaN; anything unparseable yields `0.0`.
pub fn parse_real(text: &str) -> f64 {
    let text = text.trim();
    if text.eq_ignore_ascii_case("nan") {
        return f64::NAN;
    }
    parse_or_default(text)
}

pub fn parse_uuid(text: &str) -> Uuid {
    Uuid::parse_str(text.trim()).unwrap_or(Uuid::nil())
}

pub fn parse_date(text: &str) -> DateTime<Utc> {
    try_parse_date(text).unwrap_or_default()
}

/// Accepts RFC 3339 timestamps, zone-less `YYYY-MM-DDTHH:MM:SS[.f]` (taken
/// as UTC) and bare `YYYY-MM-DD` dates.
pub fn try_parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Seconds since the Unix epoch, rounded to whole microseconds.
pub fn date_from_seconds(seconds: f64) -> DateTime<Utc> {
    if !seconds.is_finite() {
        return DateTime::<Utc>::default();
    }
    DateTime::from_timestamp_micros((seconds * 1e6).round() as i64).unwrap_or_default()
}

pub fn date_to_seconds(date: &DateTime<Utc>) -> f64 {
    date.timestamp() as f64 + f64::from(date.timestamp_subsec_micros()) / 1e6
}

pub fn format_real(value: f64) -> String {
    value.to_string()
}

/// Parses `<x, y, z>`-style component lists. The brackets are optional.
pub fn parse_components(text: &str) -> Option<Vec<f64>> {
    let text = text.trim();
    let inner = text
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(text);
    inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect()
}
