//! Lenient parsing of form values
//!
//! Trainers type height and weight free-form ("5'10\"", "180 lbs", "178cm").
//! Nothing here fails: unreadable input becomes 0 or `None` and the
//! estimator carries on.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::tables::{CM_PER_INCH, INCHES_PER_FOOT};

static FEET_INCHES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)'([0-9]+)").ok());

static CENTIMETERS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*cm").ok());

static LEADING_NUMBER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").ok()
});

/// Parse the numeric prefix of a string, ignoring whatever follows.
///
/// - "15" -> Some(15.0)
/// - " 22.5%" -> Some(22.5)
/// - "abc" -> None
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let pattern = LEADING_NUMBER_PATTERN.as_ref()?;
    let matched = pattern.find(s)?;
    let value = matched.as_str().trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a weight in pounds, dropping every character that is not a digit or dot.
///
/// "180 lbs" -> 180.0, "abc" -> 0.0, "" -> 0.0
pub fn parse_weight_lbs(weight: &str) -> f64 {
    let digits: String = weight
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_leading_number(&digits).unwrap_or(0.0)
}

/// Parse a height into inches.
///
/// Feet and inches (`5'10`) take precedence over centimeters (`178cm`).
/// Anything else is 0.
pub fn parse_height_inches(height: &str) -> f64 {
    if let Some(caps) = FEET_INCHES_PATTERN
        .as_ref()
        .and_then(|p| p.captures(height))
    {
        let feet = capture_f64(&caps, 1);
        let inches = capture_f64(&caps, 2);
        return feet * INCHES_PER_FOOT + inches;
    }

    if let Some(caps) = CENTIMETERS_PATTERN
        .as_ref()
        .and_then(|p| p.captures(height))
    {
        return capture_f64(&caps, 1) / CM_PER_INCH;
    }

    0.0
}

/// Height in centimeters, via the inch conversion above
pub fn parse_height_cm(height: &str) -> f64 {
    parse_height_inches(height) * CM_PER_INCH
}

fn capture_f64(caps: &regex::Captures<'_>, index: usize) -> f64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse a date of birth.
///
/// Accepts ISO dates with an optional time suffix ("1990-04-12",
/// "1990-04-12 00:00:00") and RFC 2822 timestamps as emitted by JSON APIs
/// ("Thu, 12 Apr 1990 00:00:00 GMT").
pub fn parse_dob(dob: &str) -> Option<NaiveDate> {
    let trimmed = dob.trim();

    if let Some(date_part) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc2822(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Whole years between a date of birth and `today`.
///
/// None if the date can't be read or lies in the future.
pub fn age_from_dob(dob: &str, today: NaiveDate) -> Option<u32> {
    let born = parse_dob(dob)?;
    today.years_since(born)
}
