use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

/// Parses a monetary value from a JSON number or a formatted string such as
/// `"₹1,50,000"`, `"$ 2,500.50"` or `"Rs. 12000"`. Returns `None` for
/// anything that does not yield a finite number.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric_str(s)?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let mut s = raw.trim();
    for prefix in ["INR", "Rs.", "Rs", "USD", "EUR"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest;
            break;
        }
    }
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '₹' | '$' | '€' | '£' | '%') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Truthy values: `true`, non-zero numbers, and `yes`/`y`/`true`/`1` strings.
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Parses dates in ISO (`YYYY-MM-DD`, `YYYY/MM/DD`), day-first
/// (`DD/MM/YYYY`, `DD-MM-YYYY`) or RFC 3339 timestamp form.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Whole-number year from a number, numeric string, or a date string.
pub fn parse_year(value: &Value) -> Option<i32> {
    if let Some(n) = parse_number(value) {
        let year = n.trunc();
        if (1.0..=9999.0).contains(&year) {
            return Some(year as i32);
        }
        return None;
    }
    parse_date(value).map(|d| d.year())
}

/// Free-form text from a string or a number (ids are sometimes numeric).
pub fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
