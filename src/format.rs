use chrono::{DateTime, NaiveDate};

pub const INVALID_DATE: &str = "Invalid Date";

pub fn format_currency(amount: f64) -> String {
    format!("${}", format_amount(amount))
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Renders `2025-12-31` (or an RFC 3339 timestamp) as `Dec 31, 2025`.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|stamp| stamp.date_naive())
        });

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}
