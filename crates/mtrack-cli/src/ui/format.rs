//! String formatting utilities for UI rendering.

use chrono::DateTime;
use chrono_tz::Tz;
use mtrack_core::model::Price;

/// Display pattern for repair timestamps, e.g. "Mar 01, 2024 10:00 AM".
const TIMESTAMP_FORMAT: &str = "%b %d, %Y %-I:%M %p";

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Format a sum of money with thousands separators and at most two decimals.
///
/// Trailing zero decimals are dropped: `1234.5` is "₦1,234.5", `800` is "₦800".
pub fn format_money(amount: f64, symbol: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut out = String::new();
    if amount < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push_str(symbol);
    out.push_str(&group_thousands(whole));
    if frac != 0 {
        if frac % 10 == 0 {
            out.push_str(&format!(".{}", frac / 10));
        } else {
            out.push_str(&format!(".{:02}", frac));
        }
    }
    out
}

/// Format a single repair price the way it was entered, prefixed with the symbol.
pub fn format_price(price: &Price, symbol: &str) -> String {
    let raw = price.to_string();
    if raw.is_empty() {
        "-".to_string()
    } else {
        format!("{}{}", symbol, raw)
    }
}

/// Format a raw API timestamp for display.
///
/// With a timezone the instant is converted; without one the recorded offset
/// is kept. Unparseable values are shown verbatim and missing ones as "-".
pub fn format_timestamp(raw: Option<&str>, timezone: Option<Tz>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => match timezone {
            Some(tz) => dt.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
            None => dt.format(TIMESTAMP_FORMAT).to_string(),
        },
        Err(_) => raw.to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
