//! Repair prices as the API reports them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A price exactly as received: a JSON number, a string, or null.
///
/// The API stores prices as decimals and usually returns them as strings
/// (`"1500.00"`), but hand-entered values are not validated upstream, so
/// anything can show up. [`Price::amount`] is the only numeric view and it
/// never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(serde_json::Value);

impl Price {
    /// Price from text typed by a user, sent upstream as-is.
    pub fn from_input(value: &str) -> Self {
        Price(serde_json::Value::String(value.trim().to_string()))
    }

    pub fn from_amount(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(|n| Price(serde_json::Value::Number(n)))
            .unwrap_or_default()
    }

    /// Numeric value used for every sum.
    ///
    /// Strings contribute their leading number (`"12.5kg"` is 12.5), and
    /// anything unparseable, missing or non-finite contributes 0.
    pub fn amount(&self) -> f64 {
        let value = match &self.0 {
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
            serde_json::Value::String(s) => leading_number(s).unwrap_or(0.0),
            _ => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Whether the raw value yields a number at all.
    pub fn is_numeric(&self) -> bool {
        match &self.0 {
            serde_json::Value::Number(_) => true,
            serde_json::Value::String(s) => leading_number(s).is_some(),
            _ => false,
        }
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::Null => Ok(()),
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Parse the longest numeric prefix of `text` (after leading whitespace).
fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
