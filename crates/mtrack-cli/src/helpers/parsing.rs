//! Parsing helpers for record ids, prices and report filters.

use mtrack_core::model::{Price, RecordId};
use mtrack_core::FilterState;

use crate::errors::CliError;

/// Parse a record id given on the command line.
pub fn parse_record_id(value: &str, what: &str) -> Result<RecordId, CliError> {
    let id = RecordId::parse(value);
    if id.is_empty() {
        return Err(CliError::invalid_input(format!("{} id cannot be empty", what)));
    }
    Ok(id)
}

/// Parse a price typed by the user.
///
/// The value must be a finite, non-negative number. It is sent upstream as
/// typed, so "1500.00" stays "1500.00".
pub fn parse_price(value: &str) -> Result<Price, CliError> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(Price::from_input(trimmed)),
        _ => Err(CliError::invalid_input(format!(
            "Invalid price: {} (expected a non-negative number)",
            value
        ))),
    }
}

/// Build the report filter from `--month` and `--search`.
pub fn build_filter(month: Option<&str>, search: Option<&str>) -> anyhow::Result<FilterState> {
    let filter = FilterState::new()
        .with_month_input(month.unwrap_or_default())
        .map_err(|e| CliError::invalid_input(e.to_string()))?;
    Ok(filter.with_search(search.map(str::trim).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtrack_core::YearMonth;

    #[test]
    fn test_parse_record_id() {
        let id = parse_record_id(" 42 ", "Repair").expect("id should parse");
        assert_eq!(id.as_str(), "42");

        let err = parse_record_id("  ", "Repair").unwrap_err();
        assert!(err.to_string().contains("Repair id cannot be empty"));
    }

    #[test]
    fn test_parse_price_accepts_decimals() {
        let price = parse_price("1500.50").expect("price should parse");
        assert_eq!(price.amount(), 1500.5);
        assert_eq!(price.to_string(), "1500.50");
    }

    #[test]
    fn test_parse_price_rejects_bad_values() {
        for bad in ["", "abc", "-5", "NaN", "inf", "12kg"] {
            assert!(parse_price(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_build_filter_defaults_to_inactive() {
        let filter = build_filter(None, None).expect("empty filter should build");
        assert!(!filter.is_active());
    }

    #[test]
    fn test_build_filter_sets_month_and_search() {
        let filter = build_filter(Some("2024-03"), Some(" tractor ")).expect("filter should build");
        assert_eq!(filter.month, YearMonth::new(2024, 3));
        assert_eq!(filter.search, "tractor");
    }

    #[test]
    fn test_build_filter_rejects_bad_month() {
        let err = build_filter(Some("2024-13"), None).unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().expect("should be a CliError");
        assert!(matches!(cli_err, CliError::InvalidInput(_)));
    }
}
