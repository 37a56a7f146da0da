//! Repair aggregation and filtering.
//!
//! The engine turns the machine and repair collections fetched from the API
//! into per-machine rows with subtotals plus a grand total. Every function
//! here is pure: inputs are never mutated, nothing is cached between calls,
//! and malformed data (missing prices, unknown machines, bad timestamps)
//! degrades to "excluded" rather than an error.

mod filter;
mod report;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::TrackerError;

pub use filter::{
    associate, filter_machines, filter_machines_by_name, filter_repairs, grand_total,
    matches_month, matches_search, sort_newest_first, subtotal, MachineWithRepairs,
};
pub use report::{build_report, MachineReport, Report, ReportView};

/// A calendar month, the granularity of the month filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Parse the `YYYY-MM` form produced by a month picker.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            TrackerError::InvalidInput(format!("invalid month '{}', expected YYYY-MM", s))
        })
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month and search constraints applied to a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub month: Option<YearMonth>,
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the month from picker input. An empty string clears it.
    pub fn with_month_input(mut self, value: &str) -> crate::error::Result<Self> {
        self.month = if value.trim().is_empty() {
            None
        } else {
            Some(value.parse()?)
        };
        Ok(self)
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.month.is_some() || !self.search.is_empty()
    }
}
