//! # Mtrack Core
//!
//! Core library for Mtrack - a maintenance tracker for the machines of an
//! agricultural department.
//!
//! This crate provides the domain model, the repair aggregation engine, the
//! remote API client and session persistence, independent of the CLI
//! interface.
//!
//! ## Architecture
//!
//! - **model**: Machines, repairs, repair types, prices and sessions
//! - **engine**: Association, month/search filtering, subtotals and reports
//! - **api**: `TrackerApi` trait and the blocking HTTP implementation
//! - **session**: On-disk persistence of the signed-in session
//!
//! The engine is pure: it never performs I/O and never fails. All network
//! and session failures surface through [`TrackerError`].

pub mod api;
pub mod engine;
pub mod error;
pub mod fs;
pub mod model;
pub mod session;

pub use api::{fetch_machine_detail, fetch_snapshot, ApiConfig, HttpApi, Snapshot, TrackerApi};
pub use engine::{build_report, FilterState, Report, ReportView, YearMonth};
pub use error::{Result, TrackerError};
pub use session::SessionStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
