//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying reports,
//! machines, repairs and the signed-in user as JSON, tables or plain text.

mod json;
mod text;

// Re-export public API
pub use json::{
    export_records, machines_json, repair_json, repair_types_json, report_json, whoami_json,
};
pub use text::{print_machine_list, print_repair, print_repair_types, print_report, print_whoami};
