//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Credential, confirmation and selection prompts (`input`)
//! - Record id, price and filter parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm, prompt_password, prompt_select, prompt_text, prompt_username};
pub use parsing::{build_filter, parse_price, parse_record_id};
