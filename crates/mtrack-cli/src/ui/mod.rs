//! UI primitives for the Mtrack CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode) plus
//!   the currency symbol and display timezone
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and owo-colors styles
//! - **Render**: Tables, headers, receipts, hints, formatted text
//! - **Progress**: Spinner for blocking requests
//! - **Format**: Money, timestamps and string utilities
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{header, hint, simple_table, Column};
//!
//! let ui = ctx.ui_context(args.json, args.format);
//!
//! if ui.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ui, "machines", None));
//! println!("{}", simple_table(&ui, &columns, &rows));
//! println!("{}", hint(&ui, "mtrack report --machine <id>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, divider, header, header_with_context, hint, kv, print, receipt,
    simple_table, table, Column,
};

pub use progress::Spinner;

pub use format::{format_money, format_price, format_timestamp, single_line, truncate};
