//! Application-level utilities for the Mtrack CLI.
//!
//! This module provides:
//! - Path and setting resolution (flag > env > config > default)
//! - The per-invocation `AppContext` with lazily loaded config, API client
//!   and session store

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::is_read_only_role;
