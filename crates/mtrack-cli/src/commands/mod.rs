//! Command handlers, one module per command group.

pub mod auth;
pub mod machines;
pub mod misc;
pub mod report;
pub mod repairs;
