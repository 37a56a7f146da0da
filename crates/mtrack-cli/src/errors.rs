//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use mtrack_core::TrackerError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (machine, repair, etc.)
    NotFound { message: String, hint: String },

    /// Not signed in, rejected credentials or insufficient role
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for any error surfaced by a command handler.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.exit_code();
    }
    match error.downcast_ref::<TrackerError>() {
        Some(TrackerError::Unauthorized(_)) => exit_codes::AUTH_FAILED,
        Some(TrackerError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(TrackerError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        Some(TrackerError::Network(_))
        | Some(TrackerError::Api { .. })
        | Some(TrackerError::Decode(_)) => exit_codes::REQUEST_FAILED,
        Some(TrackerError::Session(_)) | Some(TrackerError::Io(_)) | None => exit_codes::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(
            CliError::not_found("Machine 9 not found", "Hint: x").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::auth_failed("Not signed in").exit_code(),
            exit_codes::AUTH_FAILED
        );
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::auth_failed_with_hint("Not signed in", "Hint: Run `mtrack login`.");
        assert_eq!(err.to_string(), "Not signed in\nHint: Run `mtrack login`.");
    }

    #[test]
    fn test_exit_code_for_core_errors() {
        let cases = [
            (TrackerError::Unauthorized("x".into()), exit_codes::AUTH_FAILED),
            (TrackerError::NotFound("x".into()), exit_codes::NOT_FOUND),
            (TrackerError::Network("x".into()), exit_codes::REQUEST_FAILED),
            (
                TrackerError::Api {
                    status: 500,
                    body: String::new(),
                },
                exit_codes::REQUEST_FAILED,
            ),
            (TrackerError::Session("x".into()), exit_codes::FAILURE),
        ];
        for (error, code) in cases {
            assert_eq!(exit_code_for(&anyhow::Error::new(error)), code);
        }
    }

    #[test]
    fn test_exit_code_for_cli_error_and_plain_error() {
        let err = anyhow::Error::new(CliError::invalid_input("bad month"));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), exit_codes::FAILURE);
    }
}
