//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (machine, repair, session).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (not signed in, rejected credentials, read-only role).
    pub const AUTH_FAILED: i32 = 5;

    /// The API could not be reached or answered with an error.
    pub const REQUEST_FAILED: i32 = 6;
}

/// Environment variable holding the password for non-interactive login.
pub const PASSWORD_ENV: &str = "MTRACK_PASSWORD";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MTRACK_CONFIG";

/// Currency symbol used when the config does not set one.
pub const DEFAULT_CURRENCY: &str = "\u{20A6}";

/// Role that may view reports but not change repairs.
pub const READ_ONLY_ROLE: &str = "Admin Staff";
