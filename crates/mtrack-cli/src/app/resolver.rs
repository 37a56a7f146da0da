//! Resolution of settings from flags, environment and config.

use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use mtrack_core::api::{ApiConfig, DEFAULT_BASE_URL};

use crate::cli::Cli;
use crate::config::{default_config_path, default_session_path, MtrackConfig};
use crate::constants::{CONFIG_ENV, DEFAULT_CURRENCY, READ_ONLY_ROLE};
use crate::errors::CliError;

/// Resolve the config file path, checking MTRACK_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// API settings: `--api-url`/`MTRACK_API_URL`, then config, then defaults.
pub fn resolve_api_config(cli: &Cli, config: &MtrackConfig) -> ApiConfig {
    let base_url = cli
        .api_url
        .clone()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let api = ApiConfig::new(base_url);
    match config.api.timeout_seconds {
        Some(secs) if secs > 0 => api.with_timeout(Duration::from_secs(secs)),
        _ => api,
    }
}

/// Session file from config, else the XDG data directory.
pub fn resolve_session_path(config: &MtrackConfig) -> anyhow::Result<PathBuf> {
    match config.session.path.as_deref() {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_session_path(),
    }
}

/// Display timezone from config. `None` keeps each timestamp's own offset.
pub fn resolve_timezone(config: &MtrackConfig) -> anyhow::Result<Option<Tz>> {
    match config.ui.timezone.as_deref() {
        Some(name) if !name.trim().is_empty() => name
            .trim()
            .parse::<Tz>()
            .map(Some)
            .map_err(|_| {
                anyhow::Error::from(CliError::invalid_input(format!(
                    "Unknown timezone '{}' in config",
                    name
                )))
            }),
        _ => Ok(None),
    }
}

pub fn resolve_currency(config: &MtrackConfig) -> String {
    config
        .ui
        .currency_symbol
        .clone()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

/// Whether a profile role may only view repairs.
pub fn is_read_only_role(role: Option<&str>) -> bool {
    role.is_some_and(|r| r.trim().eq_ignore_ascii_case(READ_ONLY_ROLE))
}

/// Error returned by commands that need a session when none is stored.
pub fn not_signed_in() -> CliError {
    CliError::auth_failed_with_hint("Not signed in", "Hint: Run `mtrack login` first.")
}
