//! Application context for the Mtrack CLI.
//!
//! Provides a unified context that combines CLI arguments with the lazily
//! loaded config file, API client and session store.

use std::io::IsTerminal;

use once_cell::unsync::OnceCell;

use mtrack_core::model::Session;
use mtrack_core::{HttpApi, SessionStore};

use crate::cli::{Cli, OutputFormat};
use crate::config::{read_config, MtrackConfig};
use crate::ui::UiContext;

use super::resolver::{
    not_signed_in, resolve_api_config, resolve_config_path, resolve_currency,
    resolve_session_path, resolve_timezone,
};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<MtrackConfig>,
    api: OnceCell<HttpApi>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            api: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && std::io::stdin().is_terminal()
    }

    /// Get the config file contents, loading them lazily. A missing file
    /// yields the defaults.
    pub fn config(&self) -> anyhow::Result<&MtrackConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(MtrackConfig::default());
            }
            tracing::debug!(path = %path.display(), "loading config");
            read_config(&path)
        })
    }

    /// Get the API client, building it on first use.
    pub fn api(&self) -> anyhow::Result<&HttpApi> {
        self.api.get_or_try_init(|| {
            let api_config = resolve_api_config(self.cli, self.config()?);
            tracing::debug!(base_url = %api_config.base_url, "using API");
            Ok(HttpApi::new(&api_config)?)
        })
    }

    pub fn session_store(&self) -> anyhow::Result<SessionStore> {
        Ok(SessionStore::new(resolve_session_path(self.config()?)?))
    }

    /// The stored session, or an auth error pointing at `mtrack login`.
    pub fn require_session(&self) -> anyhow::Result<Session> {
        match self.session_store()?.load()? {
            Some(session) => Ok(session),
            None => Err(not_signed_in().into()),
        }
    }

    /// Build the UI context for a command's output flags.
    ///
    /// Falls back to default currency and offsets when the config cannot be
    /// read, so errors can always be rendered.
    pub fn ui_context(&self, json: bool, format: Option<OutputFormat>) -> UiContext {
        let ui = UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii);
        match self.config() {
            Ok(config) => ui
                .with_currency(resolve_currency(config))
                .with_timezone(resolve_timezone(config).ok().flatten()),
            Err(_) => ui,
        }
    }
}
