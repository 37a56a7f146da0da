//! Prompt helpers for credentials, confirmations and selections.
//!
//! Every prompt first honours the value given on the command line. When a
//! value is missing and prompts are disabled (`--no-input` or no TTY) the
//! helpers fail with an input error naming the flag to pass instead.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, Password};

use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;

/// Username from `--username`, or an interactive prompt.
pub fn prompt_username(interactive: bool, given: Option<&str>) -> anyhow::Result<String> {
    prompt_text(interactive, "Username", "--username", given)
}

/// Password from `MTRACK_PASSWORD`, or a hidden prompt.
///
/// With `confirm` the password must be typed twice (registration).
pub fn prompt_password(interactive: bool, confirm: bool) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var(PASSWORD_ENV) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and prompts are disabled. Set {}.",
            PASSWORD_ENV
        ))
        .into());
    }
    let theme = ColorfulTheme::default();
    let prompt = Password::with_theme(&theme).with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Confirm password", "Passwords do not match")
    } else {
        prompt
    };
    prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// A required text value from a flag, or an interactive prompt.
pub fn prompt_text(
    interactive: bool,
    label: &str,
    flag: &str,
    given: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = given {
        let value = value.trim();
        if value.is_empty() {
            return Err(CliError::invalid_input(format!("{} cannot be empty", flag)).into());
        }
        return Ok(value.to_string());
    }
    if !interactive {
        return Err(CliError::invalid_input(format!("{} is required. Pass {}.", label, flag)).into());
    }
    let theme = ColorfulTheme::default();
    let value: String = Input::with_theme(&theme)
        .with_prompt(label)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Value cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Ask for confirmation unless `--yes` was given.
///
/// Without a TTY (or with `--no-input`) the action is refused rather than
/// silently confirmed.
pub fn confirm(interactive: bool, prompt: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "{}\nConfirmation required. Re-run with --yes.",
            prompt
        ))
        .into());
    }
    let theme = ColorfulTheme::default();
    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Pick one of `items`, returning its index.
pub fn prompt_select(
    interactive: bool,
    label: &str,
    flag: &str,
    items: &[String],
) -> anyhow::Result<usize> {
    if !interactive {
        return Err(CliError::invalid_input(format!("{} is required. Pass {}.", label, flag)).into());
    }
    if items.is_empty() {
        return Err(CliError::invalid_input(format!("No {} to choose from", label.to_lowercase())).into());
    }
    let theme = ColorfulTheme::default();
    let index = FuzzySelect::with_theme(&theme)
        .with_prompt(label)
        .items(items)
        .default(0)
        .interact()?;
    Ok(index)
}
