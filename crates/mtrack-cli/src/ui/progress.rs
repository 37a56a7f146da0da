//! Progress indicator for blocking API calls using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::context::UiContext;

/// A spinner shown while a request is in flight.
///
/// Only animates on an interactive pretty terminal; elsewhere it is inert so
/// plain and JSON output stay clean. The bar is cleared when dropped, so an
/// early `?` return never leaves it spinning.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create and start a spinner with the given message.
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        let bar = if ctx.allows_animation() {
            let pb = ProgressBar::new_spinner();
            let template = if ctx.unicode {
                "{spinner:.cyan} {msg}"
            } else {
                "{spinner} {msg}"
            };
            if let Ok(style) = ProgressStyle::default_spinner().template(template) {
                pb.set_style(style.tick_strings(if ctx.unicode {
                    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]
                } else {
                    &["|", "/", "-", "\\", ""]
                }));
            }
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(80));
            Some(pb)
        } else {
            None
        };

        Self { bar }
    }

    /// Whether the spinner is actually drawing.
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Stop and erase the spinner line.
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn ctx(mode: OutputMode, is_tty: bool) -> UiContext {
        UiContext {
            is_tty,
            color: false,
            unicode: true,
            width: 80,
            mode,
            currency: "\u{20A6}".to_string(),
            timezone: None,
        }
    }

    #[test]
    fn test_spinner_inert_without_tty() {
        let spinner = Spinner::start(&ctx(OutputMode::Plain, false), "Processing...");
        assert!(!spinner.is_visible());
        spinner.finish();
    }

    #[test]
    fn test_spinner_inert_in_json_mode() {
        let spinner = Spinner::start(&ctx(OutputMode::Json, true), "Processing...");
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_spinner_animates_on_pretty_tty() {
        let spinner = Spinner::start(&ctx(OutputMode::Pretty, true), "Processing...");
        assert!(spinner.is_visible());
        spinner.finish();
    }
}
