//! Theme definitions for colors and badges.

use owo_colors::{OwoColorize, Style};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",   // [✓]
            Self::Warn => "[\u{26A0}]", // [⚠]
            Self::Err => "[\u{2717}]",  // [✗]
            Self::Info => "[\u{2139}]", // [ℹ]
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::success(),
            Self::Warn => styles::warning(),
            Self::Err => styles::error(),
            Self::Info => styles::info(),
        }
    }
}

/// Apply a style when color is enabled, otherwise return the text untouched.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Named styles shared by the renderers.
pub mod styles {
    use owo_colors::Style;

    /// Labels and metadata
    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    /// Titles and emphasised values
    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn success() -> Style {
        Style::new().green().bold()
    }

    pub fn warning() -> Style {
        Style::new().yellow().bold()
    }

    pub fn error() -> Style {
        Style::new().red().bold()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }

    /// Money totals
    pub fn amount() -> Style {
        Style::new().green()
    }
}
