//! Output mode routing logic.

use crate::cli::OutputFormat;

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON documents only
    Json,
    /// `key=value` lines and space-separated rows for scripts
    #[default]
    Plain,
    /// Tables, money and local timestamps for people
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules, first match wins:
    /// 1. `--json`
    /// 2. `--format plain` or `--format table`, whether or not stdout is a TTY
    /// 3. `TERM=dumb` gives plain
    /// 4. Pretty on a TTY, plain otherwise
    pub fn resolve(
        json_flag: bool,
        format: Option<OutputFormat>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }

        match format {
            Some(OutputFormat::Plain) => return Self::Plain,
            // A redirected report keeps its tables
            Some(OutputFormat::Table) => return Self::Pretty,
            None => {}
        }

        if term_is_dumb {
            return Self::Plain;
        }

        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
