//! Output format argument group shared by the report commands.
//!
//! ```bash
//! blockscope sections /pricing --format json
//! blockscope find Hero --json        # Shorthand
//! blockscope inventory --jsonl
//! ```

use clap::{Args, ValueEnum};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable formatted text (default for terminals).
    #[default]
    Text,
    /// Pretty JSON report (default for pipes).
    Json,
    /// JSON Lines, one record per line.
    Jsonl,
}

impl OutputFormat {
    /// Check if this format is machine-readable (JSON or JSONL).
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }

    /// Detect the best format based on terminal status.
    ///
    /// Returns `Text` for interactive terminals, `Json` for pipes/redirects.
    #[must_use]
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Shared output format arguments.
///
/// When no format is given, terminals get `Text` and pipes get `Json`.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputArgs {
    /// Output format (text, json, jsonl).
    ///
    /// Defaults to text for terminals, json for pipes.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        env = "BLOCKSCOPE_OUTPUT_FORMAT",
        display_order = 44
    )]
    pub format: Option<OutputFormat>,

    /// Output as JSON (shorthand for --format json).
    #[arg(long, conflicts_with = "format", display_order = 40)]
    pub json: bool,

    /// Output as JSON Lines (shorthand for --format jsonl).
    #[arg(long, conflicts_with_all = ["format", "json"], display_order = 41)]
    pub jsonl: bool,

    /// Output as plain text (shorthand for --format text).
    #[arg(long, conflicts_with_all = ["format", "json", "jsonl"], display_order = 42)]
    pub text: bool,
}

impl OutputArgs {
    /// Resolve the output arguments to a concrete format.
    ///
    /// Priority order:
    /// 1. Shorthand flags (--json, --jsonl, --text)
    /// 2. Explicit --format flag
    /// 3. Automatic TTY detection
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if self.json {
            return OutputFormat::Json;
        }
        if self.jsonl {
            return OutputFormat::Jsonl;
        }
        if self.text {
            return OutputFormat::Text;
        }

        if let Some(format) = self.format {
            return format;
        }

        OutputFormat::detect()
    }
}
