//! Command-line interface definition.

use std::path::PathBuf;

use blockscope_core::MatchMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::args::OutputArgs;

/// Find the sections on a page and the pages using a section
#[derive(Parser, Clone, Debug)]
#[command(name = "blockscope")]
#[command(version)]
#[command(about = "Find the sections on a page and the pages using a section", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `BLOCKSCOPE_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "BLOCKSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Analyze a saved content-API response instead of querying the API
    #[arg(long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List every section on a page
    ///
    /// The page is looked up by URL path (`/pricing`), id, name or targeting value.
    Sections(SectionsArgs),

    /// Find the pages that contain a section
    Find(FindArgs),

    /// Tally section types across all pages
    Inventory(InventoryArgs),

    /// List available pages
    Pages(PagesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `sections`
#[derive(Args, Clone, Debug)]
pub struct SectionsArgs {
    /// Page URL path, id, name or targeting value
    pub page: String,

    /// Sections to show in text output
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Show every section in text output
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Arguments for `find`
#[derive(Args, Clone, Debug)]
pub struct FindArgs {
    /// Section type, component name, id or tag name
    pub section: String,

    /// How the section is compared (default from config: exact)
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Narrow candidate pages with server-side queries before matching.
    /// The queries use the selected mode but only see top-level blocks and
    /// their direct children.
    #[arg(long)]
    pub server_query: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Arguments for `inventory`
#[derive(Args, Clone, Debug)]
pub struct InventoryArgs {
    /// Section types to show in text output
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Arguments for `pages`
#[derive(Args, Clone, Debug)]
pub struct PagesArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Section match mode as accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Equality on type, component name, id or tag name
    Exact,
    /// Also substring on type and component name
    Contains,
    /// Case-insensitive substring on type and component name
    IgnoreCase,
    /// Case-insensitive regular expression
    Regex,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Exact => Self::Exact,
            ModeArg::Contains => Self::Contains,
            ModeArg::IgnoreCase => Self::IgnoreCase,
            ModeArg::Regex => Self::Pattern,
        }
    }
}

impl Commands {
    /// Output arguments of the selected command, when it prints a report.
    pub const fn output(&self) -> Option<&OutputArgs> {
        match self {
            Self::Sections(args) => Some(&args.output),
            Self::Find(args) => Some(&args.output),
            Self::Inventory(args) => Some(&args.output),
            Self::Pages(args) => Some(&args.output),
            Self::Completions { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_find() {
        let cli = Cli::try_parse_from([
            "blockscope", "find", "Hero", "--mode", "ignore-case", "--server-query", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Find(args) => {
                assert_eq!(args.section, "Hero");
                assert_eq!(args.mode.map(MatchMode::from), Some(MatchMode::IgnoreCase));
                assert!(args.server_query);
                assert!(args.output.json);
            },
            other => panic!("expected find, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["blockscope", "pages", "--input", "pages.json", "-q"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.input.unwrap().to_str(), Some("pages.json"));
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from(["blockscope", "pages", "-v", "-q"]).is_err());
        assert!(Cli::try_parse_from(["blockscope", "sections", "/", "--json", "--jsonl"]).is_err());
        assert!(Cli::try_parse_from(["blockscope", "find", "Hero", "--mode", "fuzzy"]).is_err());
    }

    #[test]
    fn test_sections_defaults() {
        let cli = Cli::try_parse_from(["blockscope", "sections", "/pricing"]).unwrap();
        match cli.command {
            Commands::Sections(args) => {
                assert_eq!(args.limit, 10);
                assert!(!args.all);
                assert!(args.save.is_none());
            },
            other => panic!("expected sections, got {other:?}"),
        }
    }
}
