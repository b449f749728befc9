//! `find`: pages containing a section

use anyhow::{Context, Result};
use blockscope_core::{Config, SectionQuery, Strategy};
use tracing::warn;

use super::Analyzer;
use crate::cli::FindArgs;
use crate::output::{OutputFormat, print_json, print_jsonl, progress, text};
use crate::utils::save_report;

/// Execute the find command
pub async fn execute(
    analyzer: &Analyzer,
    config: &Config,
    args: &FindArgs,
    show_progress: bool,
) -> Result<()> {
    let format = args.output.resolve();
    let mode = args
        .mode
        .map_or(config.analysis.default_mode, Into::into);

    let query = SectionQuery::new(args.section.as_str(), mode)
        .with_context(|| format!("Invalid section pattern '{}'", args.section))?;
    if query.is_empty() {
        warn!("Empty section identifier matches nothing");
    }

    let strategy = if args.server_query {
        Strategy::ServerAssisted
    } else {
        Strategy::ClientSide
    };

    let spinner = progress::spinner(
        &format!("Searching pages for '{}'", args.section),
        show_progress && !format.is_machine_readable(),
    );
    let report = analyzer.pages_with_section(&query, strategy).await;
    spinner.finish_and_clear();
    let report = report.with_context(|| format!("Failed to search for '{}'", args.section))?;

    if let Some(path) = &args.save {
        save_report(path, "find", &report)?;
    }

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Jsonl => print_jsonl(&report.pages)?,
        OutputFormat::Text => text::write_page_matches(&mut std::io::stdout().lock(), &report)?,
    }
    Ok(())
}
