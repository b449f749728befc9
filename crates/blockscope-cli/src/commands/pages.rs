//! `pages`: list available pages

use anyhow::{Context, Result};

use super::Analyzer;
use crate::cli::PagesArgs;
use crate::output::{OutputFormat, print_json, print_jsonl, progress, text};

/// Execute the pages command
pub async fn execute(analyzer: &Analyzer, args: &PagesArgs, show_progress: bool) -> Result<()> {
    let format = args.output.resolve();

    let spinner = progress::spinner(
        "Fetching all pages",
        show_progress && !format.is_machine_readable(),
    );
    let pages = analyzer.available_pages().await;
    spinner.finish_and_clear();
    let pages = pages.context("Failed to list pages")?;

    match format {
        OutputFormat::Json => print_json(&pages)?,
        OutputFormat::Jsonl => print_jsonl(&pages)?,
        OutputFormat::Text => text::write_pages(&mut std::io::stdout().lock(), &pages)?,
    }
    Ok(())
}
