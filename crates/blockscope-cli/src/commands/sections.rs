//! `sections`: every section on one page

use anyhow::{Context, Result};

use super::Analyzer;
use crate::cli::SectionsArgs;
use crate::output::{OutputFormat, print_json, print_jsonl, progress, text};
use crate::utils::save_report;

/// Execute the sections command
pub async fn execute(analyzer: &Analyzer, args: &SectionsArgs, show_progress: bool) -> Result<()> {
    let format = args.output.resolve();

    let spinner = progress::spinner(
        &format!("Looking up page '{}'", args.page),
        show_progress && !format.is_machine_readable(),
    );
    let report = analyzer.sections_on_page(&args.page).await;
    spinner.finish_and_clear();
    let report = report.with_context(|| format!("Failed to analyze page '{}'", args.page))?;

    if let Some(path) = &args.save {
        save_report(path, "sections", &report)?;
    }

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Jsonl => print_jsonl(&report.sections)?,
        OutputFormat::Text => {
            let limit = (!args.all).then_some(args.limit);
            text::write_sections(&mut std::io::stdout().lock(), &report, limit)?;
        },
    }
    Ok(())
}
