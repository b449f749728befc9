//! `inventory`: section types across all pages

use anyhow::{Context, Result};

use super::Analyzer;
use crate::cli::InventoryArgs;
use crate::output::{OutputFormat, print_json, print_jsonl, progress, text};
use crate::utils::save_report;

/// Execute the inventory command
pub async fn execute(analyzer: &Analyzer, args: &InventoryArgs, show_progress: bool) -> Result<()> {
    let format = args.output.resolve();

    let spinner = progress::spinner(
        "Fetching all pages",
        show_progress && !format.is_machine_readable(),
    );
    let inventory = analyzer.inventory().await;
    spinner.finish_and_clear();
    let inventory = inventory.context("Failed to build section inventory")?;

    if let Some(path) = &args.save {
        save_report(path, "inventory", &inventory)?;
    }

    match format {
        OutputFormat::Json => print_json(&inventory)?,
        OutputFormat::Jsonl => print_jsonl(&inventory.entries)?,
        OutputFormat::Text => {
            text::write_inventory(&mut std::io::stdout().lock(), &inventory, args.limit)?;
        },
    }
    Ok(())
}
