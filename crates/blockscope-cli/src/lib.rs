//! blockscope CLI - find the sections on a page and the pages using a section
//!
//! Commands read pages from the content API, or from a saved response with
//! `--input`, and print reports as text, JSON or JSON Lines.

use anyhow::{Context, Result, anyhow};
use blockscope_core::Config;
use clap::Parser;

pub mod args;
mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::utils::initialize_logging;

/// Execute the blockscope CLI with the current arguments and environment.
///
/// # Errors
///
/// Returns an error if configuration, page retrieval or output fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    if let Commands::Completions { shell } = cli.command {
        commands::generate(shell);
        return Ok(());
    }

    if cli.input.is_some() && matches!(&cli.command, Commands::Find(args) if args.server_query) {
        return Err(CliError::usage(anyhow!(
            "--server-query needs the content API and cannot be combined with --input"
        ))
        .into());
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let analyzer = commands::build_analyzer(&config, cli.input.as_deref())?;
    let show_progress = !cli.quiet && cli.input.is_none();

    match &cli.command {
        Commands::Sections(args) => commands::sections(&analyzer, args, show_progress).await,
        Commands::Find(args) => commands::find(&analyzer, &config, args, show_progress).await,
        Commands::Inventory(args) => commands::inventory(&analyzer, args, show_progress).await,
        Commands::Pages(args) => commands::pages(&analyzer, args, show_progress).await,
        Commands::Completions { .. } => Ok(()),
    }
}
