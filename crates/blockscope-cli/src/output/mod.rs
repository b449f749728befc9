//! Report output: pretty JSON, JSON Lines and text.

pub mod progress;
pub mod text;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

pub use crate::args::OutputFormat;

/// Print a whole report as pretty JSON.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Print one compact JSON object per record.
pub fn print_jsonl<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for record in records {
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}
