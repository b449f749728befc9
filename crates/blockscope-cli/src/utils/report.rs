//! Writing reports to disk.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

/// Write `report` as pretty JSON, stamped with the generation time.
///
/// The report's own fields sit under `report`; missing parent directories
/// are created.
pub fn save_report<T: Serialize>(path: &Path, kind: &str, report: &T) -> Result<()> {
    let document = envelope(kind, serde_json::to_value(report)?);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&document)?)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    info!("Saved {} report to {}", kind, path.display());
    Ok(())
}

fn envelope(kind: &str, report: Value) -> Value {
    json!({
        "kind": kind,
        "generatedAt": Utc::now().to_rfc3339(),
        "tool": concat!("blockscope ", env!("CARGO_PKG_VERSION")),
        "report": report,
    })
}
