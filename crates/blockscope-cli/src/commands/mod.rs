//! Command implementations, one module per subcommand.

mod completions;
mod find;
mod inventory;
mod pages;
mod sections;

use std::path::Path;

use anyhow::{Context, Result};
use blockscope_core::{Config, ContentClient, Flattener, PageSource, SectionAnalyzer, StaticPages};
use tracing::{debug, info};

pub use completions::generate;
pub use find::execute as find;
pub use inventory::execute as inventory;
pub use pages::execute as pages;
pub use sections::execute as sections;

/// Analyzer over whichever page source this run uses.
pub type Analyzer = SectionAnalyzer<Box<dyn PageSource>>;

/// Build the analyzer: a saved response when `input` is given, else the content API.
pub fn build_analyzer(config: &Config, input: Option<&Path>) -> Result<Analyzer> {
    let source: Box<dyn PageSource> = if let Some(path) = input {
        let pages = StaticPages::from_file(path)
            .with_context(|| format!("Failed to load pages from {}", path.display()))?;
        info!("Loaded {} pages from {}", pages.pages().len(), path.display());
        Box::new(pages)
    } else {
        let client = ContentClient::new(&config.api)?;
        debug!("Using content API at {}", client.endpoint());
        Box::new(client)
    };

    Ok(SectionAnalyzer::new(source)
        .with_flattener(Flattener::new().max_depth(config.analysis.max_depth)))
}
