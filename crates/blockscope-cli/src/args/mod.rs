//! Reusable argument groups.

mod output;

pub use output::{OutputArgs, OutputFormat};
