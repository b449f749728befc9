//! Shared CLI helpers.

pub mod logging;
pub mod report;

pub use logging::initialize_logging;
pub use report::save_report;
