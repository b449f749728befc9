//! Progress display for content-API calls

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

/// Create a spinner with the given message.
///
/// Hidden unless `enabled` and stderr is a terminal, so piped runs and
/// machine output stay clean.
pub fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
