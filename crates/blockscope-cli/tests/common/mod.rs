#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// An empty config file so the user's own settings never leak into tests.
fn config_file() -> &'static Path {
    static CONFIG: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = CONFIG.get_or_init(|| {
        let dir = tempfile::tempdir().expect("failed to create config dir for tests");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").expect("failed to write test config");
        (dir, path)
    });
    path
}

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Create a `blockscope` command isolated from the caller's environment.
#[allow(dead_code)]
pub fn blockscope_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blockscope"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("BLOCKSCOPE_CONFIG", config_file());
    for var in [
        "BUILDER_PUBLIC_KEY",
        "BUILDER_PRIVATE_KEY",
        "BLOCKSCOPE_API_URL",
        "BLOCKSCOPE_OUTPUT_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}
