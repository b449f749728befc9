//! Configuration for blockscope.
//!
//! Settings live in a TOML file and can be overridden from the environment.
//!
//! ## Resolution Order
//!
//! 1. An explicit path (the CLI's `--config`)
//! 2. `BLOCKSCOPE_CONFIG`
//! 3. The platform config directory (`…/blockscope/config.toml`)
//!
//! A missing file yields defaults. Environment overrides are applied on top:
//! `BUILDER_PUBLIC_KEY`, `BUILDER_PRIVATE_KEY` and `BLOCKSCOPE_API_URL`.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://cdn.builder.io/api/v3/content"
//! model = "page"
//! public_key = "f2f3655202764523914b8dbf61505ee8"
//! page_limit = 100
//! max_pages = 1000
//! timeout_secs = 30
//!
//! [analysis]
//! max_depth = 64
//! default_mode = "exact"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::flatten::DEFAULT_MAX_DEPTH;
use crate::matcher::MatchMode;
use crate::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BLOCKSCOPE_CONFIG";
/// Environment variable holding the public API key.
pub const PUBLIC_KEY_ENV: &str = "BUILDER_PUBLIC_KEY";
/// Environment variable holding the private API key.
pub const PRIVATE_KEY_ENV: &str = "BUILDER_PRIVATE_KEY";
/// Environment variable overriding the content API base URL.
pub const API_URL_ENV: &str = "BLOCKSCOPE_API_URL";

/// Default content API base URL.
pub const DEFAULT_BASE_URL: &str = "https://cdn.builder.io/api/v3/content";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content API access.
    pub api: ApiConfig,
    /// Tree analysis settings.
    pub analysis: AnalysisConfig,
}

/// Content API access settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content API; the model name is appended.
    pub base_url: String,
    /// Content model holding pages.
    pub model: String,
    /// Public API key, sent as `apiKey`.
    pub public_key: Option<String>,
    /// Private API key, sent as a bearer token when set.
    pub private_key: Option<String>,
    /// Entries requested per listing call.
    pub page_limit: usize,
    /// Upper bound on entries fetched when listing all pages.
    pub max_pages: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "page".to_string(),
            public_key: None,
            private_key: None,
            page_limit: 100,
            max_pages: 1000,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Check that the settings can drive a client.
    pub fn validate(&self) -> Result<()> {
        if self.public_key.as_deref().is_none_or(str::is_empty) {
            return Err(Error::Config(format!(
                "Missing public API key. Set {PUBLIC_KEY_ENV} or api.public_key in the config file"
            )));
        }
        if self.page_limit == 0 {
            return Err(Error::Config("api.page_limit must be at least 1".into()));
        }
        if self.model.is_empty() {
            return Err(Error::Config("api.model must not be empty".into()));
        }
        Ok(())
    }
}

/// Tree analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Deepest level whose children are still flattened.
    pub max_depth: usize,
    /// Match mode used when none is given.
    pub default_mode: MatchMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            default_mode: MatchMode::Exact,
        }
    }
}

impl Config {
    /// Load from `explicit`, else the resolved default location, then apply
    /// environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            },
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(PUBLIC_KEY_ENV) {
            self.api.public_key = Some(key);
        }
        if let Some(key) = non_empty(PRIVATE_KEY_ENV) {
            self.api.private_key = Some(key);
        }
        if let Some(url) = non_empty(API_URL_ENV) {
            self.api.base_url = url;
        }
    }

    /// Config file location when none is given explicitly.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("dev", "blockscope", "blockscope")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.model, "page");
        assert_eq!(config.api.page_limit, 100);
        assert_eq!(config.analysis.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.analysis.default_mode, MatchMode::Exact);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            public_key = "abc"

            [analysis]
            default_mode = "ignore-case"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.public_key.as_deref(), Some("abc"));
        assert_eq!(config.api.page_limit, 100);
        assert_eq!(config.analysis.default_mode, MatchMode::IgnoreCase);
        assert_eq!(config.analysis.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_load_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\npublic_key = \"key\"\nmax_pages = 250\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api.public_key.as_deref(), Some("key"));
        assert_eq!(config.api.max_pages, 250);
        assert_eq!(config.api.model, "page");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\npublic_key = ").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (PUBLIC_KEY_ENV, "public"),
            (PRIVATE_KEY_ENV, "  "),
            (API_URL_ENV, "http://localhost:9999/api"),
        ]);

        let mut config = Config::default();
        config.api.private_key = Some("from-file".into());
        config.apply_env(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.api.public_key.as_deref(), Some("public"));
        assert_eq!(config.api.private_key.as_deref(), Some("from-file"));
        assert_eq!(config.api.base_url, "http://localhost:9999/api");
    }

    #[test]
    fn test_validate() {
        let mut api = ApiConfig::default();
        assert!(api.validate().is_err());

        api.public_key = Some(String::new());
        assert!(api.validate().is_err());

        api.public_key = Some("key".into());
        assert!(api.validate().is_ok());

        api.page_limit = 0;
        assert!(api.validate().is_err());
    }
}
