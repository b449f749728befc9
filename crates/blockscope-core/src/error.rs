//! Error types and handling for blockscope-core operations.
//!
//! The pure block-tree operations (extraction, flattening, matching and
//! aggregation) are total and never return an error. Everything here belongs to
//! the layers around them: talking to the content API, loading configuration,
//! reading saved responses and compiling match patterns.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading saved responses or configuration files
//! - **Network Errors**: HTTP requests against the content API
//! - **Configuration Errors**: invalid settings, missing API keys
//! - **Query Errors**: section patterns that fail to compile
//! - **Serialization Errors**: JSON/TOML decoding and encoding
//!
//! ## Recovery Hints
//!
//! ```rust
//! use blockscope_core::{Error, Result};
//!
//! fn handle(result: Result<()>) {
//!     match result {
//!         Err(e) if e.is_recoverable() => println!("temporary failure, retry: {e}"),
//!         Err(e) => println!("{} failure: {e}", e.category()),
//!         Ok(()) => {},
//!     }
//! }
//! # handle(Ok(()));
//! ```

use thiserror::Error;

/// The main error type for blockscope-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading saved content-API responses and configuration files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Covers HTTP requests against the content API. The underlying
    /// `reqwest::Error` is preserved for connection details.
    ///
    /// ## Recoverability
    ///
    /// Connection and timeout errors are typically recoverable, while
    /// authentication failures and server-side rejections are permanent.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Missing public API key when the content API is needed
    /// - Page limits of zero
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested page or resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A section query could not be compiled.
    ///
    /// Raised when a regular-expression match pattern is malformed.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Serialization or deserialization failed.
    ///
    /// Occurs when a content-API body is not JSON at all, or when
    /// configuration cannot be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::InvalidQuery(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blockscope_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Timeout("slow".into()).is_recoverable());
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "eintr")).is_recoverable());
    /// assert!(!Error::InvalidQuery("unclosed group".into()).is_recoverable());
    /// assert!(!Error::Config("missing key".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for structured logging:
    ///
    /// ```rust
    /// use blockscope_core::Error;
    ///
    /// let err = Error::NotFound("page '/home'".into());
    /// assert_eq!(err.category(), "not_found");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidQuery(_) => "invalid_query",
            Self::Timeout(_) => "timeout",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
