//! CLI error handling with semantic exit codes.
//!
//! Failures map to exit codes by category so scripts can tell a missing page
//! from an unreachable API.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `NotFound` | Page, input file or model not found |
//! | 4 | `InvalidQuery` | Section pattern does not compile |
//! | 5 | `Network` | Content API request failed |
//! | 6 | `Timeout` | Content API request timed out |
//!
//! # Usage
//!
//! ```bash
//! blockscope sections /pricing --json
//! case $? in
//!     0) echo "Success" ;;
//!     3) echo "Page not found" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Includes a missing API key and unreadable config files.
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// Section pattern error (exit code 4).
    InvalidQuery = 4,

    /// Network or HTTP failure (exit code 5).
    Network = 5,

    /// Operation timed out (exit code 6).
    Timeout = 6,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::InvalidQuery => "invalid query",
            Self::Network => "network error",
            Self::Timeout => "timeout",
        }
    }

    /// Map a core library error to its category.
    #[must_use]
    pub fn from_core(err: &blockscope_core::Error) -> Self {
        use blockscope_core::Error;

        match err {
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => Self::NotFound,
            Error::Io(_) | Error::Serialization(_) | Error::Other(_) => Self::Internal,
            Error::Network(e) if e.is_timeout() => Self::Timeout,
            Error::Network(_) => Self::Network,
            Error::Config(_) | Error::InvalidUrl(_) => Self::Usage,
            Error::NotFound(_) => Self::NotFound,
            Error::InvalidQuery(_) => Self::InvalidQuery,
            Error::Timeout(_) => Self::Timeout,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Heuristic fallback for errors that carry no category.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Check before Network so "connection timeout" is a timeout
        if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
            return Self::Timeout;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("dns")
            || msg_lower.contains("http")
            || msg_lower.contains("unreachable")
        {
            return Self::Network;
        }

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("invalid query")
            || msg_lower.contains("regex")
            || msg_lower.contains("pattern")
        {
            return Self::InvalidQuery;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("missing required")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("configuration")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so context chains survive.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit [`CliError`]s win, then core library errors anywhere in the
/// context chain, then message inference.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<blockscope_core::Error>())
    {
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    mod error_category {
        use super::*;

        #[test]
        fn test_exit_codes() {
            assert_eq!(ErrorCategory::Internal.exit_code(), 1);
            assert_eq!(ErrorCategory::Usage.exit_code(), 2);
            assert_eq!(ErrorCategory::NotFound.exit_code(), 3);
            assert_eq!(ErrorCategory::InvalidQuery.exit_code(), 4);
            assert_eq!(ErrorCategory::Network.exit_code(), 5);
            assert_eq!(ErrorCategory::Timeout.exit_code(), 6);
        }

        #[test]
        fn test_from_core() {
            use blockscope_core::Error;

            let missing = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
            assert_eq!(ErrorCategory::from_core(&missing), ErrorCategory::NotFound);
            assert_eq!(
                ErrorCategory::from_core(&Error::Config("no key".into())),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::from_core(&Error::InvalidQuery("(".into())),
                ErrorCategory::InvalidQuery
            );
            assert_eq!(
                ErrorCategory::from_core(&Error::Timeout("slow".into())),
                ErrorCategory::Timeout
            );
            assert_eq!(
                ErrorCategory::from_core(&Error::NotFound("page".into())),
                ErrorCategory::NotFound
            );
        }

        #[test]
        fn test_infer_from_message() {
            assert_eq!(
                ErrorCategory::infer_from_message("Request timeout after 30s"),
                ErrorCategory::Timeout
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Connection refused"),
                ErrorCategory::Network
            );
            assert_eq!(
                ErrorCategory::infer_from_message("No such file or directory"),
                ErrorCategory::NotFound
            );
            assert_eq!(
                ErrorCategory::infer_from_message("regex parse error"),
                ErrorCategory::InvalidQuery
            );
            assert_eq!(
                ErrorCategory::infer_from_message("something odd"),
                ErrorCategory::Internal
            );
        }

        #[test]
        fn test_display() {
            assert_eq!(ErrorCategory::NotFound.to_string(), "not found");
            assert_eq!(ErrorCategory::Network.to_string(), "network error");
        }
    }

    mod exit_code_from_error {
        use super::*;

        #[test]
        fn test_cli_error_wins() {
            let err: anyhow::Error = CliError::usage(anyhow!("network down")).into();
            assert_eq!(exit_code_from_error(&err), 2);
        }

        #[test]
        fn test_core_error_through_context() {
            let result: Result<(), blockscope_core::Error> =
                Err(blockscope_core::Error::NotFound("Page not found: '/x'".into()));
            let err = result.context("Failed to analyze page").unwrap_err();
            assert_eq!(exit_code_from_error(&err), 3);
        }

        #[test]
        fn test_inferred() {
            let err = anyhow!("Operation timed out");
            assert_eq!(exit_code_from_error(&err), 6);
        }
    }
}
