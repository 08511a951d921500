//! CLI-specific error types and mappings.
//!
//! Maps locator errors to exit codes and user-facing messages.

use redis_inside_core::LocatorError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The binaries folder could not be found.
    #[error("{0}")]
    NotFound(String),

    /// Platform or configuration problem that retrying will not fix.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error (binaries not found)
    /// - 74: I/O error (`EX_IOERR`)
    /// - 78: Configuration error (`EX_CONFIG`)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 1,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<LocatorError> for CliError {
    fn from(err: LocatorError) -> Self {
        if err.is_recoverable() {
            Self::NotFound(err.to_string())
        } else {
            Self::Config(err.to_string())
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
