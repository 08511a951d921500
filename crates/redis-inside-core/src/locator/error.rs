//! Locator error types.
//!
//! Provides semantic errors for binaries resolution without exposing
//! filesystem details that are treated as plain non-matches.

use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while selecting a platform profile or resolving
/// the binaries folder.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The running operating system has no known search profile.
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform {
        /// Description of the detected operating system
        os: String,
    },

    /// Every (candidate root, pattern variant) combination was tried without a match.
    #[error("{}", not_found_message(.patterns, .roots))]
    BinariesNotFound {
        /// Pattern variants in the order they were tried
        patterns: Vec<String>,
        /// Candidate roots that were walked up to the filesystem root
        roots: Vec<PathBuf>,
    },

    /// A search pattern segment is not a valid glob.
    #[error("Invalid search pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl LocatorError {
    /// Whether retrying with more roots or after installing the binaries could succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::BinariesNotFound { .. })
    }
}

fn not_found_message(patterns: &[String], roots: &[PathBuf]) -> String {
    let quoted: Vec<String> = patterns.iter().map(|p| format!("\"{p}\"")).collect();
    let mut message = format!(
        "Could not find Redis binaries using the search patterns {}.",
        quoted.join(", ")
    );

    if roots.is_empty() {
        message.push_str(" No candidate directories were available to search from.");
        return message;
    }

    message.push_str(" Walked up to the root directory from the following locations:");
    for root in roots {
        let _ = write!(message, "\n  {}", root.display());
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_lists_patterns_and_roots() {
        let err = LocatorError::BinariesNotFound {
            patterns: vec!["tools/redis".into(), "packages/RedisInside*/tools/redis".into()],
            roots: vec![PathBuf::from("/opt/app"), PathBuf::from("/home/me/.nuget")],
        };
        let msg = err.to_string();

        assert!(msg.contains("\"tools/redis\""));
        assert!(msg.contains("\"packages/RedisInside*/tools/redis\""));
        assert!(msg.contains("/opt/app"));
        assert!(msg.contains("/home/me/.nuget"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn not_found_message_without_roots() {
        let err = LocatorError::BinariesNotFound {
            patterns: vec!["tools/redis".into()],
            roots: Vec::new(),
        };
        assert!(err.to_string().contains("No candidate directories"));
    }

    #[test]
    fn unsupported_platform_carries_os() {
        let err = LocatorError::UnsupportedPlatform {
            os: "freebsd".into(),
        };
        assert_eq!(err.to_string(), "Unsupported platform: freebsd");
        assert!(!err.is_recoverable());
    }
}
