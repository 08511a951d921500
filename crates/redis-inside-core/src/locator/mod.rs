//! Resolution of the vendored Redis binaries folder.
//!
//! This module provides the search used by every consumer of the binaries:
//! - Platform profile (search pattern and package cache root)
//! - Structured search patterns with single-level wildcard segments
//! - Upward directory search across ordered candidate roots
//! - A locator that resolves once and caches the result
//!
//! # Design
//!
//! - Returns `PathBuf` and `LocatorError` for clear error handling
//! - Only existence checks and directory listings; nothing is ever written
//! - OS-specific decisions happen once, in `platform`, and are injected

mod cached;
mod config;
mod error;
mod pattern;
mod platform;
mod search;

#[cfg(test)]
mod test_utils;

// Re-export public API

// Error type
pub use error::LocatorError;

// Platform detection
pub use platform::{OsKind, PlatformProfile, current_executing_directory, detect_profile};

// Patterns
pub use pattern::{SearchPattern, Segment, pattern_variants};

// Search
pub use search::{BinarySearch, UpwardResolver, filter_candidate_roots, find_upwards};

// Configuration
pub use config::{DEFAULT_PACKAGE_NAME, LocatorConfig};

// Cached accessor
pub use cached::BinaryLocator;
