//! Core library for locating vendored Redis server binaries.
//!
//! The binaries ship inside a package (`tools/redis` under the package
//! root) and may end up in a build output directory, a flat package
//! extraction, or the per-user package cache. [`BinaryLocator`] finds the
//! folder by walking upward from a set of candidate roots and caches the
//! answer for the lifetime of the locator.
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

pub mod locator;

// Re-export commonly used types for convenience
pub use locator::{
    BinaryLocator, BinarySearch, DEFAULT_PACKAGE_NAME, LocatorConfig, LocatorError, OsKind,
    PlatformProfile, SearchPattern, Segment, UpwardResolver, current_executing_directory,
    detect_profile, filter_candidate_roots, find_upwards, pattern_variants,
};
