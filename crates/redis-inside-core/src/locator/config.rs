//! Locator configuration.
//!
//! Provides defaults plus environment overrides for the package name and
//! for extra directories to search before the built-in candidate roots.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Package whose `tools/redis` folder holds the binaries.
pub const DEFAULT_PACKAGE_NAME: &str = "RedisInside";

/// Overrides the package name used in cache and package-prefix patterns.
const ENV_PACKAGE: &str = "REDIS_INSIDE_PACKAGE";

/// Platform path-list of extra candidate roots, searched first.
const ENV_SEARCH_ROOTS: &str = "REDIS_INSIDE_SEARCH_ROOTS";

/// Settings that shape a [`BinaryLocator`](super::BinaryLocator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Package directory name (`RedisInside` by default).
    pub package_name: String,
    /// Directories searched before the executing directory and package cache.
    pub extra_roots: Vec<PathBuf>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            extra_roots: Vec::new(),
        }
    }
}

impl LocatorConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Blank values are ignored so an exported-but-empty variable behaves
    /// like an unset one.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_PACKAGE)
            .and_then(|v| v.into_string().ok())
            .filter(|v| !v.trim().is_empty())
        {
            config.package_name = name.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_SEARCH_ROOTS) {
            config.extra_roots = env::split_paths(&raw)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        config
    }

    /// Add a root searched ahead of everything configured so far.
    #[must_use]
    pub fn with_priority_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.extra_roots.insert(0, root.into());
        self
    }

    /// Add a root searched after the extra roots configured so far.
    #[must_use]
    pub fn with_extra_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.extra_roots.push(root.into());
        self
    }
}
