//! Platform profile selection.
//!
//! The profile fixes, once per process, which relative pattern identifies
//! the binaries folder and where the per-user package cache lives.

use std::env;
use std::path::{Path, PathBuf};

use super::error::LocatorError;
use super::pattern::SearchPattern;

/// Linux packages ship the binaries one directory below the package root.
const LINUX_SEARCH_PATTERN: &str = "*/tools/redis";
const WINDOWS_SEARCH_PATTERN: &str = r"tools\redis";

const WINDOWS_CACHE_TEMPLATE: &str = r"%USERPROFILE%\.nuget\packages";

/// Operating system families with distinct search profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsKind {
    Linux,
    Windows,
    /// Anything else, with a human readable description.
    Other(String),
}

impl OsKind {
    /// Detect the operating system this binary was built for.
    pub fn current() -> Self {
        Self::from_os_name(env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name to an [`OsKind`].
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            other => Self::Other(format!("{other} ({})", env::consts::ARCH)),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Other(description) => description,
        }
    }
}

/// Search pattern and package cache root for the running platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    search_pattern: SearchPattern,
    cache_root: Option<PathBuf>,
}

impl PlatformProfile {
    pub const fn new(search_pattern: SearchPattern, cache_root: Option<PathBuf>) -> Self {
        Self {
            search_pattern,
            cache_root,
        }
    }

    pub const fn search_pattern(&self) -> &SearchPattern {
        &self.search_pattern
    }

    /// Package cache root, `None` when the home directory variable was unset.
    pub fn cache_root(&self) -> Option<&Path> {
        self.cache_root.as_deref()
    }
}

/// Select the profile for `os`.
///
/// `env_lookup` is consulted for exactly one variable (`HOME` on Linux,
/// `USERPROFILE` on Windows). An unset or blank value leaves the profile
/// without a cache root instead of failing.
pub fn detect_profile<F>(
    os: &OsKind,
    package: &str,
    env_lookup: F,
) -> Result<PlatformProfile, LocatorError>
where
    F: Fn(&str) -> Option<String>,
{
    match os {
        OsKind::Linux => {
            let cache_root = non_blank(env_lookup("HOME")).map(|home| {
                PathBuf::from(home)
                    .join(".nuget")
                    .join("packages")
                    .join(package)
            });
            Ok(PlatformProfile::new(
                SearchPattern::parse(LINUX_SEARCH_PATTERN)?,
                cache_root,
            ))
        }
        OsKind::Windows => {
            let cache_root =
                expand_env_vars(WINDOWS_CACHE_TEMPLATE, &env_lookup).map(PathBuf::from);
            Ok(PlatformProfile::new(
                SearchPattern::parse(WINDOWS_SEARCH_PATTERN)?,
                cache_root,
            ))
        }
        OsKind::Other(_) => Err(LocatorError::UnsupportedPlatform {
            os: os.description().to_string(),
        }),
    }
}

/// Directory containing the running executable.
pub fn current_executing_directory() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Expand `%NAME%` references. Returns `None` if any referenced variable is
/// unset or blank.
fn expand_env_vars<F>(template: &str, env_lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('%') else {
            out.push_str(&rest[start..]);
            return Some(out);
        };
        out.push_str(&non_blank(env_lookup(&after[..end]))?);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Some(out)
}
