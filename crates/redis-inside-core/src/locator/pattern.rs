//! Structured relative search patterns.
//!
//! A pattern is a sequence of segments, each either a literal directory name
//! or a glob that matches any single directory name at that position. Globs
//! never cross directory levels, so `*/tools/redis` matches `x/tools/redis`
//! but not `x/y/tools/redis`.

use std::fmt;
use std::fs;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::trace;

use super::error::LocatorError;

/// Directory below which package managers extract packages.
const PACKAGES_DIR: &str = "packages";

/// One directory level of a [`SearchPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact directory name.
    Literal(String),
    /// Any single directory name accepted by the glob.
    Wildcard(Pattern),
}

impl Segment {
    /// Classify a raw segment: anything containing glob metacharacters is a wildcard.
    fn parse(raw: &str) -> Result<Self, LocatorError> {
        if raw.contains(['*', '?', '[']) {
            Pattern::new(raw)
                .map(Self::Wildcard)
                .map_err(|e| LocatorError::InvalidPattern {
                    pattern: raw.to_string(),
                    reason: e.to_string(),
                })
        } else {
            Ok(Self::Literal(raw.to_string()))
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Literal(name) => name,
            Self::Wildcard(pattern) => pattern.as_str(),
        }
    }
}

/// Relative directory pattern tried beneath a candidate directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    segments: Vec<Segment>,
}

impl SearchPattern {
    /// Parse a pattern, accepting both `/` and `\` as separators.
    ///
    /// Empty and `.` segments are dropped; a pattern with no segments left is
    /// rejected.
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        let segments = raw
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(Segment::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_segments(segments).ok_or_else(|| LocatorError::InvalidPattern {
            pattern: raw.to_string(),
            reason: "pattern has no directory segments".to_string(),
        })
    }

    /// Build a pattern from already classified segments.
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any segment is a wildcard.
    pub fn has_wildcards(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Wildcard(_)))
    }

    /// Return `prefix` followed by this pattern.
    #[must_use]
    pub fn prefixed(&self, prefix: &[Segment]) -> Self {
        let segments = prefix.iter().chain(&self.segments).cloned().collect();
        Self { segments }
    }

    /// Find a directory matching this pattern directly beneath `base`.
    ///
    /// Unreadable directories count as non-matches. When a wildcard matches
    /// several names they are tried in sorted order and the first one that
    /// leads to an existing directory wins.
    pub fn find_under(&self, base: &Path) -> Option<PathBuf> {
        descend(base.to_path_buf(), &self.segments)
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.segments.iter().map(Segment::as_str).collect();
        f.write_str(&joined.join(MAIN_SEPARATOR_STR))
    }
}

fn descend(dir: PathBuf, segments: &[Segment]) -> Option<PathBuf> {
    let Some((head, rest)) = segments.split_first() else {
        return dir.is_dir().then_some(dir);
    };

    match head {
        Segment::Literal(name) => {
            let next = dir.join(name);
            if next.is_dir() {
                descend(next, rest)
            } else {
                None
            }
        }
        Segment::Wildcard(pattern) => matching_children(&dir, pattern)
            .into_iter()
            .find_map(|child| descend(child, rest)),
    }
}

/// Child directories of `dir` whose names match `pattern`, sorted by name.
fn matching_children(dir: &Path, pattern: &Pattern) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            trace!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            return Vec::new();
        }
    };

    let options = MatchOptions {
        // Package caches lowercase folder names on case-insensitive filesystems
        case_sensitive: !cfg!(windows),
        ..MatchOptions::new()
    };

    let mut children: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.matches_with(name, options))
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    children.sort();
    children
}

/// Build the ordered pattern variants tried under every candidate root.
///
/// 1. The bare pattern (direct installation next to the application)
/// 2. `packages/<package>*/<pattern>` (flat package extraction)
/// 3. `packages/<package>/*/<pattern>` (versioned package cache layout)
pub fn pattern_variants(
    base: &SearchPattern,
    package: &str,
) -> Result<Vec<SearchPattern>, LocatorError> {
    let package = package.trim();
    if package.is_empty() || package.contains(['/', '\\']) {
        return Err(LocatorError::InvalidPattern {
            pattern: package.to_string(),
            reason: "package name must be a single non-empty directory name".to_string(),
        });
    }

    let packages = Segment::Literal(PACKAGES_DIR.to_string());
    let flat = Pattern::new(&format!("{}*", Pattern::escape(package))).map_err(|e| {
        LocatorError::InvalidPattern {
            pattern: package.to_string(),
            reason: e.to_string(),
        }
    })?;
    let any_version = Pattern::new("*").map_err(|e| LocatorError::InvalidPattern {
        pattern: "*".to_string(),
        reason: e.to_string(),
    })?;

    Ok(vec![
        base.clone(),
        base.prefixed(&[packages.clone(), Segment::Wildcard(flat)]),
        base.prefixed(&[
            packages,
            Segment::Literal(package.to_string()),
            Segment::Wildcard(any_version),
        ]),
    ])
}
