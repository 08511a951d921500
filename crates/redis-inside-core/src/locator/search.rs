//! Upward directory search.
//!
//! For every candidate root (in order) and every pattern variant (in order),
//! the resolver checks the root and each of its ancestors up to the
//! filesystem root. The first hit wins.

use std::path::{self, Component, Path, PathBuf};

use tracing::debug;

use super::error::LocatorError;
use super::pattern::SearchPattern;

/// Strategy that turns candidate roots into the binaries folder.
///
/// [`UpwardResolver`] is the production implementation; the seam exists so
/// the caching layer can be exercised without touching the filesystem.
pub trait BinarySearch {
    fn search(&self, roots: &[PathBuf]) -> Result<PathBuf, LocatorError>;
}

/// Drop missing, empty and whitespace-only roots while keeping order.
pub fn filter_candidate_roots<I, T>(roots: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = T>,
    T: Into<Option<PathBuf>>,
{
    roots
        .into_iter()
        .filter_map(Into::into)
        .filter(|root| !root.as_os_str().to_string_lossy().trim().is_empty())
        .collect()
}

/// Search `start` and each of its ancestors for `pattern`.
///
/// A start directory that does not exist never matches. `.` and `..`
/// components are folded away first, so only true ancestors of the start
/// are visited and the returned path never contains them.
pub fn find_upwards(start: &Path, pattern: &SearchPattern) -> Option<PathBuf> {
    if !start.is_dir() {
        debug!(start = %start.display(), "Candidate root does not exist, skipping");
        return None;
    }

    normalize_lexically(start)
        .ancestors()
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| pattern.find_under(dir))
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
        }
    }
    normalized
}

/// Ordered pattern variants searched upward from each candidate root.
#[derive(Debug, Clone)]
pub struct UpwardResolver {
    patterns: Vec<SearchPattern>,
}

impl UpwardResolver {
    pub const fn new(patterns: Vec<SearchPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[SearchPattern] {
        &self.patterns
    }

    /// Return the first directory matched by any (root, pattern) pair.
    ///
    /// Roots form the outer loop: every pattern is tried against a root
    /// before moving on to the next root. Blank roots are ignored.
    pub fn resolve(&self, roots: &[PathBuf]) -> Result<PathBuf, LocatorError> {
        let roots = filter_candidate_roots(roots.iter().cloned());

        for root in &roots {
            let start = path::absolute(root).unwrap_or_else(|_| root.clone());
            for pattern in &self.patterns {
                debug!(root = %start.display(), pattern = %pattern, "Searching upward");
                if let Some(found) = find_upwards(&start, pattern) {
                    return Ok(found);
                }
            }
        }

        Err(LocatorError::BinariesNotFound {
            patterns: self.patterns.iter().map(ToString::to_string).collect(),
            roots,
        })
    }
}

impl BinarySearch for UpwardResolver {
    fn search(&self, roots: &[PathBuf]) -> Result<PathBuf, LocatorError> {
        self.resolve(roots)
    }
}
