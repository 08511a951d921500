//! Resolve-once accessor for the binaries folder.
//!
//! The platform profile is selected when the locator is built; the search
//! itself runs on the first call to [`BinaryLocator::folder`]. A successful
//! result is kept for the lifetime of the locator. Failures are returned to
//! the caller and not remembered, so a later call searches again.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use super::config::LocatorConfig;
use super::error::LocatorError;
use super::pattern::{SearchPattern, pattern_variants};
use super::platform::{OsKind, PlatformProfile, current_executing_directory, detect_profile};
use super::search::{BinarySearch, UpwardResolver, filter_candidate_roots};

/// Locates the Redis binaries folder and caches it.
///
/// Pass the locator to whatever needs the folder (for example a process
/// launcher); it is cheap to share behind a reference or an `Arc`.
#[derive(Debug)]
pub struct BinaryLocator<S = UpwardResolver> {
    profile: PlatformProfile,
    roots: Vec<PathBuf>,
    search: S,
    folder: Mutex<Option<PathBuf>>,
}

impl BinaryLocator {
    /// Build a locator for the running platform using environment configuration.
    ///
    /// Fails with [`LocatorError::UnsupportedPlatform`] on anything other
    /// than Linux or Windows.
    pub fn new() -> Result<Self, LocatorError> {
        Self::from_config(&LocatorConfig::from_env())
    }

    /// Build a locator for the running platform with explicit configuration.
    pub fn from_config(config: &LocatorConfig) -> Result<Self, LocatorError> {
        let profile = detect_profile(&OsKind::current(), &config.package_name, |key| {
            env::var(key).ok()
        })?;
        Self::with_profile(profile, config, current_executing_directory())
    }

    /// Build a locator from an already selected profile.
    ///
    /// Candidate roots are, in order: the configured extra roots, the
    /// executing directory, then the profile's package cache root.
    pub fn with_profile(
        profile: PlatformProfile,
        config: &LocatorConfig,
        executing_dir: Option<PathBuf>,
    ) -> Result<Self, LocatorError> {
        let patterns = pattern_variants(profile.search_pattern(), &config.package_name)?;
        let cache_root = profile.cache_root().map(Path::to_path_buf);

        let roots = config
            .extra_roots
            .iter()
            .cloned()
            .map(Some)
            .chain([executing_dir, cache_root]);

        Ok(Self::with_search(
            profile,
            roots.collect::<Vec<_>>(),
            UpwardResolver::new(patterns),
        ))
    }

    /// Pattern variants tried under every candidate root, in order.
    pub fn pattern_variants(&self) -> &[SearchPattern] {
        self.search.patterns()
    }
}

impl<S: BinarySearch> BinaryLocator<S> {
    /// Build a locator around a custom search strategy.
    pub fn with_search<I, T>(profile: PlatformProfile, roots: I, search: S) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<PathBuf>>,
    {
        let roots = filter_candidate_roots(roots);
        debug!(roots = ?roots, "Configured candidate roots");

        Self {
            profile,
            roots,
            search,
            folder: Mutex::new(None),
        }
    }

    /// Absolute path of the binaries folder, searching on first use.
    ///
    /// The lock is held across the search, so concurrent first calls run
    /// the search once and the rest observe the stored result.
    pub fn folder(&self) -> Result<PathBuf, LocatorError> {
        let mut slot = self.folder.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(folder) = slot.as_ref() {
            return Ok(folder.clone());
        }

        let folder = self.search.search(&self.roots)?;
        info!(folder = %folder.display(), "Resolved Redis binaries folder");
        *slot = Some(folder.clone());
        Ok(folder)
    }

    /// The stored folder, if a previous call to [`folder`](Self::folder) succeeded.
    pub fn cached_folder(&self) -> Option<PathBuf> {
        self.folder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub const fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    /// Candidate roots after blank filtering, in search order.
    pub fn candidate_roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub const fn search(&self) -> &S {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::test_utils::make_dirs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use tempfile::TempDir;

    /// Search stub that counts invocations and returns a fixed outcome.
    struct CountingSearch {
        calls: AtomicUsize,
        result: Option<PathBuf>,
    }

    impl CountingSearch {
        fn found(path: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Some(PathBuf::from(path)),
            }
        }

        fn missing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl BinarySearch for CountingSearch {
        fn search(&self, roots: &[PathBuf]) -> Result<PathBuf, LocatorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| LocatorError::BinariesNotFound {
                    patterns: vec!["tools/redis".to_string()],
                    roots: roots.to_vec(),
                })
        }
    }

    fn linux_profile(home: Option<&str>) -> PlatformProfile {
        let home = home.map(str::to_string);
        detect_profile(&OsKind::Linux, "RedisInside", move |key| {
            (key == "HOME").then(|| home.clone()).flatten()
        })
        .unwrap()
    }

    #[test]
    fn folder_searches_once() {
        let locator = BinaryLocator::with_search(
            linux_profile(None),
            [PathBuf::from("/app")],
            CountingSearch::found("/app/tools/redis"),
        );

        for _ in 0..5 {
            assert_eq!(locator.folder().unwrap(), PathBuf::from("/app/tools/redis"));
        }
        assert_eq!(locator.search().calls(), 1);
        assert_eq!(locator.cached_folder(), Some(PathBuf::from("/app/tools/redis")));
    }

    #[test]
    fn failures_are_not_cached() {
        let locator = BinaryLocator::with_search(
            linux_profile(None),
            [PathBuf::from("/app")],
            CountingSearch::missing(),
        );

        assert!(locator.folder().is_err());
        assert!(locator.folder().is_err());
        assert_eq!(locator.search().calls(), 2);
        assert_eq!(locator.cached_folder(), None);
    }

    #[test]
    fn concurrent_first_access_searches_once() {
        let locator = Arc::new(BinaryLocator::with_search(
            linux_profile(None),
            [PathBuf::from("/app")],
            CountingSearch::found("/app/tools/redis"),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locator = Arc::clone(&locator);
                thread::spawn(move || locator.folder().unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), PathBuf::from("/app/tools/redis"));
        }
        assert_eq!(locator.search().calls(), 1);
    }

    #[test]
    fn roots_follow_configured_order() {
        let config = LocatorConfig::default().with_extra_root("/extra");
        let locator = BinaryLocator::with_profile(
            linux_profile(Some("/home/dev")),
            &config,
            Some(PathBuf::from("/opt/app")),
        )
        .unwrap();

        assert_eq!(
            locator.candidate_roots(),
            &[
                PathBuf::from("/extra"),
                PathBuf::from("/opt/app"),
                PathBuf::from("/home/dev/.nuget/packages/RedisInside"),
            ]
        );
        assert_eq!(locator.pattern_variants().len(), 3);
    }

    #[test]
    fn missing_executing_dir_and_cache_root_are_dropped() {
        let locator =
            BinaryLocator::with_profile(linux_profile(None), &LocatorConfig::default(), None)
                .unwrap();
        assert!(locator.candidate_roots().is_empty());

        let err = locator.folder().unwrap_err();
        assert!(matches!(
            err,
            LocatorError::BinariesNotFound { ref roots, .. } if roots.is_empty()
        ));
    }

    #[test]
    fn resolves_from_package_cache_layout() {
        let home = TempDir::new().unwrap();
        let cache = make_dirs(home.path(), ".nuget/packages/RedisInside");
        let expected = make_dirs(&cache, "2.3.1/tools/redis");

        let home_str = home.path().to_str().unwrap();
        let locator = BinaryLocator::with_profile(
            linux_profile(Some(home_str)),
            &LocatorConfig::default(),
            None,
        )
        .unwrap();

        assert_eq!(locator.candidate_roots(), &[cache]);
        assert_eq!(locator.folder().unwrap(), expected);
    }

    #[test]
    fn from_config_succeeds_on_supported_platforms() {
        let result = BinaryLocator::from_config(&LocatorConfig::default());

        if cfg!(any(target_os = "linux", target_os = "windows")) {
            let locator = result.unwrap();
            assert!(locator.cached_folder().is_none());
        } else {
            assert!(matches!(
                result,
                Err(LocatorError::UnsupportedPlatform { .. })
            ));
        }
    }
}
