//! Fixtures for locator tests: temporary directory trees and scoped
//! overrides of the `REDIS_INSIDE_*` variables.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Held by every test that touches the process environment.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Overrides one variable until dropped, then puts the old value back.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        Self::replace(key, Some(value.into()))
    }

    pub fn remove(key: &'static str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &'static str, value: Option<OsString>) -> Self {
        let previous = env::var_os(key);
        apply(key, value.as_ref());
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        apply(self.key, self.previous.as_ref());
    }
}

// Callers hold ENV_LOCK, so no other test thread reads the environment meanwhile.
#[allow(unsafe_code)]
fn apply(key: &str, value: Option<&OsString>) {
    match value {
        Some(value) => unsafe { env::set_var(key, value) },
        None => unsafe { env::remove_var(key) },
    }
}

/// Create `relative` (slash separated) under `base` and return the full path.
pub fn make_dirs(base: &Path, relative: &str) -> PathBuf {
    let path = relative
        .split('/')
        .fold(base.to_path_buf(), |acc, segment| acc.join(segment));
    fs::create_dir_all(&path).expect("create fixture directories");
    path
}
