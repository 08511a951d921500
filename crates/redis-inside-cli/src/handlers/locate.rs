//! Locate command handler.
//!
//! Prints the resolved binaries folder so scripts can consume it directly.

use std::path::PathBuf;

use anyhow::Result;
use redis_inside_core::{BinaryLocator, LocatorConfig};
use tracing::debug;

use crate::error::CliError;

/// Execute the locate command.
///
/// `roots` are searched before any configured roots, in the order given.
pub fn execute(roots: &[PathBuf]) -> Result<()> {
    let folder = resolve(LocatorConfig::from_env(), roots)?;
    println!("{}", folder.display());
    Ok(())
}

/// Resolve the folder with `roots` placed ahead of `config`'s extra roots.
pub fn resolve(config: LocatorConfig, roots: &[PathBuf]) -> Result<PathBuf, CliError> {
    let config = with_cli_roots(config, roots);
    let locator = BinaryLocator::from_config(&config)?;
    debug!(roots = ?locator.candidate_roots(), "Locating Redis binaries");
    Ok(locator.folder()?)
}

fn with_cli_roots(config: LocatorConfig, roots: &[PathBuf]) -> LocatorConfig {
    roots
        .iter()
        .rev()
        .fold(config, |config, root| config.with_priority_root(root))
}
