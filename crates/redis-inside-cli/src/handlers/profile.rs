//! Profile command handler.
//!
//! Displays what a search would try, without searching.

use std::fmt::Write as _;

use anyhow::Result;
use redis_inside_core::{BinaryLocator, LocatorConfig, OsKind};

use crate::error::CliError;

/// Execute the profile command.
pub fn execute() -> Result<()> {
    let config = LocatorConfig::from_env();
    let locator = BinaryLocator::from_config(&config).map_err(CliError::from)?;
    print!("{}", render(&OsKind::current(), &config, &locator));
    Ok(())
}

/// Render the profile in `key = value` lines.
///
/// List values repeat the key once per entry, in search order.
pub fn render(os: &OsKind, config: &LocatorConfig, locator: &BinaryLocator) -> String {
    let profile = locator.profile();
    let mut out = String::new();

    let _ = writeln!(out, "os = {}", os.description());
    let _ = writeln!(out, "package = {}", config.package_name);
    let _ = writeln!(out, "search_pattern = {}", profile.search_pattern());
    let _ = writeln!(
        out,
        "search_pattern_wildcards = {}",
        profile.search_pattern().has_wildcards()
    );
    let _ = writeln!(
        out,
        "cache_root = {}",
        profile
            .cache_root()
            .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string())
    );
    for pattern in locator.pattern_variants() {
        let _ = writeln!(out, "pattern_variant = {pattern}");
    }
    for root in locator.candidate_roots() {
        let _ = writeln!(out, "candidate_root = {}", root.display());
    }
    out
}
