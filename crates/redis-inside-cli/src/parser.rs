//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for locating vendored Redis server binaries.
#[derive(Parser)]
#[command(name = "redis-inside")]
#[command(about = "Locate the vendored Redis server binaries")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
