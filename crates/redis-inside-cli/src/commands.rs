//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands for the locator tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved Redis binaries folder
    Locate {
        /// Extra directory to search first (repeatable, searched in order)
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,
    },

    /// Show the platform profile, pattern variants and candidate roots
    Profile,
}
