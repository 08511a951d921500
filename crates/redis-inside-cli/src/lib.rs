//! Command-line front end for the Redis binaries locator.
//!
//! The binary in `main.rs` is the composition root: it sets up logging,
//! loads `.env`, parses arguments and dispatches to a handler.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
