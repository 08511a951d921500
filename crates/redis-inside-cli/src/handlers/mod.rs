//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Turn CLI input into a `LocatorConfig`
//! 2. Build a `BinaryLocator`
//! 3. Format output for the terminal

pub mod locate;
pub mod profile;
