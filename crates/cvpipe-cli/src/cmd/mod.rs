//! Subcommand implementations

pub mod download;
pub mod extract;
