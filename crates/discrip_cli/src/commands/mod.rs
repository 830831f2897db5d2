//! Subcommand implementations.

pub mod config;
pub mod rip;
pub mod scan;
