//! Offline inspection tool for mempool envelopes.
//!
//! Provides commands for:
//! - Encoding a transaction announcement into envelope hex
//! - Decoding envelope hex and classifying failures
//! - Listing registered message tags

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
