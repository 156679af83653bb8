//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyreel binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{generate_story, select_key, show_status};
