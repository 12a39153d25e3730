//! CLI module for the configuration planner.
//!
//! This module provides the command-line interface for planning and
//! validating lifecycle commands.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
