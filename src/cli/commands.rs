//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::planner::LifecycleCommand;

/// confplan - Plan idempotent configuration actions for cluster components.
#[derive(Parser, Debug)]
#[command(name = "confplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration document.
    #[arg(short, long, global = true, env = "CONFPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the actions a lifecycle command would apply.
    Plan {
        /// Lifecycle command to plan.
        #[arg(value_enum)]
        lifecycle: LifecycleCommand,

        /// Inline JSON document, used instead of the configuration file.
        #[arg(long)]
        inline: Option<String>,
    },

    /// Validate the configuration document for a lifecycle command.
    Validate {
        /// Lifecycle command to validate for.
        #[arg(value_enum)]
        lifecycle: LifecycleCommand,

        /// Inline JSON document, used instead of the configuration file.
        #[arg(long)]
        inline: Option<String>,

        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Write a starter configuration document.
    Init {
        /// Directory to initialize (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },

    /// List the JDBC drivers that can be installed.
    Drivers,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::try_parse_from([
            "confplan",
            "--config",
            "command.json",
            "plan",
            "pre_upgrade_restart",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("command.json")));
        assert!(matches!(
            cli.command,
            Commands::Plan {
                lifecycle: LifecycleCommand::PreUpgradeRestart,
                inline: None
            }
        ));
    }

    #[test]
    fn test_parse_inline_and_alias() {
        let cli = Cli::try_parse_from([
            "confplan",
            "--output",
            "json",
            "validate",
            "pre-upgrade-restart",
            "--inline",
            "{}",
        ])
        .unwrap();

        assert!(matches!(cli.output, OutputFormat::Json));
        let Commands::Validate { lifecycle, inline, warnings } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(lifecycle, LifecycleCommand::PreUpgradeRestart);
        assert_eq!(inline.as_deref(), Some("{}"));
        assert!(!warnings);
    }

    #[test]
    fn test_rejects_unknown_lifecycle() {
        assert!(Cli::try_parse_from(["confplan", "plan", "restart"]).is_err());
    }
}
