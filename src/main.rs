//! confplan CLI entrypoint.
//!
//! This is the main entrypoint for the confplan command-line tool.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use confplan::cli::{Cli, Commands, OutputFormatter};
use confplan::config::{
    ComponentProfile, ConfigDocument, ConfigParser, ConfigValidator, find_config_file,
};
use confplan::error::{ConfigError, ConfplanError, Result};
use confplan::planner::{ActionPlanner, JDBC_DRIVERS, LifecycleCommand};
use confplan::select::RecordingRunner;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Starter document written by `init`.
const COMMAND_TEMPLATE: &str = include_str!("../templates/command.json");

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr so plans printed on stdout stay machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Plan { lifecycle, inline } => {
            cmd_plan(cli.config.as_ref(), inline.as_deref(), lifecycle, &formatter)
        }
        Commands::Validate {
            lifecycle,
            inline,
            warnings,
        } => cmd_validate(
            cli.config.as_ref(),
            inline.as_deref(),
            lifecycle,
            warnings,
            &formatter,
        ),
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Drivers => {
            println!("{}", formatter.format_drivers(JDBC_DRIVERS));
            Ok(())
        }
    }
}

/// Print the plan for a lifecycle command.
fn cmd_plan(
    config_path: Option<&PathBuf>,
    inline: Option<&str>,
    lifecycle: LifecycleCommand,
    formatter: &OutputFormatter,
) -> Result<()> {
    let doc = load_document(config_path, inline)?;
    let profile = ComponentProfile::sqoop();

    // Selection commands are recorded, not run: planning is a dry run.
    let runner = RecordingRunner::new();
    let plan = ActionPlanner::new(&profile, &runner).plan(lifecycle, &doc)?;

    info!("Planned {} actions for {} {}", plan.action_count(), plan.component, lifecycle);
    println!("{}", formatter.format_plan(&plan, &runner.invocations()));

    Ok(())
}

/// Validate the document for a lifecycle command.
fn cmd_validate(
    config_path: Option<&PathBuf>,
    inline: Option<&str>,
    lifecycle: LifecycleCommand,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let doc = load_document(config_path, inline)?;
    let validator = ConfigValidator::for_profile(ComponentProfile::sqoop());
    let result = validator.check(&doc, lifecycle);

    println!("{}", formatter.format_validation(&result, show_warnings));

    match result.errors.first() {
        None => Ok(()),
        Some(first) => Err(ConfplanError::Config(ConfigError::validation(
            format!("{} error(s), first: {}", result.error_count(), first.message),
            first.field.clone(),
        ))),
    }
}

/// Write a starter configuration document.
fn cmd_init(path: &Path, force: bool) -> Result<()> {
    info!("Initializing configuration document in: {}", path.display());

    let document_path = path.join("command.json");
    if !force && document_path.exists() {
        eprintln!("Configuration document already exists: {}", document_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    std::fs::write(&document_path, COMMAND_TEMPLATE)?;
    eprintln!("Created: {}", document_path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit command.json with your cluster's configuration");
    eprintln!("  2. Run 'confplan validate configure' to check it");
    eprintln!("  3. Run 'confplan plan configure' to see the actions");

    Ok(())
}

/// Resolves the document from inline text, an explicit path or the search path.
fn load_document(config_path: Option<&PathBuf>, inline: Option<&str>) -> Result<ConfigDocument> {
    if let Some(content) = inline {
        debug!("Using inline configuration document");
        let parser = ConfigParser::new();
        parser.load_dotenv()?;
        let mut doc = parser.parse_inline(content)?;
        ConfigParser::apply_overrides(&mut doc, |name| std::env::var(name).ok());
        return Ok(doc);
    }

    let path = match config_path {
        Some(p) => p.clone(),
        None => find_config_file(std::env::current_dir()?)?,
    };

    let mut parser = ConfigParser::new();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        parser = parser.with_base_path(parent);
    }
    parser.load_dotenv()?;
    parser.load_with_env(&path)
}
