//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying plans,
//! validation results and the driver catalog in text or JSON.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::{ConfigHasher, ValidationResult};
use crate::planner::{ActionKind, ActionPlan, JdbcDriver};
use crate::select::Invocation;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Plan action row for table display.
#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Details")]
    details: String,
}

/// Driver catalog row for table display.
#[derive(Tabled)]
struct DriverRow {
    #[tabled(rename = "Driver class")]
    class_name: &'static str,
    #[tabled(rename = "Jar")]
    jar_name: &'static str,
    #[tabled(rename = "Download")]
    download_name: &'static str,
}

/// Stable JSON shape of a plan.
#[derive(Serialize)]
struct PlanJson<'a> {
    #[serde(flatten)]
    plan: &'a ActionPlan,
    conf_select_calls: &'a [Invocation],
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a plan together with the selection commands issued while building it.
    #[must_use]
    pub fn format_plan(&self, plan: &ActionPlan, calls: &[Invocation]) -> String {
        match self.format {
            OutputFormat::Json => to_json(&PlanJson {
                plan,
                conf_select_calls: calls,
            }),
            OutputFormat::Text => Self::format_plan_text(plan, calls),
        }
    }

    /// Formats a plan as text.
    fn format_plan_text(plan: &ActionPlan, calls: &[Invocation]) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nPlan: {} {}\n   Document hash: {}\n\n",
            plan.component.bold(),
            plan.command,
            ConfigHasher::new().short_hash(&plan.document_hash)
        );

        if plan.is_empty() {
            let _ = writeln!(output, "{} No actions required.", "✓".green());
        } else {
            let rows: Vec<ActionRow> = plan
                .actions
                .iter()
                .enumerate()
                .map(|(i, a)| ActionRow {
                    index: i + 1,
                    kind: Self::format_kind(a.kind()),
                    path: a
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    details: Self::truncate(&a.details(), 72),
                })
                .collect();

            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        if !calls.is_empty() {
            output.push_str("\nConfiguration directory selection:\n");
            for call in calls {
                let _ = writeln!(output, "   {call}");
            }
        }

        let _ = write!(
            output,
            "\n{} actions: {} links, {} directories, {} files, {} executes\n",
            plan.action_count(),
            plan.count_of(ActionKind::Link),
            plan.count_of(ActionKind::Directory),
            plan.count_of(ActionKind::File),
            plan.count_of(ActionKind::Execute)
        );

        output
    }

    /// Formats a validation result.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => to_json(&serde_json::json!({
                "valid": result.is_valid(),
                "errors": result.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "warnings": result.warnings,
            })),
            OutputFormat::Text => {
                let mut output = if result.is_valid() {
                    format!("{} Configuration is valid.\n", "✓".green())
                } else {
                    let mut output = format!("{} Configuration is invalid:\n", "✗".red());
                    for error in &result.errors {
                        let _ = writeln!(output, "   - {error}");
                    }
                    output
                };

                if show_warnings && !result.warnings.is_empty() {
                    let _ = write!(output, "\n{} Warnings:\n", "⚠".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }

                output
            }
        }
    }

    /// Formats the JDBC driver catalog.
    #[must_use]
    pub fn format_drivers(&self, drivers: &[JdbcDriver]) -> String {
        match self.format {
            OutputFormat::Json => to_json(
                &drivers
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "class_name": d.class_name,
                            "jar_name": d.jar_name,
                            "download_name": d.download_name,
                        })
                    })
                    .collect::<Vec<_>>(),
            ),
            OutputFormat::Text => {
                let rows = drivers.iter().map(|d| DriverRow {
                    class_name: d.class_name,
                    jar_name: d.jar_name,
                    download_name: d.download_name,
                });
                format!("{}\n", Table::new(rows))
            }
        }
    }

    /// Formats an action kind with color.
    fn format_kind(kind: ActionKind) -> String {
        match kind {
            ActionKind::Link => "Link".cyan().to_string(),
            ActionKind::Directory => "Directory".blue().to_string(),
            ActionKind::File => "File".green().to_string(),
            ActionKind::Execute => "Execute".yellow().to_string(),
        }
    }

    /// Truncates a string to a maximum number of characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{kept}...")
        }
    }
}

/// Serializes a value as pretty JSON.
fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{
        DRIVER_FILE_MODE, FileAction, FileContent, JDBC_DRIVERS, LifecycleCommand, ResourceAction,
    };
    use crate::select::CallKind;
    use serde_json::Value;

    fn sample_plan() -> ActionPlan {
        ActionPlan::new(
            LifecycleCommand::Configure,
            "sqoop",
            "0123456789abcdef",
            vec![
                ResourceAction::link(
                    "/usr/lib/sqoop/lib/mysql-connector-java.jar",
                    "/usr/share/java/mysql-connector-java.jar",
                ),
                FileAction::new("/usr/lib/sqoop/lib/ojdbc.jar")
                    .with_content(FileContent::DownloadSource {
                        url: String::from("http://host/resources//oracle-jdbc-driver.jar"),
                    })
                    .with_mode(DRIVER_FILE_MODE)
                    .into(),
            ],
        )
    }

    #[test]
    fn test_plan_json_schema() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let calls = vec![Invocation {
            kind: CallKind::Call,
            argv: vec![String::from("conf-select")],
            sudo: true,
        }];

        let value: Value = serde_json::from_str(&formatter.format_plan(&sample_plan(), &calls)).unwrap();
        assert_eq!(value["command"], "configure");
        assert_eq!(value["component"], "sqoop");
        assert_eq!(value["actions"][0]["type"], "Link");
        assert_eq!(value["actions"][0]["to"], "/usr/share/java/mysql-connector-java.jar");
        assert_eq!(value["actions"][1]["mode"], "0644");
        assert_eq!(value["conf_select_calls"][0]["kind"], "call");
        assert_eq!(value["conf_select_calls"][0]["sudo"], true);
    }

    #[test]
    fn test_plan_text() {
        colored::control::set_override(false);
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_plan(&sample_plan(), &[]);

        assert!(text.contains("Document hash: 01234567"));
        assert!(text.contains("/usr/lib/sqoop/lib/ojdbc.jar"));
        assert!(text.contains("2 actions: 1 links, 0 directories, 1 files, 0 executes"));
    }

    #[test]
    fn test_validation_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let result = ValidationResult {
            errors: vec![],
            warnings: vec![String::from("stack version not set")],
        };
        let value: Value = serde_json::from_str(&formatter.format_validation(&result, true)).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["warnings"][0], "stack version not set");
    }

    #[test]
    fn test_drivers_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let value: Value = serde_json::from_str(&formatter.format_drivers(JDBC_DRIVERS)).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(JDBC_DRIVERS.len()));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("abcdefghijkl", 8), "abcde...");
    }
}
