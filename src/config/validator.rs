//! Configuration validation for lifecycle commands.
//!
//! Planning stops at the first problem it meets. The validator instead
//! walks the whole document for a command and reports every error and
//! warning it finds, so operators can fix a document in one pass.

use crate::error::{ConfigError, ConfplanError, Result};
use tracing::debug;

use crate::planner::{LifecycleCommand, drivers};

use super::component::ComponentProfile;
use super::document::ConfigDocument;

/// Validator for configuration documents.
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Component whose sections are checked.
    profile: ComponentProfile,
}

/// Validation result containing all problems found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a validator for the default component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator for a specific component.
    #[must_use]
    pub const fn for_profile(profile: ComponentProfile) -> Self {
        Self { profile }
    }

    /// Validates a document for a lifecycle command.
    ///
    /// # Errors
    ///
    /// Returns the first error found if validation fails.
    pub fn validate(&self, doc: &ConfigDocument, command: LifecycleCommand) -> Result<ValidationResult> {
        let result = self.check(doc, command);

        if let Some(first_error) = result.errors.first() {
            Err(ConfplanError::Config(ConfigError::validation(
                first_error.message.clone(),
                first_error.field.clone(),
            )))
        } else {
            debug!("Configuration validation passed for {command}");
            Ok(result)
        }
    }

    /// Collects every error and warning without failing.
    #[must_use]
    pub fn check(&self, doc: &ConfigDocument, command: LifecycleCommand) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.check_identity(doc, &mut result);
        match command {
            LifecycleCommand::Configure => self.check_configure(doc, &mut result),
            LifecycleCommand::PreUpgradeRestart => Self::check_upgrade(doc, &mut result),
        }

        result
    }

    /// Validates identity overrides.
    fn check_identity(&self, doc: &ConfigDocument, result: &mut ValidationResult) {
        if let Err(e) = self.profile.identity(doc) {
            result.push_error_from(&e);
        }
    }

    /// Validates what `configure` reads.
    fn check_configure(&self, doc: &ConfigDocument, result: &mut ValidationResult) {
        let section = self.profile.env_section();

        match doc.require_config_str(&section, "content") {
            Ok(content) if content.trim().is_empty() => result.warnings.push(format!(
                "configurations.{section}.content is empty; the environment script will be blank"
            )),
            Ok(_) => {}
            Err(e) => result.push_error_from(&e),
        }

        match doc.stack_version() {
            Ok(Some(_)) => {}
            Ok(None) => result.warnings.push(String::from(
                "hostLevelParams.stack_version is not set; assuming the legacy layout",
            )),
            Err(e) => result.push_error_from(&e),
        }

        let list = match doc.config_str(&section, "jdbc_drivers") {
            Ok(list) => list,
            Err(e) => {
                result.push_error_from(&e);
                None
            }
        };
        let Some(list) = list else {
            return;
        };

        let selection = drivers::resolve(list);
        for name in &selection.unknown {
            result.warnings.push(format!(
                "JDBC driver '{name}' is not in the driver catalog and will be skipped"
            ));
        }

        if !selection.is_empty() {
            if let Err(e) = doc.resource_base_url() {
                result.push_error_from(&e);
            }
        }
    }

    /// Validates what `pre_upgrade_restart` reads.
    fn check_upgrade(doc: &ConfigDocument, result: &mut ValidationResult) {
        match doc.target_version() {
            Ok(Some((raw, version))) => {
                if !version.has_versioned_layout() {
                    result.warnings.push(format!(
                        "Target version {raw} predates versioned layouts; nothing will be selected"
                    ));
                }
            }
            Ok(None) => result.errors.push(ValidationError {
                field: String::from("commandParams.version"),
                message: String::from("A target version is required for pre_upgrade_restart"),
            }),
            Err(e) => result.push_error_from(&e),
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Records a configuration error raised by a document accessor.
    fn push_error_from(&mut self, error: &ConfplanError) {
        let (field, message) = match error {
            ConfplanError::Config(ConfigError::MissingKey { key }) => {
                (key.clone(), String::from("Required key is missing"))
            }
            ConfplanError::Config(ConfigError::InvalidValue { key, message }) => {
                (key.clone(), message.clone())
            }
            other => (String::from("document"), other.to_string()),
        };
        self.errors.push(ValidationError { field, message });
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: &serde_json::Value) -> ConfigDocument {
        serde_json::from_value(value.clone()).unwrap()
    }

    #[test]
    fn test_valid_configure_document() {
        let doc = document(&json!({
            "configurations": { "sqoop-env": { "content": "export A=1" } },
            "hostLevelParams": { "stack_version": "2.0" }
        }));

        let result = ConfigValidator::new()
            .validate(&doc, LifecycleCommand::Configure)
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_configure_collects_all_errors() {
        let doc = document(&json!({
            "configurations": {
                "sqoop-env": { "jdbc_drivers": "org.postgresql.Driver, org.example.Driver" },
                "cluster-env": { "user_group": 7 }
            },
            "hostLevelParams": { "stack_version": "two" }
        }));

        let result = ConfigValidator::new().check(&doc, LifecycleCommand::Configure);
        let fields: Vec<_> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "configurations.cluster-env.user_group",
                "configurations.sqoop-env.content",
                "hostLevelParams.stack_version",
                "hostLevelParams.jdk_location",
            ]
        );
        assert_eq!(result.warning_count(), 1);
        assert!(result.warnings[0].contains("org.example.Driver"));
    }

    #[test]
    fn test_validate_returns_first_error() {
        let doc = ConfigDocument::default();
        let err = ConfigValidator::new()
            .validate(&doc, LifecycleCommand::PreUpgradeRestart)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfplanError::Config(ConfigError::ValidationError { ref field, .. })
                if field.as_deref() == Some("commandParams.version")
        ));
    }

    #[test]
    fn test_upgrade_to_legacy_version_warns() {
        let doc = document(&json!({ "commandParams": { "version": "2.1.0.0-1" } }));
        let result = ConfigValidator::new()
            .validate(&doc, LifecycleCommand::PreUpgradeRestart)
            .unwrap();
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_upgrade_with_malformed_version() {
        let doc = document(&json!({ "commandParams": { "version": "next" } }));
        let result = ConfigValidator::new().check(&doc, LifecycleCommand::PreUpgradeRestart);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors[0].field, "commandParams.version");
    }
}
