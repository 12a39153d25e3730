//! Error types for the configuration planner.
//!
//! This module provides the error hierarchy for every stage of a planning
//! run: loading and validating the configuration document, and the
//! privileged selection commands issued while planning upgrades.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the configuration planner.
#[derive(Debug, Error)]
pub enum ConfplanError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Selection command errors.
    #[error("Select error: {0}")]
    Select(#[from] SelectError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
///
/// Any of these aborts planning before a single action is emitted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// A key required by the requested command is absent.
    #[error("Missing required configuration key: {key}")]
    MissingKey {
        /// Dotted path of the missing key.
        key: String,
    },

    /// A key is present but holds a value of the wrong type or shape.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Dotted path of the offending key.
        key: String,
        /// What was wrong with the value.
        message: String,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Errors raised by privileged selection commands.
#[derive(Debug, Error)]
pub enum SelectError {
    /// A checked command exited with a non-zero status.
    #[error("Command `{command}` exited with status {code}")]
    CommandFailed {
        /// The command line, space separated.
        command: String,
        /// Exit status reported by the runner.
        code: i32,
    },
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, ConfplanError>;

impl ConfplanError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error comes from the configuration document.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Process exit code the CLI reports for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_config() { 2 } else { 1 }
    }
}

impl ConfigError {
    /// Creates a missing-key error for a dotted key path.
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Creates an invalid-value error for a dotted key path.
    #[must_use]
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl SelectError {
    /// Creates a command failure from an argument vector and exit status.
    #[must_use]
    pub fn command_failed(argv: &[String], code: i32) -> Self {
        Self::CommandFailed {
            command: argv.join(" "),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_two() {
        let err = ConfplanError::from(ConfigError::missing("commandParams.version"));
        assert!(err.is_config());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration key: commandParams.version"
        );
    }

    #[test]
    fn test_select_error_message() {
        let argv = vec![String::from("conf-select"), String::from("set-conf-dir")];
        let err = ConfplanError::from(SelectError::command_failed(&argv, 3));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("`conf-select set-conf-dir` exited with status 3"));
    }
}
