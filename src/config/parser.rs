//! Configuration parser for loading configuration documents.
//!
//! This module handles loading documents from JSON or YAML files and inline
//! text, plus environment variable overrides, with proper error handling.

use crate::error::{ConfigError, ConfplanError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::document::ConfigDocument;

/// Environment variable overriding `hostLevelParams.jdk_location`.
pub const ENV_JDK_LOCATION: &str = "CONFPLAN_JDK_LOCATION";
/// Environment variable overriding `hostLevelParams.stack_version`.
pub const ENV_STACK_VERSION: &str = "CONFPLAN_STACK_VERSION";
/// Environment variable overriding `commandParams.version`.
pub const ENV_TARGET_VERSION: &str = "CONFPLAN_TARGET_VERSION";

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON, the format cluster managers emit.
    Json,
    /// YAML, handy for hand-written documents.
    Yaml,
}

/// Configuration parser for loading configuration documents.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving the `.env` file.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads a document from a file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ConfigDocument> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfplanError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfplanError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse(&content, DocumentFormat::from_path(path), Some(path))
    }

    /// Parses a document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid document.
    pub fn parse(
        &self,
        content: &str,
        format: DocumentFormat,
        source: Option<&Path>,
    ) -> Result<ConfigDocument> {
        debug!("Parsing {format:?} configuration");

        let parsed = match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        let doc: ConfigDocument = parsed.map_err(|e| {
            ConfplanError::Config(ConfigError::ParseError {
                message: format!("{format:?} parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })?;

        debug!("Parsed {} configuration sections", doc.configurations.len());
        Ok(doc)
    }

    /// Parses an inline JSON document, as passed on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_inline(&self, content: &str) -> Result<ConfigDocument> {
        self.parse(content, DocumentFormat::Json, None)
    }

    /// Loads a document from a file with environment variable overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<ConfigDocument> {
        let mut doc = self.load_file(path)?;
        Self::apply_overrides(&mut doc, |name| std::env::var(name).ok());
        Ok(doc)
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides(doc: &mut ConfigDocument, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(location) = lookup(ENV_JDK_LOCATION) {
            debug!("Overriding hostLevelParams.jdk_location from environment");
            doc.host_level_params.jdk_location = Some(location);
        }

        if let Some(stack) = lookup(ENV_STACK_VERSION) {
            debug!("Overriding hostLevelParams.stack_version from environment");
            doc.host_level_params.stack_version = Some(stack);
        }

        if let Some(version) = lookup(ENV_TARGET_VERSION) {
            debug!("Overriding commandParams.version from environment");
            doc.command_params.version = Some(version);
        }
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                ConfplanError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "command.json",
    "confplan.json",
    "confplan.yaml",
    "confplan.yml",
];

/// Finds the configuration file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(ConfplanError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{"configurations": {"sqoop-env": {"content": "export A=1"}}}"#;
        let parser = ConfigParser::new();
        let doc = parser.parse_inline(json).unwrap();

        assert_eq!(doc.require_config_str("sqoop-env", "content").unwrap(), "export A=1");
        assert!(doc.command_params.version.is_none());
        assert!(doc.host_level_params.jdk_location.is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r"
configurations:
  sqoop-env:
    content: export A=1
    jdbc_drivers: org.postgresql.Driver
commandParams:
  version: 2.3.0.0-1234
hostLevelParams:
  jdk_location: http://host:8080/resources/
";
        let parser = ConfigParser::new();
        let doc = parser.parse(yaml, DocumentFormat::Yaml, None).unwrap();

        assert_eq!(doc.command_params.version.as_deref(), Some("2.3.0.0-1234"));
        assert_eq!(
            doc.config_str("sqoop-env", "jdbc_drivers").unwrap(),
            Some("org.postgresql.Driver")
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let parser = ConfigParser::new();
        let err = parser.parse_inline("{ not json").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Json parse error"));
    }

    #[test]
    fn test_load_file_by_extension() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let json_path = dir.path().join("command.json");
        let yaml_path = dir.path().join("command.yml");
        std::fs::write(&json_path, r#"{"commandParams": {"version": "2.2.0.0-1"}}"#).unwrap();
        std::fs::write(&yaml_path, "commandParams:\n  version: 2.2.0.0-2\n").unwrap();

        let parser = ConfigParser::new();
        let from_json = parser.load_file(&json_path).unwrap();
        let from_yaml = parser.load_file(&yaml_path).unwrap();
        assert_eq!(from_json.command_params.version.as_deref(), Some("2.2.0.0-1"));
        assert_eq!(from_yaml.command_params.version.as_deref(), Some("2.2.0.0-2"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = ConfigParser::new()
            .load_file(dir.path().join("absent.json"))
            .unwrap_err();
        assert!(matches!(err, ConfplanError::Config(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_apply_overrides() {
        let mut doc = ConfigDocument::default();
        ConfigParser::apply_overrides(&mut doc, |name| match name {
            ENV_JDK_LOCATION => Some(String::from("http://mirror/resources")),
            ENV_TARGET_VERSION => Some(String::from("2.3.0.0-1234")),
            _ => None,
        });

        assert_eq!(
            doc.host_level_params.jdk_location.as_deref(),
            Some("http://mirror/resources")
        );
        assert_eq!(doc.command_params.version.as_deref(), Some("2.3.0.0-1234"));
        assert!(doc.host_level_params.stack_version.is_none());
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("confplan.json"), "{}").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join("confplan.json"));
    }
}
