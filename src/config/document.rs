//! Configuration document schema.
//!
//! The document is the JSON blob a cluster manager hands to a component
//! script: free-form `configurations` sections holding string values, plus
//! the typed `commandParams` and `hostLevelParams` blocks. Free-form sections
//! are read through typed accessors that fail on absent keys or mismatched
//! value types instead of handing back loosely typed values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};
use crate::planner::StackVersion;

/// A single `configurations.<name>` section.
pub type ConfigSection = BTreeMap<String, Value>;

/// The root configuration document for one planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigDocument {
    /// Named configuration sections (e.g. `sqoop-env`, `cluster-env`).
    #[serde(default)]
    pub configurations: BTreeMap<String, ConfigSection>,
    /// Parameters of the command being executed.
    #[serde(default, rename = "commandParams")]
    pub command_params: CommandParams,
    /// Parameters describing the target host.
    #[serde(default, rename = "hostLevelParams")]
    pub host_level_params: HostLevelParams,
}

/// Parameters attached to the lifecycle command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommandParams {
    /// Target stack version for upgrades (e.g. `2.3.0.0-1234`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Any other parameters the cluster manager sent along.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Host-level parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostLevelParams {
    /// Base URL of the resource server that hosts driver downloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdk_location: Option<String>,
    /// Version of the installed stack (e.g. `2.0.6`, `2.2`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_version: Option<String>,
    /// Name of the installed stack (e.g. `HDP`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    /// Any other parameters the cluster manager sent along.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ConfigDocument {
    /// Returns a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.configurations.get(name)
    }

    /// Returns a section by name, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns a missing-key error naming `configurations.<name>`.
    pub fn required_section(&self, name: &str) -> Result<&ConfigSection> {
        self.section(name)
            .ok_or_else(|| ConfigError::missing(format!("configurations.{name}")).into())
    }

    /// Reads an optional string value from a section.
    ///
    /// An absent section or key yields `None`; a present non-string value is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an invalid-value error if the value is not a string.
    pub fn config_str(&self, section: &str, key: &str) -> Result<Option<&str>> {
        let Some(value) = self.section(section).and_then(|s| s.get(key)) else {
            return Ok(None);
        };

        match value {
            Value::String(s) => Ok(Some(s.as_str())),
            Value::Null => Ok(None),
            other => Err(ConfigError::invalid(
                format!("configurations.{section}.{key}"),
                format!("expected a string, found {}", value_kind(other)),
            )
            .into()),
        }
    }

    /// Reads a required string value from a section.
    ///
    /// # Errors
    ///
    /// Returns a missing-key error if the section or key is absent, or an
    /// invalid-value error if the value is not a string.
    pub fn require_config_str(&self, section: &str, key: &str) -> Result<&str> {
        self.required_section(section)?;
        self.config_str(section, key)?
            .ok_or_else(|| ConfigError::missing(format!("configurations.{section}.{key}")).into())
    }

    /// Returns the target version of an upgrade command, if one was sent.
    ///
    /// Blank strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns an invalid-value error if the version cannot be parsed.
    pub fn target_version(&self) -> Result<Option<(&str, StackVersion)>> {
        parse_optional_version("commandParams.version", self.command_params.version.as_deref())
    }

    /// Returns the installed stack version, if the host reported one.
    ///
    /// # Errors
    ///
    /// Returns an invalid-value error if the version cannot be parsed.
    pub fn stack_version(&self) -> Result<Option<StackVersion>> {
        parse_optional_version(
            "hostLevelParams.stack_version",
            self.host_level_params.stack_version.as_deref(),
        )
        .map(|v| v.map(|(_, version)| version))
    }

    /// Returns the resource-server base URL.
    ///
    /// # Errors
    ///
    /// Returns a missing-key error if the host did not report one.
    pub fn resource_base_url(&self) -> Result<&str> {
        self.host_level_params
            .jdk_location
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::missing("hostLevelParams.jdk_location").into())
    }
}

/// Parses an optional version field, keeping the raw text next to the parsed value.
fn parse_optional_version<'a>(
    key: &str,
    raw: Option<&'a str>,
) -> Result<Option<(&'a str, StackVersion)>> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    StackVersion::parse(raw)
        .map(|version| Some((raw, version)))
        .map_err(|e| ConfigError::invalid(key, e.to_string()).into())
}

/// Human-readable name of a JSON value's type.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
