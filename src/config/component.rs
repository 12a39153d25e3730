//! Component profiles.
//!
//! A profile captures everything that is specific to one client component:
//! which configuration sections it reads, which identity owns its files,
//! which package names the select tools know it by, and where it lives on
//! disk for a given stack.

use std::path::PathBuf;

use crate::error::Result;
use crate::planner::StackVersion;

use super::document::ConfigDocument;

/// Root of the versioned stack layout.
const VERSIONED_ROOT: &str = "/usr/hdp/current";

/// Root of the legacy per-service layout.
const LEGACY_ROOT: &str = "/usr/lib";

/// Section holding cluster-wide settings such as the service group.
const CLUSTER_ENV: &str = "cluster-env";

/// Owner and group applied to the files a component manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    /// Owning user.
    pub user: String,
    /// Owning group.
    pub group: String,
}

/// The JDBC connector every installation links into its library directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorLink {
    /// File name inside the component's library directory.
    pub jar_name: String,
    /// Shared system jar the link points to.
    pub target: PathBuf,
}

/// Description of a client component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentProfile {
    /// Service name; prefixes the `<service>-env` section and names the conf-select package.
    pub service: String,
    /// Client component name known to the stack-select tool.
    pub client_component: String,
    /// Identity used when the document does not override it.
    pub default_identity: ServiceIdentity,
    /// Connector jar linked on every `configure`.
    pub connector: ConnectorLink,
    /// Environment script rendered from the env section's `content`.
    pub env_script: String,
    /// Packaged files that are only touched when present on the host.
    pub guarded_files: Vec<String>,
}

/// Resolved on-disk locations for one stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLayout {
    /// Configuration directory.
    pub conf_dir: PathBuf,
    /// Library directory holding JDBC jars.
    pub lib_dir: PathBuf,
}

impl ComponentProfile {
    /// Profile of the Sqoop client.
    #[must_use]
    pub fn sqoop() -> Self {
        Self {
            service: String::from("sqoop"),
            client_component: String::from("sqoop-client"),
            default_identity: ServiceIdentity {
                user: String::from("sqoop"),
                group: String::from("hadoop"),
            },
            connector: ConnectorLink {
                jar_name: String::from("mysql-connector-java.jar"),
                target: PathBuf::from("/usr/share/java/mysql-connector-java.jar"),
            },
            env_script: String::from("sqoop-env.sh"),
            guarded_files: vec![
                String::from("sqoop-env-template.sh"),
                String::from("sqoop-site-template.xml"),
                String::from("sqoop-site.xml"),
            ],
        }
    }

    /// Name of the component's env section, e.g. `sqoop-env`.
    #[must_use]
    pub fn env_section(&self) -> String {
        format!("{}-env", self.service)
    }

    /// Key in the env section that overrides the owning user, e.g. `sqoop_user`.
    #[must_use]
    pub fn user_key(&self) -> String {
        format!("{}_user", self.service)
    }

    /// Resolves the owning identity, applying document overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is present but not a string.
    pub fn identity(&self, doc: &ConfigDocument) -> Result<ServiceIdentity> {
        let user = doc
            .config_str(&self.env_section(), &self.user_key())?
            .unwrap_or(self.default_identity.user.as_str());
        let group = doc
            .config_str(CLUSTER_ENV, "user_group")?
            .unwrap_or(self.default_identity.group.as_str());

        Ok(ServiceIdentity {
            user: user.to_string(),
            group: group.to_string(),
        })
    }

    /// Resolves the layout for the installed stack.
    ///
    /// Stacks without a reported version use the legacy layout.
    #[must_use]
    pub fn layout(&self, stack: Option<&StackVersion>) -> ComponentLayout {
        let root = if stack.is_some_and(StackVersion::has_versioned_layout) {
            self.versioned_home()
        } else {
            PathBuf::from(LEGACY_ROOT).join(&self.service)
        };

        ComponentLayout {
            conf_dir: root.join("conf"),
            lib_dir: root.join("lib"),
        }
    }

    /// Legacy configuration path repointed during upgrades, e.g. `/etc/sqoop/conf`.
    #[must_use]
    pub fn legacy_conf_dir(&self) -> PathBuf {
        PathBuf::from("/etc").join(&self.service).join("conf")
    }

    /// Versioned configuration path, e.g. `/usr/hdp/current/sqoop-client/conf`.
    #[must_use]
    pub fn versioned_conf_dir(&self) -> PathBuf {
        self.versioned_home().join("conf")
    }

    fn versioned_home(&self) -> PathBuf {
        PathBuf::from(VERSIONED_ROOT).join(&self.client_component)
    }
}

impl Default for ComponentProfile {
    fn default() -> Self {
        Self::sqoop()
    }
}

impl std::fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.user, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_layout() {
        let profile = ComponentProfile::sqoop();
        let stack = StackVersion::parse("2.0.6").unwrap();
        let layout = profile.layout(Some(&stack));
        assert_eq!(layout.conf_dir, PathBuf::from("/usr/lib/sqoop/conf"));
        assert_eq!(layout.lib_dir, PathBuf::from("/usr/lib/sqoop/lib"));
        assert_eq!(profile.layout(None), layout);
    }

    #[test]
    fn test_versioned_layout() {
        let profile = ComponentProfile::sqoop();
        let stack = StackVersion::parse("2.2").unwrap();
        let layout = profile.layout(Some(&stack));
        assert_eq!(layout.conf_dir, PathBuf::from("/usr/hdp/current/sqoop-client/conf"));
        assert_eq!(layout.lib_dir, PathBuf::from("/usr/hdp/current/sqoop-client/lib"));
    }

    #[test]
    fn test_upgrade_paths() {
        let profile = ComponentProfile::sqoop();
        assert_eq!(profile.legacy_conf_dir(), PathBuf::from("/etc/sqoop/conf"));
        assert_eq!(
            profile.versioned_conf_dir(),
            PathBuf::from("/usr/hdp/current/sqoop-client/conf")
        );
    }

    #[test]
    fn test_identity_defaults_and_overrides() {
        let profile = ComponentProfile::sqoop();
        let empty = ConfigDocument::default();
        assert_eq!(profile.identity(&empty).unwrap(), profile.default_identity);

        let doc: ConfigDocument = serde_json::from_value(json!({
            "configurations": {
                "sqoop-env": { "sqoop_user": "etl" },
                "cluster-env": { "user_group": "analytics" }
            }
        }))
        .unwrap();
        let identity = profile.identity(&doc).unwrap();
        assert_eq!(identity.to_string(), "etl:analytics");
    }
}
