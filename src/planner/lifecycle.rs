//! Lifecycle command dispatch.
//!
//! [`ActionPlanner`] turns a configuration document and a lifecycle command
//! into an [`ActionPlan`]. Every configuration lookup happens before the
//! first action is emitted, so a plan either comes back complete or not at
//! all.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{ComponentLayout, ComponentProfile, ConfigDocument, ConfigHasher, ServiceIdentity};
use crate::error::Result;
use crate::select::{CommandRunner, ConfSelector, ConfVersion, select_action};

use super::action::{DRIVER_FILE_MODE, FileAction, FileContent, ResourceAction};
use super::drivers::{self, DriverSelection};
use super::plan::ActionPlan;

/// Lifecycle commands a component supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleCommand {
    /// Install configuration files, links and drivers.
    #[value(name = "configure")]
    Configure,
    /// Switch the component to a new stack version before restarting it.
    #[value(name = "pre_upgrade_restart", alias = "pre-upgrade-restart")]
    PreUpgradeRestart,
}

/// Plans resource actions for one component.
pub struct ActionPlanner<'a> {
    /// Component being planned.
    profile: &'a ComponentProfile,
    /// Runner for selection commands issued during upgrades.
    runner: &'a dyn CommandRunner,
    /// Conf-version counter passed to conf-select.
    conf_version: ConfVersion,
    /// Document hasher.
    hasher: ConfigHasher,
}

/// Everything `configure` needs, resolved up front.
struct ConfigureInputs<'d> {
    layout: ComponentLayout,
    identity: ServiceIdentity,
    env_content: &'d str,
    drivers: DriverSelection,
    resource_base_url: Option<&'d str>,
}

impl<'a> ActionPlanner<'a> {
    /// Creates a planner for `profile` whose selection commands go through `runner`.
    #[must_use]
    pub const fn new(profile: &'a ComponentProfile, runner: &'a dyn CommandRunner) -> Self {
        Self {
            profile,
            runner,
            conf_version: ConfVersion(0),
            hasher: ConfigHasher::new(),
        }
    }

    /// Sets the conf-version counter.
    #[must_use]
    pub const fn with_conf_version(mut self, conf_version: ConfVersion) -> Self {
        self.conf_version = conf_version;
        self
    }

    /// Plans `command` against `doc`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a key the command needs is absent or
    /// malformed, or a select error if activating the configuration directory
    /// fails during `pre_upgrade_restart`.
    pub fn plan(&self, command: LifecycleCommand, doc: &ConfigDocument) -> Result<ActionPlan> {
        info!("Planning {command} for {}", self.profile.service);

        let actions = match command {
            LifecycleCommand::Configure => self.plan_configure(doc)?,
            LifecycleCommand::PreUpgradeRestart => self.plan_pre_upgrade_restart(doc)?,
        };

        info!("Planned {} actions for {command}", actions.len());
        Ok(ActionPlan::new(
            command,
            &self.profile.service,
            self.hasher.hash_document(doc),
            actions,
        ))
    }

    fn plan_configure(&self, doc: &ConfigDocument) -> Result<Vec<ResourceAction>> {
        let inputs = self.configure_inputs(doc)?;
        let profile = self.profile;
        let mut actions = Vec::new();

        actions.push(ResourceAction::link(
            inputs.layout.lib_dir.join(&profile.connector.jar_name),
            &profile.connector.target,
        ));

        if let Some(base_url) = inputs.resource_base_url {
            for driver in inputs.drivers.iter() {
                debug!("Adding JDBC driver {}", driver.class_name);
                actions.push(
                    FileAction::new(inputs.layout.lib_dir.join(driver.jar_name))
                        .with_content(FileContent::DownloadSource {
                            url: format!("{base_url}/{}", driver.download_name),
                        })
                        .with_mode(DRIVER_FILE_MODE)
                        .into(),
                );
            }
        }

        let conf_dir = &inputs.layout.conf_dir;
        actions.push(ResourceAction::directory(conf_dir, &inputs.identity));

        actions.push(
            FileAction::new(conf_dir.join(&profile.env_script))
                .owned_by(&inputs.identity)
                .with_content(FileContent::InlineTemplate {
                    template: inputs.env_content.to_string(),
                })
                .into(),
        );

        actions.extend(
            profile
                .guarded_files
                .iter()
                .map(|name| guarded_file(conf_dir, name, &inputs.identity)),
        );

        Ok(actions)
    }

    fn configure_inputs<'d>(&self, doc: &'d ConfigDocument) -> Result<ConfigureInputs<'d>> {
        let section = self.profile.env_section();
        let env_content = doc.require_config_str(&section, "content")?;
        let identity = self.profile.identity(doc)?;
        let layout = self.profile.layout(doc.stack_version()?.as_ref());

        let drivers = doc
            .config_str(&section, "jdbc_drivers")?
            .map(drivers::resolve)
            .unwrap_or_default();
        for name in &drivers.unknown {
            debug!("Skipping unrecognized JDBC driver: {name}");
        }

        let resource_base_url = if drivers.is_empty() {
            None
        } else {
            Some(doc.resource_base_url()?)
        };

        Ok(ConfigureInputs {
            layout,
            identity,
            env_content,
            drivers,
            resource_base_url,
        })
    }

    fn plan_pre_upgrade_restart(&self, doc: &ConfigDocument) -> Result<Vec<ResourceAction>> {
        let Some((version, parsed)) = doc.target_version()? else {
            return Err(crate::error::ConfigError::missing("commandParams.version").into());
        };

        if !parsed.has_versioned_layout() {
            info!("Target version {version} predates versioned layouts, nothing to select");
            return Ok(Vec::new());
        }

        let profile = self.profile;
        ConfSelector::new(self.runner).select(&profile.service, version, self.conf_version)?;

        Ok(vec![
            ResourceAction::link(profile.legacy_conf_dir(), profile.versioned_conf_dir()),
            select_action(&profile.client_component, version),
        ])
    }
}

/// A file owned by the component that is only managed when the package shipped it.
fn guarded_file(conf_dir: &Path, name: &str, identity: &ServiceIdentity) -> ResourceAction {
    FileAction::new(conf_dir.join(name))
        .owned_by(identity)
        .only_if_exists()
        .into()
}

impl std::fmt::Debug for ActionPlanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionPlanner")
            .field("profile", &self.profile.service)
            .field("conf_version", &self.conf_version)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Configure => "configure",
            Self::PreUpgradeRestart => "pre_upgrade_restart",
        };
        write!(f, "{s}")
    }
}
