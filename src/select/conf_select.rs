//! Configuration-directory selection.
//!
//! During an upgrade the component's configuration moves to a directory
//! owned by the target stack version. `create-conf-dir` prepares it and
//! `set-conf-dir` makes it the active one. Each generation of that directory
//! is tagged with a conf-version counter.

use std::fmt;
use tracing::{debug, warn};

use crate::error::{Result, SelectError};

use super::runner::CommandRunner;
use super::PYTHON_WRAPPER;

/// Path of the conf-select tool.
pub const CONF_SELECT: &str = "/usr/bin/conf-select";

/// Conf-version counter distinguishing configuration-directory generations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfVersion(pub u32);

/// Issues conf-select commands through a runner.
pub struct ConfSelector<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> ConfSelector<'a> {
    /// Creates a selector backed by `runner`.
    #[must_use]
    pub const fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Prepares and activates the configuration directory of `package` for `version`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set-conf-dir` fails or either command cannot run.
    pub fn select(&self, package: &str, version: &str, conf_version: ConfVersion) -> Result<()> {
        self.create_conf_dir(package, version, conf_version)?;
        self.set_conf_dir(package, version, conf_version)
    }

    /// Creates the versioned configuration directory.
    ///
    /// A non-zero exit is logged and tolerated; the directory may already exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command cannot run.
    pub fn create_conf_dir(
        &self,
        package: &str,
        version: &str,
        conf_version: ConfVersion,
    ) -> Result<()> {
        let argv = command("create-conf-dir", package, version, conf_version);
        let output = self.runner.call(&argv, true)?;
        if output.code == 0 {
            debug!("Created conf dir for {package} {version}");
        } else {
            warn!(
                "create-conf-dir for {package} {version} exited with status {}",
                output.code
            );
        }
        Ok(())
    }

    /// Binds the versioned configuration directory as the active one.
    ///
    /// # Errors
    ///
    /// Returns an error if the command exits with a non-zero status.
    pub fn set_conf_dir(
        &self,
        package: &str,
        version: &str,
        conf_version: ConfVersion,
    ) -> Result<()> {
        let argv = command("set-conf-dir", package, version, conf_version);
        let output = self.runner.checked_call(&argv, true)?;
        if output.code != 0 {
            return Err(SelectError::command_failed(&argv, output.code).into());
        }
        debug!("Set conf dir for {package} {version}");
        Ok(())
    }
}

impl fmt::Debug for ConfSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfSelector").finish_non_exhaustive()
    }
}

impl fmt::Display for ConfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a conf-select command line.
#[must_use]
pub fn command(action: &str, package: &str, version: &str, conf_version: ConfVersion) -> Vec<String> {
    [
        PYTHON_WRAPPER,
        CONF_SELECT,
        action,
        "--package",
        package,
        "--stack-version",
        version,
        "--conf-version",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .chain(std::iter::once(conf_version.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfplanError;
    use crate::select::runner::{CallOutput, MockCommandRunner};

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_command_line() {
        assert_eq!(
            command("set-conf-dir", "sqoop", "2.3.0.0-1234", ConfVersion::default()),
            args(&[
                "ambari-python-wrap",
                "/usr/bin/conf-select",
                "set-conf-dir",
                "--package",
                "sqoop",
                "--stack-version",
                "2.3.0.0-1234",
                "--conf-version",
                "0",
            ])
        );
    }

    #[test]
    fn test_create_failure_is_tolerated() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_call()
            .times(1)
            .returning(|_, _| Ok(CallOutput { code: 1, stdout: None }));
        runner
            .expect_checked_call()
            .times(1)
            .returning(|_, _| Ok(CallOutput::default()));

        let selector = ConfSelector::new(&runner);
        assert!(selector.select("sqoop", "2.3.0.0-1234", ConfVersion(0)).is_ok());
    }

    #[test]
    fn test_set_failure_is_an_error() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_call()
            .times(1)
            .returning(|_, _| Ok(CallOutput::default()));
        runner
            .expect_checked_call()
            .withf(|argv, sudo| argv[2] == "set-conf-dir" && *sudo)
            .times(1)
            .returning(|_, _| Ok(CallOutput { code: 2, stdout: None }));

        let selector = ConfSelector::new(&runner);
        let err = selector
            .select("sqoop", "2.3.0.0-1234", ConfVersion(0))
            .unwrap_err();
        assert!(matches!(err, ConfplanError::Select(SelectError::CommandFailed { code: 2, .. })));
    }
}
