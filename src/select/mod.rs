//! Privileged selection tools.
//!
//! This module wraps the stack tooling that switches a component between
//! installed versions:
//! - `conf-select` for configuration directories
//! - `hdp-select` for the active binaries
//! - the [`CommandRunner`] seam those commands run through

mod conf_select;
mod runner;
mod stack_select;

/// Interpreter wrapper every selection tool is launched through.
pub const PYTHON_WRAPPER: &str = "ambari-python-wrap";

pub use conf_select::{CONF_SELECT, ConfSelector, ConfVersion};
pub use runner::{CallKind, CallOutput, CommandRunner, Invocation, RecordingRunner};
pub use stack_select::{STACK_SELECT, select_action};

#[cfg(test)]
pub use runner::MockCommandRunner;
