//! Command runner seam.
//!
//! Selection tools run with elevated privileges on the target host. The
//! planner only talks to them through [`CommandRunner`], so callers decide
//! whether commands really run or are merely recorded.

use serde::Serialize;
use std::cell::RefCell;
use tracing::debug;

use crate::error::Result;

/// Output of a command run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOutput {
    /// Exit status.
    pub code: i32,
    /// Captured standard output, if the runner captured any.
    pub stdout: Option<String>,
}

/// How a command was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// Failures are reported back to the caller.
    Call,
    /// Failures are errors.
    CheckedCall,
}

/// A recorded command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// How the command was invoked.
    pub kind: CallKind,
    /// Program and arguments.
    pub argv: Vec<String>,
    /// Whether elevated privileges were requested.
    pub sudo: bool,
}

/// Runs privileged commands on behalf of the planner.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs a command whose failure the caller tolerates.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be started at all.
    fn call(&self, argv: &[String], sudo: bool) -> Result<CallOutput>;

    /// Runs a command whose failure aborts the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be started at all.
    fn checked_call(&self, argv: &[String], sudo: bool) -> Result<CallOutput>;
}

/// Dry-run runner that records every invocation and reports success.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded invocations, in call order.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Returns the recorded invocations of one kind.
    #[must_use]
    pub fn invocations_of(&self, kind: CallKind) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|i| i.kind == kind)
            .cloned()
            .collect()
    }

    fn record(&self, kind: CallKind, argv: &[String], sudo: bool) -> CallOutput {
        debug!("Recording {kind:?}: {}", argv.join(" "));
        self.invocations.borrow_mut().push(Invocation {
            kind,
            argv: argv.to_vec(),
            sudo,
        });
        CallOutput::default()
    }
}

impl CommandRunner for RecordingRunner {
    fn call(&self, argv: &[String], sudo: bool) -> Result<CallOutput> {
        Ok(self.record(CallKind::Call, argv, sudo))
    }

    fn checked_call(&self, argv: &[String], sudo: bool) -> Result<CallOutput> {
        Ok(self.record(CallKind::CheckedCall, argv, sudo))
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            CallKind::Call => "call",
            CallKind::CheckedCall => "checked_call",
        };
        let prefix = if self.sudo { "sudo " } else { "" };
        write!(f, "{kind}: {prefix}{}", self.argv.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_runner_keeps_order() {
        let runner = RecordingRunner::new();
        let first = vec![String::from("a")];
        let second = vec![String::from("b"), String::from("c")];

        runner.call(&first, true).unwrap();
        let output = runner.checked_call(&second, false).unwrap();
        assert_eq!(output.code, 0);

        let recorded = runner.invocations();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, CallKind::Call);
        assert_eq!(recorded[1].argv, second);
        assert_eq!(runner.invocations_of(CallKind::CheckedCall).len(), 1);
        assert_eq!(recorded[1].to_string(), "checked_call: b c");
        assert_eq!(recorded[0].to_string(), "call: sudo a");
    }
}
