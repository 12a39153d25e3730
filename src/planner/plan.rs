//! Action plan types.
//!
//! A plan is the ordered output of one planning run. It carries no
//! timestamps or counters, so planning the same document twice yields
//! identical plans.

use serde::Serialize;

use super::action::{ActionKind, ResourceAction};
use super::lifecycle::LifecycleCommand;

/// An ordered sequence of resource actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    /// Command the plan was produced for.
    pub command: LifecycleCommand,
    /// Component the actions configure.
    pub component: String,
    /// Digest of the configuration document the plan is based on.
    pub document_hash: String,
    /// Actions in application order.
    pub actions: Vec<ResourceAction>,
}

impl ActionPlan {
    /// Creates a plan.
    #[must_use]
    pub fn new(
        command: LifecycleCommand,
        component: impl Into<String>,
        document_hash: impl Into<String>,
        actions: Vec<ResourceAction>,
    ) -> Self {
        Self {
            command,
            component: component.into(),
            document_hash: document_hash.into(),
            actions,
        }
    }

    /// Returns true if the plan has no actions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions.
    #[must_use]
    pub const fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Returns the number of actions of one kind.
    #[must_use]
    pub fn count_of(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }

    /// Returns the kinds of all actions, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.actions.iter().map(ResourceAction::kind).collect()
    }
}

impl std::fmt::Display for ActionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.actions.is_empty() {
            return write!(f, "No actions for {} {}", self.component, self.command);
        }

        writeln!(
            f,
            "Plan for {} {} ({} actions):",
            self.component,
            self.command,
            self.actions.len()
        )?;
        for (i, action) in self.actions.iter().enumerate() {
            writeln!(f, "  {}. {action}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_display() {
        let plan = ActionPlan::new(
            LifecycleCommand::PreUpgradeRestart,
            "sqoop",
            "abc",
            vec![
                ResourceAction::link("/etc/sqoop/conf", "/usr/hdp/current/sqoop-client/conf"),
                ResourceAction::sudo(vec![String::from("hdp-select")]),
            ],
        );

        assert_eq!(plan.action_count(), 2);
        assert_eq!(plan.count_of(ActionKind::Link), 1);
        assert_eq!(plan.kinds(), vec![ActionKind::Link, ActionKind::Execute]);

        let text = plan.to_string();
        assert!(text.starts_with("Plan for sqoop pre_upgrade_restart (2 actions):"));
        assert!(text.contains("  2. Execute (sudo hdp-select)"));
    }

    #[test]
    fn test_empty_plan_display() {
        let plan = ActionPlan::new(LifecycleCommand::Configure, "sqoop", "abc", vec![]);
        assert!(plan.is_empty());
        assert_eq!(plan.to_string(), "No actions for sqoop configure");
    }
}
