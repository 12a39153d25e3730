//! Active stack version selection.

use crate::planner::ResourceAction;

use super::PYTHON_WRAPPER;

/// Path of the stack-select tool.
pub const STACK_SELECT: &str = "/usr/bin/hdp-select";

/// Builds the privileged action that points `component` at `version`.
#[must_use]
pub fn select_action(component: &str, version: &str) -> ResourceAction {
    ResourceAction::sudo(
        [PYTHON_WRAPPER, STACK_SELECT, "set", component, version]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::ExecuteAction;

    #[test]
    fn test_select_action() {
        let action = select_action("sqoop-client", "2.3.0.0-1234");
        let ResourceAction::Execute(ExecuteAction { argv, sudo }) = action else {
            panic!("expected an Execute action");
        };
        assert!(sudo);
        assert_eq!(
            argv,
            vec!["ambari-python-wrap", "/usr/bin/hdp-select", "set", "sqoop-client", "2.3.0.0-1234"]
        );
    }
}
