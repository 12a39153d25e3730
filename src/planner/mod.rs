//! Planning module for lifecycle commands.
//!
//! This module turns a configuration document into the ordered resource
//! actions a lifecycle command requires.

mod action;
pub mod drivers;
mod lifecycle;
mod plan;
mod version;

pub use action::{
    ActionKind, DRIVER_FILE_MODE, DirectoryAction, ExecuteAction, FileAction, FileContent, FileMode,
    Guard, LinkAction, ResourceAction,
};
pub use drivers::{DriverSelection, JDBC_DRIVERS, JdbcDriver};
pub use lifecycle::{ActionPlanner, LifecycleCommand};
pub use plan::ActionPlan;
pub use version::{StackVersion, VERSIONED_LAYOUT_MIN, VersionParseError};
