// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # confplan
//!
//! Plans the idempotent filesystem and process actions that bring a cluster
//! component's client installation in line with its configuration.
//!
//! ## Overview
//!
//! A cluster manager hands each host a configuration document: per-service
//! configuration sections, command parameters and host-level parameters.
//! `confplan` reads that document and, for a lifecycle command, produces an
//! ordered list of resource actions:
//!
//! - **Link**: symbolic links such as the bundled MySQL connector
//! - **Directory**: configuration directories with ownership
//! - **File**: rendered environment scripts and downloaded JDBC drivers
//! - **Execute**: privileged commands such as `hdp-select set`
//!
//! Plans are pure data. Applying them is left to a resource executor.
//!
//! ## Lifecycle commands
//!
//! 1. **`configure`**: lays out the client's configuration directory,
//!    environment script and JDBC drivers
//! 2. **`pre_upgrade_restart`**: switches the configuration directory and
//!    binaries to the target stack version
//!
//! ## Modules
//!
//! - [`config`]: Document parsing, component profiles and validation
//! - [`planner`]: Resource actions and the lifecycle planner
//! - [`select`]: The `conf-select` and `hdp-select` tooling
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```json
//! {
//!   "configurations": {
//!     "sqoop-env": {
//!       "content": "export SQOOP_HOME=/usr/lib/sqoop",
//!       "jdbc_drivers": "org.postgresql.Driver, oracle.jdbc.driver.OracleDriver"
//!     }
//!   },
//!   "commandParams": { "version": "2.3.0.0-1234" },
//!   "hostLevelParams": {
//!     "jdk_location": "http://ambari:8080/resources/",
//!     "stack_version": "2.2"
//!   }
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod select;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ComponentProfile, ConfigDocument, ConfigHasher, ConfigParser, ConfigValidator};
pub use error::{ConfplanError, Result};
pub use planner::{ActionPlan, ActionPlanner, LifecycleCommand, ResourceAction};
pub use select::{CommandRunner, RecordingRunner};
