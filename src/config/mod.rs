//! Configuration module for the planner.
//!
//! This module handles all configuration-related functionality:
//! - Parsing JSON/YAML configuration documents
//! - Typed access to document sections
//! - Component profiles and on-disk layouts
//! - Validation of documents per lifecycle command
//! - Computing document digests for traceability

mod component;
mod document;
mod hash;
mod parser;
mod validator;

pub use component::{ComponentLayout, ComponentProfile, ConnectorLink, ServiceIdentity};
pub use document::{CommandParams, ConfigDocument, ConfigSection, HostLevelParams};
pub use hash::ConfigHasher;
pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, DocumentFormat, ENV_JDK_LOCATION, ENV_STACK_VERSION,
    ENV_TARGET_VERSION, find_config_file,
};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
