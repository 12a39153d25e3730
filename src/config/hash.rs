//! Configuration document hashing.
//!
//! This module provides deterministic hashing of configuration documents
//! so every plan can be traced back to the exact input it was built from.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::document::ConfigDocument;

/// Hasher for computing configuration document digests.
#[derive(Debug, Default)]
pub struct ConfigHasher;

impl ConfigHasher {
    /// Creates a new configuration hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a SHA-256 digest of the whole document.
    ///
    /// Sections and keys are visited in sorted order, so the digest does not
    /// depend on the key order of the source file.
    #[must_use]
    pub fn hash_document(&self, doc: &ConfigDocument) -> String {
        let mut hasher = Sha256::new();

        for (name, section) in &doc.configurations {
            hasher.update(b"configurations\0");
            hasher.update(name.as_bytes());
            Self::update_map(&mut hasher, section);
        }

        hasher.update(b"commandParams\0");
        if let Some(version) = &doc.command_params.version {
            hasher.update(b"version\0");
            hasher.update(version.as_bytes());
        }
        Self::update_map(&mut hasher, &doc.command_params.extra);

        hasher.update(b"hostLevelParams\0");
        let host = &doc.host_level_params;
        for (key, value) in [
            ("jdk_location", &host.jdk_location),
            ("stack_version", &host.stack_version),
            ("stack_name", &host.stack_name),
        ] {
            if let Some(value) = value {
                hasher.update(key.as_bytes());
                hasher.update(b"\0");
                hasher.update(value.as_bytes());
            }
        }
        Self::update_map(&mut hasher, &host.extra);

        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }

    fn update_map(hasher: &mut Sha256, map: &BTreeMap<String, Value>) {
        for (key, value) in map {
            hasher.update(b"\0");
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.to_string().as_bytes());
        }
    }
}
