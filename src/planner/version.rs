//! Stack version parsing and ordering.
//!
//! Stack versions look like `2.3.0.0-1234`: up to four numeric components
//! followed by an optional build suffix. Missing numeric components are
//! padded with zeros, so `2.2` and `2.2.0.0` are the same version.

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Number of numeric components a normalized version carries.
const COMPONENTS: usize = 4;

/// First stack release that ships the versioned `/usr/hdp/current` layout.
pub const VERSIONED_LAYOUT_MIN: StackVersion = StackVersion {
    parts: [2, 2, 0, 0],
    build: None,
};

/// A parsed stack version.
///
/// Ordering compares the numeric components first, then the build suffix.
/// A version without a build sorts before the same version with one, and
/// numeric builds compare by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackVersion {
    parts: [u32; COMPONENTS],
    build: Option<String>,
}

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct VersionParseError(String);

impl StackVersion {
    /// Parses a version string such as `2.0.6` or `2.3.0.0-1234`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, has more than four numeric
    /// components, any component is not made of ASCII digits, or the build
    /// suffix is empty or contains anything but ASCII letters, digits and dots.
    pub fn parse(raw: &str) -> Result<Self, VersionParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(VersionParseError(String::from("version is empty")));
        }

        let (numeric, build) = match raw.split_once('-') {
            Some((numeric, build)) => (numeric, Some(parse_build(raw, build)?)),
            None => (raw, None),
        };

        let mut parts = [0u32; COMPONENTS];
        let mut count = 0;
        for piece in numeric.split('.') {
            if count == COMPONENTS {
                return Err(VersionParseError(format!(
                    "'{raw}' has more than {COMPONENTS} components"
                )));
            }
            parts[count] = parse_component(raw, piece)?;
            count += 1;
        }

        Ok(Self { parts, build })
    }

    /// Returns the build suffix, if any.
    #[must_use]
    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// Returns true if this stack ships the versioned layout.
    #[must_use]
    pub fn has_versioned_layout(&self) -> bool {
        self.parts >= VERSIONED_LAYOUT_MIN.parts
    }
}

fn parse_component(raw: &str, piece: &str) -> Result<u32, VersionParseError> {
    if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError(format!("'{piece}' in '{raw}' is not a number")));
    }
    piece
        .parse()
        .map_err(|_| VersionParseError(format!("'{piece}' in '{raw}' is out of range")))
}

fn parse_build(raw: &str, build: &str) -> Result<String, VersionParseError> {
    if build.is_empty() {
        return Err(VersionParseError(format!("'{raw}' has an empty build suffix")));
    }
    if !build.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.') {
        return Err(VersionParseError(format!(
            "build suffix '{build}' in '{raw}' is malformed"
        )));
    }
    Ok(build.to_string())
}

/// Sort key for a build suffix; keys are equal only for equal strings.
fn build_key(build: &str) -> (bool, usize, &str, &str) {
    if build.bytes().all(|b| b.is_ascii_digit()) {
        let value = build.trim_start_matches('0');
        (false, value.len(), value, build)
    } else {
        (true, 0, build, build)
    }
}

impl PartialOrd for StackVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StackVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts).then_with(|| {
            self.build
                .as_deref()
                .map(build_key)
                .cmp(&other.build.as_deref().map(build_key))
        })
    }
}

impl fmt::Display for StackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.parts;
        write!(f, "{a}.{b}.{c}.{d}")?;
        if let Some(build) = &self.build {
            write!(f, "-{build}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn v(raw: &str) -> StackVersion {
        StackVersion::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_with_build() {
        let version = v("2.3.0.0-1234");
        assert_eq!(version.build(), Some("1234"));
        assert_eq!(version.to_string(), "2.3.0.0-1234");
    }

    #[test]
    fn test_short_versions_are_padded() {
        let short = v("2.2");
        assert_eq!(short, v("2.2.0.0"));
        assert_eq!(short.cmp(&v("2.2.0.0")), Ordering::Equal);
        assert!(short < v("2.2.0.0-2041"));
        assert!(short.has_versioned_layout());
    }

    #[test]
    fn test_ordering_agrees_with_equality() {
        let versions = [
            v("2.2"),
            v("2.2.0.0"),
            v("2.2.0.0-2041"),
            v("2.2.0.0-999"),
            v("2.2.0.0-0999"),
            v("2.2.0.0-rc1"),
            v("2.3"),
        ];
        for a in &versions {
            for b in &versions {
                assert_eq!(a.cmp(b) == Ordering::Equal, a == b, "{a} vs {b}");
            }
        }

        let set: BTreeSet<_> = versions.iter().cloned().collect();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_numeric_builds_compare_by_value() {
        assert!(v("2.2.0.0-999") < v("2.2.0.0-2041"));
        assert!(v("2.2.0.0-0012") > v("2.2.0.0-10"));
        assert!(v("2.2.0.0-2041") < v("2.3.0.0-1"));
    }

    #[test]
    fn test_legacy_stacks() {
        assert!(!v("2.0.6").has_versioned_layout());
        assert!(!v("2.1.9.9").has_versioned_layout());
        assert!(v("2.2.0.0-1").has_versioned_layout());
        assert!(v("2.3").has_versioned_layout());
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in [
            "",
            "two.three",
            "2.3.0.0.1",
            "2..3",
            "2.3.0.0-",
            "+2.3",
            "2.+3",
            "2.3.0.0-1234-x",
            "2.3.0.0-12 34",
            "99999999999.0",
        ] {
            assert!(StackVersion::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = StackVersion::parse("2.3.0.0-").unwrap_err();
        assert_eq!(err.to_string(), "'2.3.0.0-' has an empty build suffix");
    }
}
