// crates/report-page-core/src/core/version.rs
// ============================================================================
// Module: Report Page Schema Versions
// Description: Semantic version type and compatibility policy for documents.
// Purpose: Classify `meta.schema_version` against a supported contract version.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! `meta.schema_version` is the only machine-readable compatibility signal in
//! a report page. Major bumps are breaking and live at a new schema path;
//! minor bumps are additive; patch bumps are non-structural.
//!
//! ## Invariants
//! - Versions are strict `MAJOR.MINOR.PATCH` with no leading zeros and no
//!   pre-release or build suffixes.
//! - A validator pinned to major `N` accepts every `N.x.y`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Contract version implemented by this workspace.
pub const CURRENT_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 1, 0);

/// Longest accepted version component; every 19-digit number fits `u64`.
pub const MAX_COMPONENT_DIGITS: usize = 19;

/// JSON Schema fragment matching one version component.
pub const VERSION_COMPONENT_PATTERN: &str = "(0|[1-9][0-9]{0,18})";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Semantic version of the report page contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    /// Major version (breaking changes).
    pub major: u64,
    /// Minor version (additive changes).
    pub minor: u64,
    /// Patch version (non-structural changes).
    pub patch: u64,
}

/// Errors raised when parsing schema versions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Version string is not `MAJOR.MINOR.PATCH`.
    #[error("schema version must be MAJOR.MINOR.PATCH: {0}")]
    Malformed(String),
    /// A numeric component has a leading zero.
    #[error("schema version components must not have leading zeros: {0}")]
    LeadingZero(String),
    /// A numeric component is longer than [`MAX_COMPONENT_DIGITS`].
    #[error("schema version components are limited to {MAX_COMPONENT_DIGITS} digits: {0}")]
    Overflow(String),
}

/// Compatibility of a document version relative to a supported version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCompatibility {
    /// Same major and minor; patch may differ.
    Exact,
    /// Same major, older minor. Fully readable.
    OlderMinor,
    /// Same major, newer minor. Readable with a forward-compatibility warning.
    NewerMinor,
    /// Different major. Not readable by this validator.
    MajorMismatch,
}

impl VersionCompatibility {
    /// Returns true when documents with this compatibility are accepted.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::MajorMismatch)
    }
}

impl SchemaVersion {
    /// Creates a version from components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a strict `MAJOR.MINOR.PATCH` string.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] when the string is malformed.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let mut parts = value.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(VersionError::Malformed(value.to_string()));
        };
        Ok(Self {
            major: parse_component(major, value)?,
            minor: parse_component(minor, value)?,
            patch: parse_component(patch, value)?,
        })
    }

    /// Classifies `self` (a document version) against the `supported` version.
    #[must_use]
    pub fn compatibility_with(self, supported: Self) -> VersionCompatibility {
        if self.major != supported.major {
            return VersionCompatibility::MajorMismatch;
        }
        match self.minor.cmp(&supported.minor) {
            Ordering::Less => VersionCompatibility::OlderMinor,
            Ordering::Equal => VersionCompatibility::Exact,
            Ordering::Greater => VersionCompatibility::NewerMinor,
        }
    }

    /// Returns the schema path segment for this major (`v1`).
    #[must_use]
    pub fn major_path(self) -> String {
        format!("v{}", self.major)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SchemaVersion> for String {
    fn from(value: SchemaVersion) -> Self {
        value.to_string()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses one numeric version component.
fn parse_component(component: &str, full: &str) -> Result<u64, VersionError> {
    if component.is_empty() || !component.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(VersionError::Malformed(full.to_string()));
    }
    if component.len() > 1 && component.starts_with('0') {
        return Err(VersionError::LeadingZero(full.to_string()));
    }
    if component.len() > MAX_COMPONENT_DIGITS {
        return Err(VersionError::Overflow(full.to_string()));
    }
    component.parse::<u64>().map_err(|_| VersionError::Overflow(full.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::CURRENT_SCHEMA_VERSION;
    use super::SchemaVersion;
    use super::VersionCompatibility;
    use super::VersionError;

    #[test]
    fn parses_strict_versions() -> Result<(), VersionError> {
        assert_eq!(SchemaVersion::parse("1.1.0")?, SchemaVersion::new(1, 1, 0));
        assert_eq!(SchemaVersion::parse("10.0.12")?, SchemaVersion::new(10, 0, 12));
        Ok(())
    }

    #[test]
    fn rejects_malformed_versions() {
        for value in ["1.1", "1.1.0.0", "v1.1.0", "1.1.0-beta", "1..0", "", "1.a.0"] {
            assert!(matches!(SchemaVersion::parse(value), Err(VersionError::Malformed(_))));
        }
        assert!(matches!(SchemaVersion::parse("01.1.0"), Err(VersionError::LeadingZero(_))));
    }

    #[test]
    fn long_components_overflow() -> Result<(), VersionError> {
        assert_eq!(
            SchemaVersion::parse("1.9999999999999999999.0")?,
            SchemaVersion::new(1, 9_999_999_999_999_999_999, 0)
        );
        for value in ["1.99999999999999999999.0", "18446744073709551616.0.0"] {
            assert!(matches!(SchemaVersion::parse(value), Err(VersionError::Overflow(_))));
        }
        Ok(())
    }

    #[test]
    fn classifies_compatibility() -> Result<(), VersionError> {
        let check = |value: &str| -> Result<VersionCompatibility, VersionError> {
            Ok(SchemaVersion::parse(value)?.compatibility_with(CURRENT_SCHEMA_VERSION))
        };
        assert_eq!(check("1.1.0")?, VersionCompatibility::Exact);
        assert_eq!(check("1.1.7")?, VersionCompatibility::Exact);
        assert_eq!(check("1.0.0")?, VersionCompatibility::OlderMinor);
        assert_eq!(check("1.2.0")?, VersionCompatibility::NewerMinor);
        assert_eq!(check("2.0.0")?, VersionCompatibility::MajorMismatch);
        assert_eq!(check("0.9.0")?, VersionCompatibility::MajorMismatch);
        assert!(!VersionCompatibility::MajorMismatch.is_accepted());
        assert!(VersionCompatibility::NewerMinor.is_accepted());
        Ok(())
    }

    #[test]
    fn display_round_trips() -> Result<(), VersionError> {
        let version = SchemaVersion::parse("1.12.3")?;
        assert_eq!(version.to_string(), "1.12.3");
        assert_eq!(version.major_path(), "v1");
        Ok(())
    }
}
