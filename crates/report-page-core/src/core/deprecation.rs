// crates/report-page-core/src/core/deprecation.rs
// ============================================================================
// Module: Report Page Deprecations
// Description: Registry of deprecated-but-accepted document fields.
// Purpose: Drive deprecation warnings and the versioning policy tests.
// Dependencies: crate::core::version
// ============================================================================

//! ## Overview
//! Deprecated fields stay readable for the rest of their major version and
//! are removed only at the next major boundary. Validators emit a warning
//! naming the replacement when a document still uses one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::version::SchemaVersion;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Object scope in which a deprecated field may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// Page-level `theme` object.
    Theme,
    /// Visual-level `query` object.
    Query,
}

impl FieldScope {
    /// Returns a stable label for messages and docs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Query => "query",
        }
    }
}

/// Deprecated field entry.
///
/// # Invariants
/// - `removed_in_major == since.major + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedField {
    /// Object scope containing the field.
    pub scope: FieldScope,
    /// Deprecated field name.
    pub field: &'static str,
    /// Version that deprecated the field.
    pub since: SchemaVersion,
    /// Field that replaces it.
    pub replacement: &'static str,
    /// Major version in which the field is removed.
    pub removed_in_major: u64,
}

impl DeprecatedField {
    /// Returns true when a document declaring `version` may still use the field.
    #[must_use]
    pub const fn accepted_in(&self, version: SchemaVersion) -> bool {
        version.major < self.removed_in_major
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// All deprecated fields known to the current contract.
pub const DEPRECATED_FIELDS: &[DeprecatedField] = &[
    DeprecatedField {
        scope: FieldScope::Theme,
        field: "accent_color",
        since: SchemaVersion::new(1, 1, 0),
        replacement: "primary_color",
        removed_in_major: 2,
    },
    DeprecatedField {
        scope: FieldScope::Query,
        field: "limit",
        since: SchemaVersion::new(1, 1, 0),
        replacement: "max_rows",
        removed_in_major: 2,
    },
];

/// Returns the deprecation entry for `field` within `scope`, if any.
#[must_use]
pub fn lookup(scope: FieldScope, field: &str) -> Option<&'static DeprecatedField> {
    DEPRECATED_FIELDS.iter().find(|entry| entry.scope == scope && entry.field == field)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::DEPRECATED_FIELDS;
    use super::FieldScope;
    use super::lookup;
    use crate::core::version::SchemaVersion;

    #[test]
    fn removals_only_happen_at_next_major() {
        for entry in DEPRECATED_FIELDS {
            assert_eq!(entry.removed_in_major, entry.since.major + 1, "{}", entry.field);
        }
    }

    #[test]
    fn deprecated_fields_survive_two_minor_versions() {
        for entry in DEPRECATED_FIELDS {
            for bump in 0 ..= 2 {
                let later = SchemaVersion::new(entry.since.major, entry.since.minor + bump, 0);
                assert!(entry.accepted_in(later), "{} must stay accepted in {later}", entry.field);
            }
            let next_major = SchemaVersion::new(entry.removed_in_major, 0, 0);
            assert!(!entry.accepted_in(next_major));
        }
    }

    #[test]
    fn lookup_is_scoped() {
        assert!(lookup(FieldScope::Theme, "accent_color").is_some());
        assert!(lookup(FieldScope::Query, "accent_color").is_none());
        assert!(lookup(FieldScope::Query, "limit").is_some());
    }
}
