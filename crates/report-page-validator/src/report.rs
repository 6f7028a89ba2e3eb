// crates/report-page-validator/src/report.rs
// ============================================================================
// Module: Validation Report
// Description: Violations, warnings, and the verdict for one document.
// Purpose: Carry validation outcomes as data rather than errors.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A report lists every violation in discovery order together with the
//! non-fatal warnings. A document is valid exactly when it has no
//! violations; warnings never change the verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Kinds
// ============================================================================

/// Classification of a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required member is absent.
    MissingField,
    /// A member has the wrong JSON type.
    WrongType,
    /// A string does not match its leaf pattern.
    PatternMismatch,
    /// A string is not one of the enumerated labels.
    EnumMismatch,
    /// A number or length is outside its bounds.
    OutOfRange,
    /// A row holds too many or too few visuals.
    ArityViolation,
    /// A visual kind is not allowed in its row type.
    KindMismatch,
    /// Mutually exclusive members appear together.
    OptionsConflict,
    /// Members disagree with each other or with page declarations.
    Inconsistent,
    /// The document declares a different major version.
    UnsupportedVersion,
    /// An undeclared member under the strict policy.
    UnknownField,
}

impl ViolationKind {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::WrongType => "wrong_type",
            Self::PatternMismatch => "pattern_mismatch",
            Self::EnumMismatch => "enum_mismatch",
            Self::OutOfRange => "out_of_range",
            Self::ArityViolation => "arity_violation",
            Self::KindMismatch => "kind_mismatch",
            Self::OptionsConflict => "options_conflict",
            Self::Inconsistent => "inconsistent",
            Self::UnsupportedVersion => "unsupported_version",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a non-fatal finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The document declares a newer minor of the supported major.
    NewerMinorVersion,
    /// A deprecated member is still in use.
    DeprecatedField,
    /// An undeclared member was ignored under the permissive policy.
    UnknownFieldIgnored,
    /// A SQL placeholder has no matching parameter.
    UndeclaredSqlParameter,
}

impl WarningKind {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewerMinorVersion => "newer_minor_version",
            Self::DeprecatedField => "deprecated_field",
            Self::UnknownFieldIgnored => "unknown_field_ignored",
            Self::UndeclaredSqlParameter => "undeclared_sql_parameter",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Findings
// ============================================================================

/// One contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON Pointer (RFC 6901) to the offending location; `""` is the root.
    pub path: String,
    /// Violation classification.
    pub kind: ViolationKind,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", display_path(&self.path), self.message, self.kind)
    }
}

/// One non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// JSON Pointer to the location the warning concerns.
    pub path: String,
    /// Warning classification.
    pub kind: WarningKind,
    /// Human-readable explanation.
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", display_path(&self.path), self.message, self.kind)
    }
}

/// Renders the root pointer visibly.
fn display_path(path: &str) -> &str {
    if path.is_empty() { "(root)" } else { path }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Outcome for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The document is a legal report page.
    Valid,
    /// The document violates the contract.
    Invalid(Vec<Violation>),
}

/// Full validation output for one document.
///
/// # Invariants
/// - `violations` and `warnings` are in discovery order.
/// - `truncated` is set only when violations were dropped by the cap.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Violations found, in discovery order.
    pub violations: Vec<Violation>,
    /// Warnings found, in discovery order.
    pub warnings: Vec<Warning>,
    /// True when the violation cap was reached.
    #[serde(default)]
    pub truncated: bool,
}

impl ValidationReport {
    /// Returns true when no violations were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the verdict, cloning the violations when invalid.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.is_valid() { Verdict::Valid } else { Verdict::Invalid(self.violations.clone()) }
    }

    /// Returns the violations in discovery order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the warnings in discovery order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns the sorted, distinct violation paths.
    #[must_use]
    pub fn violation_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> =
            self.violations.iter().map(|violation| violation.path.clone()).collect();
        paths.sort();
        paths.dedup();
        paths
    }

    /// Returns the sorted warning kind labels.
    #[must_use]
    pub fn warning_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> =
            self.warnings.iter().map(|warning| warning.kind.as_str().to_string()).collect();
        kinds.sort();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationReport;
    use super::Verdict;
    use super::Violation;
    use super::ViolationKind;

    /// Builds a missing-field violation at `path`.
    fn violation(path: &str) -> Violation {
        Violation {
            path: path.to_string(),
            kind: ViolationKind::MissingField,
            message: "is required".to_string(),
        }
    }

    #[test]
    fn paths_are_sorted_and_distinct() {
        let report = ValidationReport {
            violations: vec![violation("/rows"), violation("/meta"), violation("/rows")],
            ..ValidationReport::default()
        };
        assert_eq!(report.violation_paths(), vec!["/meta".to_string(), "/rows".to_string()]);
        assert!(matches!(report.verdict(), Verdict::Invalid(found) if found.len() == 3));
    }

    #[test]
    fn root_path_renders_visibly() {
        assert_eq!(violation("").to_string(), "(root): is required (missing_field)");
    }
}
