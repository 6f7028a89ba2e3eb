// crates/report-page-core/src/core/policy.rs
// ============================================================================
// Module: Unknown Field Policy
// Description: How undeclared object members are treated.
// Purpose: Share one policy enum between config, schemas, and the validator.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Permissive readers tolerate undeclared members so newer minor versions
//! stay readable; strict readers reject them outright.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Treatment of object members the contract does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Ignore unknown members and report a warning.
    #[default]
    Permissive,
    /// Report unknown members as violations.
    Strict,
}

impl UnknownFieldPolicy {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }

    /// Returns true for the strict policy.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for UnknownFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
