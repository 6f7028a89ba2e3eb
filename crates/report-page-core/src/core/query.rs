// crates/report-page-core/src/core/query.rs
// ============================================================================
// Module: Report Page Queries
// Description: Embedded query declarations and verify assertion blocks.
// Purpose: Describe what a runner executes and what it checks afterwards.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Queries are opaque SQL text plus bound parameters; nothing here parses or
//! executes SQL. Verify blocks are declarative assertions evaluated by an
//! external runner against the query result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::Slug;

// ============================================================================
// SECTION: Query
// ============================================================================

/// Upper bound for `timeout_ms`.
pub const MAX_TIMEOUT_MS: u64 = 600_000;
/// Upper bound for `max_rows`.
pub const MAX_RESULT_ROWS: u64 = 1_000_000;

/// Embedded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// SQL text, never interpreted by the contract.
    pub sql: String,
    /// Bound parameter values keyed by placeholder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, Value>>,
    /// Datasource name from the page `datasources` map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<Slug>,
    /// Execution timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Result row cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<u64>,
    /// Deprecated since 1.1.0; use `max_rows`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Query {
    /// Returns the effective row cap, preferring `max_rows` over `limit`.
    #[must_use]
    pub fn effective_max_rows(&self) -> Option<u64> {
        self.max_rows.or(self.limit)
    }
}

// ============================================================================
// SECTION: Verify
// ============================================================================

/// Post-query assertions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Verify {
    /// Result row count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<RowCountRule>,
    /// Expected result columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnRule>>,
    /// Per-column value assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ValueRule>>,
}

/// Row count assertion. `eq` excludes `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowCountRule {
    /// Exact count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<u64>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl RowCountRule {
    /// Returns true when `count` satisfies the rule.
    #[must_use]
    pub fn admits(&self, count: u64) -> bool {
        if let Some(eq) = self.eq {
            return count == eq;
        }
        self.min.is_none_or(|min| count >= min) && self.max.is_none_or(|max| count <= max)
    }
}

/// Result column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text.
    String,
    /// Whole number.
    Integer,
    /// Any number.
    Number,
    /// Boolean.
    Boolean,
    /// Calendar date.
    Date,
    /// Timestamp.
    Datetime,
}

impl ColumnType {
    /// Every column type, in schema order.
    pub const ALL: &'static [Self] =
        &[Self::String, Self::Integer, Self::Number, Self::Boolean, Self::Date, Self::Datetime];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }
}

/// Expected result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Column name.
    pub name: String,
    /// Expected type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// Whether nulls are permitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Whether the column must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl ColumnRule {
    /// Returns whether the column must be present (defaults to true).
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }
}

/// Per-column value assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRule {
    /// Column under test.
    pub column: String,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Pattern every value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Closed set of permitted values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
    /// Whether values must be distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

impl ValueRule {
    /// Returns true when at least one assertion besides `column` is present.
    #[must_use]
    pub const fn has_assertion(&self) -> bool {
        self.min.is_some()
            || self.max.is_some()
            || self.regex.is_some()
            || self.allowed.is_some()
            || self.unique.is_some()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Query;
    use super::RowCountRule;

    #[test]
    fn row_count_rule_admits() {
        let exact = RowCountRule {
            eq: Some(1),
            ..RowCountRule::default()
        };
        assert!(exact.admits(1));
        assert!(!exact.admits(2));
        let range = RowCountRule {
            eq: None,
            min: Some(2),
            max: Some(5),
        };
        assert!(range.admits(2));
        assert!(range.admits(5));
        assert!(!range.admits(6));
    }

    #[test]
    fn max_rows_wins_over_limit() {
        let query = Query {
            sql: "select 1".to_string(),
            params: None,
            datasource: None,
            timeout_ms: None,
            max_rows: Some(10),
            limit: Some(50),
        };
        assert_eq!(query.effective_max_rows(), Some(10));
    }
}
