// crates/report-page-validator/src/options.rs
// ============================================================================
// Module: Validator Options
// Description: Tunables for one document validator instance.
// Purpose: Pin the supported version and the unknown-field policy.
// Dependencies: report-page-config, report-page-core
// ============================================================================

//! ## Overview
//! [`ValidatorOptions`] pins what one validator checks against: the supported
//! contract version, the unknown-field policy, whether SQL placeholders are
//! resolved, and how many violations a report keeps. Options are built from
//! defaults or from the `[validation]` config section.

use report_page_config::ValidationConfig;
use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::SchemaVersion;
use report_page_core::UnknownFieldPolicy;

/// Default cap on reported violations.
pub const DEFAULT_MAX_VIOLATIONS: usize = 1000;

/// Options controlling document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Contract version documents are checked against.
    pub supported_version: SchemaVersion,
    /// Treatment of undeclared members.
    pub unknown_fields: UnknownFieldPolicy,
    /// Warn about SQL placeholders no parameter declares.
    pub check_sql_parameters: bool,
    /// Violations recorded before the report is truncated.
    pub max_violations: usize,
}

impl ValidatorOptions {
    /// Returns these options with `policy` for unknown fields.
    #[must_use]
    pub const fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Returns these options with the given violation cap (at least one).
    #[must_use]
    pub fn with_max_violations(mut self, max_violations: usize) -> Self {
        self.max_violations = max_violations.max(1);
        self
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            supported_version: CURRENT_SCHEMA_VERSION,
            unknown_fields: UnknownFieldPolicy::default(),
            check_sql_parameters: true,
            max_violations: DEFAULT_MAX_VIOLATIONS,
        }
    }
}

impl From<&ValidationConfig> for ValidatorOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            supported_version: config.supported_version,
            unknown_fields: config.unknown_fields,
            check_sql_parameters: config.check_sql_parameters,
            max_violations: config.max_violations.max(1),
        }
    }
}
