// crates/report-page-validator/src/validator.rs
// ============================================================================
// Module: Document Validator
// Description: Native, path-reporting validation of report page documents.
// Purpose: Classify arbitrary JSON as a legal report page or not.
// Dependencies: report-page-core, serde_json
// ============================================================================

//! ## Overview
//! Validation is a single pass over the raw JSON value. Every rule that
//! fails records a violation at the JSON Pointer of the offending location
//! and the walk continues, so one run reports everything wrong with a
//! document. Page-level declarations (datasource names, parameter names) are
//! collected before the walk so references resolve regardless of member
//! order. The typed model is only built after the walk succeeds, which keeps
//! serde's first-error behavior out of the diagnostics.
//!
//! Validation never fails and has no side effects; a validator may be shared
//! across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use report_page_core::ReportPage;
use report_page_core::SchemaVersion;
use serde_json::Map;
use serde_json::Value;

use crate::options::ValidatorOptions;
use crate::pointer::JsonPointer;
use crate::report::ValidationReport;
use crate::report::Violation;
use crate::report::ViolationKind;
use crate::report::Warning;
use crate::report::WarningKind;

mod bundles;
mod leaf;
mod page;
mod query;
mod rows;

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validator for report page documents.
///
/// # Invariants
/// - Output depends only on the document and the stored options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentValidator {
    /// Active validation options.
    options: ValidatorOptions,
}

/// A validated document converted into the typed model.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedPage {
    /// Typed page.
    pub page: ReportPage,
    /// Report for the document; holds no violations, possibly warnings.
    pub report: ValidationReport,
}

impl DocumentValidator {
    /// Creates a validator with `options`.
    #[must_use]
    pub const fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
        }
    }

    /// Returns the active options.
    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates `document`, collecting every violation and warning.
    #[must_use]
    pub fn validate(&self, document: &Value) -> ValidationReport {
        let mut pass = Pass::new(&self.options);
        pass.document(document);
        pass.report
    }

    /// Validates `document` and converts it into the typed model.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationReport`] when the document has violations.
    pub fn accept(&self, document: &Value) -> Result<AcceptedPage, ValidationReport> {
        let mut report = self.validate(document);
        if !report.is_valid() {
            return Err(report);
        }
        match ReportPage::from_value(document.clone()) {
            Ok(page) => Ok(AcceptedPage {
                page,
                report,
            }),
            Err(err) => {
                report.violations.push(Violation {
                    path: String::new(),
                    kind: ViolationKind::WrongType,
                    message: format!("document does not map onto the typed model: {err}"),
                });
                Err(report)
            }
        }
    }
}

// ============================================================================
// SECTION: Validation Pass
// ============================================================================

/// State for one validation run.
struct Pass<'o> {
    /// Options for this run.
    options: &'o ValidatorOptions,
    /// Findings so far.
    report: ValidationReport,
    /// Declared datasource names; `None` when `datasources` is malformed.
    datasources: Option<BTreeSet<String>>,
    /// Declared page parameter names.
    parameters: BTreeSet<String>,
    /// Visual ids seen so far.
    visual_ids: BTreeSet<String>,
    /// Version the document declares, once parsed.
    document_version: Option<SchemaVersion>,
}

impl<'o> Pass<'o> {
    /// Starts a run.
    const fn new(options: &'o ValidatorOptions) -> Self {
        Self {
            options,
            report: ValidationReport {
                violations: Vec::new(),
                warnings: Vec::new(),
                truncated: false,
            },
            datasources: Some(BTreeSet::new()),
            parameters: BTreeSet::new(),
            visual_ids: BTreeSet::new(),
            document_version: None,
        }
    }

    /// Records a violation unless the cap has been reached.
    fn violation(&mut self, path: &JsonPointer, kind: ViolationKind, message: impl Into<String>) {
        if self.report.violations.len() >= self.options.max_violations {
            self.report.truncated = true;
            return;
        }
        self.report.violations.push(Violation {
            path: path.as_str().to_string(),
            kind,
            message: message.into(),
        });
    }

    /// Records a warning.
    fn warning(&mut self, path: &JsonPointer, kind: WarningKind, message: impl Into<String>) {
        self.report.warnings.push(Warning {
            path: path.as_str().to_string(),
            kind,
            message: message.into(),
        });
    }

    /// Applies the unknown-field policy to members outside `known`.
    fn check_keys(&mut self, object: &Map<String, Value>, path: &JsonPointer, known: &[&str]) {
        for key in object.keys().filter(|key| !known.contains(&key.as_str())) {
            let member = path.key(key);
            if self.options.unknown_fields.is_strict() {
                self.violation(&member, ViolationKind::UnknownField, "is not a declared member");
            } else {
                self.warning(&member, WarningKind::UnknownFieldIgnored, "undeclared member ignored");
            }
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
