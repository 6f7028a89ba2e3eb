// crates/report-page-validator/src/lib.rs
// ============================================================================
// Module: Report Page Validator Library
// Description: Public API for report page document validation.
// Purpose: Classify raw JSON as a legal report page, with diagnostics.
// Dependencies: report-page-core, report-page-contract, jsonschema, serde
// ============================================================================

//! ## Overview
//! The validator accepts arbitrary JSON and reports every contract violation
//! it finds, each located by a JSON Pointer and classified by kind. Warnings
//! cover readable-but-noteworthy input: deprecated members, newer minor
//! versions, ignored unknown members, and SQL placeholders that nothing
//! declares. Accepted documents convert into the typed model from
//! `report-page-core`.
//!
//! [`ContractSchema`] wraps the published JSON Schema for parity checks, and
//! [`audit`] records one event per validation run.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod options;
pub mod pointer;
pub mod report;
pub mod schema_check;
pub mod sql;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ValidationAuditEvent;
pub use audit::ValidationAuditEventParams;
pub use audit::ValidationAuditSink;
pub use audit::audit_sink_from_config;
pub use options::DEFAULT_MAX_VIOLATIONS;
pub use options::ValidatorOptions;
pub use pointer::JsonPointer;
pub use report::ValidationReport;
pub use report::Verdict;
pub use report::Violation;
pub use report::ViolationKind;
pub use report::Warning;
pub use report::WarningKind;
pub use schema_check::ContractSchema;
pub use schema_check::SchemaCheckError;
pub use validator::AcceptedPage;
pub use validator::DocumentValidator;
