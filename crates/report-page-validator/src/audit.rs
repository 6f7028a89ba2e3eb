// crates/report-page-validator/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Structured audit events for document validation runs.
// Purpose: Emit one JSON-lines record per validated document.
// Dependencies: report-page-config, report-page-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Each validation run may be recorded as a single audit event. Events carry
//! the canonical document digest and the finding counts, never the document
//! itself, so audit logs stay free of report content. Sinks write JSON lines
//! to stderr or to an append-only file; the no-op sink discards events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use report_page_config::AuditConfig;
use report_page_config::AuditSinkKind;
use report_page_core::HashDigest;
use report_page_core::UnknownFieldPolicy;
use serde::Serialize;
use serde_json::Value;

use crate::report::ValidationReport;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event payload for one validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Where the document came from (file path or `-` for stdin).
    pub source: String,
    /// Canonical hash of the document, when it could be canonicalized.
    pub document_digest: Option<HashDigest>,
    /// `meta.schema_version` as declared, when it is a string.
    pub schema_version: Option<String>,
    /// `valid` or `invalid`.
    pub verdict: &'static str,
    /// Number of violations recorded.
    pub violation_count: usize,
    /// Number of warnings recorded.
    pub warning_count: usize,
    /// True when the violation cap was reached.
    pub truncated: bool,
    /// Unknown-field policy in effect.
    pub unknown_fields: UnknownFieldPolicy,
}

/// Inputs for [`ValidationAuditEvent::new`].
#[derive(Debug, Clone)]
pub struct ValidationAuditEventParams {
    /// Where the document came from.
    pub source: String,
    /// Canonical hash of the document.
    pub document_digest: Option<HashDigest>,
    /// Declared schema version.
    pub schema_version: Option<String>,
    /// Whether the document validated.
    pub valid: bool,
    /// Number of violations recorded.
    pub violation_count: usize,
    /// Number of warnings recorded.
    pub warning_count: usize,
    /// True when the violation cap was reached.
    pub truncated: bool,
    /// Unknown-field policy in effect.
    pub unknown_fields: UnknownFieldPolicy,
}

impl ValidationAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ValidationAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "document_validation",
            timestamp_ms,
            source: params.source,
            document_digest: params.document_digest,
            schema_version: params.schema_version,
            verdict: if params.valid { "valid" } else { "invalid" },
            violation_count: params.violation_count,
            warning_count: params.warning_count,
            truncated: params.truncated,
            unknown_fields: params.unknown_fields,
        }
    }

    /// Builds the event for `document` validated into `report`.
    #[must_use]
    pub fn for_document(
        source: impl Into<String>,
        document: &Value,
        report: &ValidationReport,
        unknown_fields: UnknownFieldPolicy,
    ) -> Self {
        Self::new(ValidationAuditEventParams {
            source: source.into(),
            document_digest: HashDigest::of_document(document).ok(),
            schema_version: document
                .pointer("/meta/schema_version")
                .and_then(Value::as_str)
                .map(str::to_string),
            valid: report.is_valid(),
            violation_count: report.violations().len(),
            warning_count: report.warnings().len(),
            truncated: report.truncated,
            unknown_fields,
        })
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}

/// Builds the sink described by `config`; disabled audit yields a no-op sink.
///
/// # Errors
///
/// Returns an I/O error when the file sink cannot open its path.
pub fn audit_sink_from_config(config: &AuditConfig) -> io::Result<Box<dyn ValidationAuditSink>> {
    if !config.enabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match (config.sink, config.path.as_deref()) {
        (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrAuditSink)),
        (AuditSinkKind::File, Some(path)) => Ok(Box::new(FileAuditSink::new(Path::new(path))?)),
        (AuditSinkKind::File, None) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "audit.path is required when audit.sink = \"file\"",
        )),
    }
}
