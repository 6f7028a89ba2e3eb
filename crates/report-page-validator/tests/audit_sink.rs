//! Validation audit sink tests for report-page-validator.
//!
//! ## Purpose
//! Audit events must be one JSON object per line, carry the document digest
//! instead of document content, and honor the configured destination.
// crates/report-page-validator/tests/audit_sink.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: File sink output and config-driven sink selection.
// Purpose: Keep audit records stable and content-free.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;

use report_page_config::AuditConfig;
use report_page_config::AuditSinkKind;
use report_page_contract::examples::my_report_example;
use report_page_core::HashDigest;
use report_page_core::UnknownFieldPolicy;
use report_page_validator::DocumentValidator;
use report_page_validator::FileAuditSink;
use report_page_validator::ValidationAuditEvent;
use report_page_validator::ValidationAuditSink;
use report_page_validator::audit_sink_from_config;
use serde_json::Value;
use serde_json::json;

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn file_sink_appends_one_json_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).unwrap();
    let validator = DocumentValidator::default();

    let valid = my_report_example();
    let invalid = json!({ "title": "Broken" });
    for (source, document) in [("reports/ok.json", &valid), ("reports/broken.json", &invalid)] {
        let report = validator.validate(document);
        sink.record(&ValidationAuditEvent::for_document(
            source,
            document,
            &report,
            UnknownFieldPolicy::Permissive,
        ));
    }

    let events = read_lines(&path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], json!("document_validation"));
    assert_eq!(events[0]["source"], json!("reports/ok.json"));
    assert_eq!(events[0]["verdict"], json!("valid"));
    assert_eq!(events[0]["schema_version"], json!("1.1.0"));
    assert_eq!(events[0]["unknown_fields"], json!("permissive"));
    assert_eq!(events[1]["verdict"], json!("invalid"));
    assert_eq!(events[1]["violation_count"], json!(2));
    assert_eq!(events[1]["schema_version"], Value::Null);
}

#[test]
fn events_carry_the_canonical_digest_not_the_document() {
    let document = my_report_example();
    let report = DocumentValidator::default().validate(&document);
    let event = ValidationAuditEvent::for_document(
        "-",
        &document,
        &report,
        UnknownFieldPolicy::Strict,
    );
    let expected = HashDigest::of_document(&document).unwrap();
    assert_eq!(event.document_digest, Some(expected));
    let payload = serde_json::to_string(&event).unwrap();
    assert!(!payload.contains("My Report"));
}

#[test]
fn reopening_the_file_sink_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let document = my_report_example();
    let report = DocumentValidator::default().validate(&document);
    for _ in 0 .. 2 {
        let sink = FileAuditSink::new(&path).unwrap();
        sink.record(&ValidationAuditEvent::for_document(
            "a.json",
            &document,
            &report,
            UnknownFieldPolicy::Permissive,
        ));
    }
    assert_eq!(read_lines(&path).len(), 2);
}

#[test]
fn config_selects_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.jsonl");
    let config = AuditConfig {
        enabled: true,
        sink: AuditSinkKind::File,
        path: Some(path.display().to_string()),
    };
    let sink = audit_sink_from_config(&config).unwrap();
    let document = my_report_example();
    let report = DocumentValidator::default().validate(&document);
    sink.record(&ValidationAuditEvent::for_document(
        "a.json",
        &document,
        &report,
        UnknownFieldPolicy::Permissive,
    ));
    assert_eq!(read_lines(&path).len(), 1);

    let disabled = AuditConfig { enabled: false, ..config.clone() };
    let quiet_path = dir.path().join("quiet.jsonl");
    let disabled = AuditConfig { path: Some(quiet_path.display().to_string()), ..disabled };
    audit_sink_from_config(&disabled).unwrap().record(&ValidationAuditEvent::for_document(
        "a.json",
        &document,
        &report,
        UnknownFieldPolicy::Permissive,
    ));
    assert!(!quiet_path.exists());

    let missing_path = AuditConfig { enabled: true, sink: AuditSinkKind::File, path: None };
    assert!(audit_sink_from_config(&missing_path).is_err());
}
