// crates/report-page-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for bounded reads and report rendering.
// Purpose: Ensure oversized inputs fail closed and text output stays stable.
// Dependencies: report-page-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates `read_bytes_with_limit` and `read_limited` enforce size limits,
//! and that text reports list one `path: reason` line per finding.
//!
//! Security posture: CLI inputs are untrusted; size limits must fail closed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::fs;
use std::io::Cursor;

use report_page_contract::examples::my_report_example;
use report_page_validator::DocumentValidator;
use serde_json::json;

use super::InputOutcome;
use super::LangArg;
use super::Locale;
use super::ReadLimitError;
use super::read_bytes_with_limit;
use super::read_document;
use super::read_limited;
use super::render_report_text;
use super::resolve_locale;

#[test]
fn read_bytes_with_limit_allows_small_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("small.json");
    fs::write(&path, b"{}").expect("write small file");
    assert_eq!(read_bytes_with_limit(&path, 16).expect("read small file"), b"{}");
}

#[test]
fn read_bytes_with_limit_rejects_large_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("large.json");
    let limit = 8_usize;
    fs::write(&path, vec![b' '; limit + 1]).expect("write large file");

    match read_bytes_with_limit(&path, limit).expect_err("expected size limit failure") {
        ReadLimitError::TooLarge {
            size,
            limit: reported,
        } => {
            assert_eq!(size, 9);
            assert_eq!(reported, limit);
        }
        ReadLimitError::Io(err) => panic!("unexpected IO error: {err}"),
    }
}

#[test]
fn read_limited_stops_streams_without_a_declared_size() {
    let err = read_limited(Cursor::new(vec![b'x'; 64]), None, 10).expect_err("too large");
    assert!(matches!(err, ReadLimitError::TooLarge { size: 11, limit: 10 }));
    let bytes = read_limited(Cursor::new(b"[1]".to_vec()), None, 10).expect("fits");
    assert_eq!(bytes, b"[1]");
}

#[test]
fn read_document_reports_parse_failures_with_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, b"{ \"title\": ").expect("write broken file");
    let err = read_document(&path, 1024).expect_err("parse failure");
    assert!(err.to_string().contains("broken.json is not valid JSON"), "{err}");
}

#[test]
fn text_report_lists_each_violation_path() {
    let mut document = my_report_example();
    document["rows"][0]["visuals"][0]["tile_options"] = json!({ "color": "#ZZZ" });
    let report = DocumentValidator::default().validate(&document);
    let text = render_report_text("page.json", &report, 1000, None);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "page.json: invalid (1 violation(s))");
    assert!(lines[1].starts_with("  /rows/0/visuals/0/tile_options/color: "), "{text}");
}

#[test]
fn text_report_for_valid_documents_is_one_line() {
    let report = DocumentValidator::default().validate(&my_report_example());
    assert_eq!(render_report_text("-", &report, 1000, Some([].as_slice())), "-: valid");
}

#[test]
fn worst_outcome_decides_the_exit_code() {
    let outcomes = [InputOutcome::Valid, InputOutcome::Failed, InputOutcome::Invalid];
    assert_eq!(outcomes.into_iter().max(), Some(InputOutcome::Failed));
    assert!(InputOutcome::Invalid > InputOutcome::Valid);
}

#[test]
fn locale_flag_wins_over_environment() {
    assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en")).expect("flag"), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("ca-ES")).expect("env"), Locale::Ca);
    assert_eq!(resolve_locale(None, None).expect("default"), Locale::En);
    assert!(resolve_locale(None, Some("xx")).is_err());
}
