// crates/report-page-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the report-page binary.
// Purpose: Pin exit codes and output shapes for every subcommand.
// Dependencies: report-page-cli binary, report-page-contract, tempfile
// ============================================================================

//! ## Overview
//! Runs the `report-page` binary against real files and checks exit codes and
//! output for each subcommand.
//!
//! Security posture: document and config inputs are untrusted; oversized or
//! malformed input must fail with exit code 2, never be half-validated.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

use report_page_contract::examples::full_report_example;
use report_page_contract::examples::my_report_example;
use report_page_contract::report_page_schema;
use report_page_core::UnknownFieldPolicy;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn report_page_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_report-page"))
}

/// Runs the binary in `dir` with a clean environment for config and locale.
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(report_page_bin())
        .current_dir(dir)
        .env_remove("REPORT_PAGE_CONFIG")
        .env_remove("REPORT_PAGE_LANG")
        .args(args)
        .output()
        .expect("run report-page")
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_vec_pretty(value).expect("serialize")).expect("write json");
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// SECTION: Validate
// ============================================================================

#[test]
fn valid_documents_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mine = write_json(&dir, "my-report.json", &my_report_example());
    let full = write_json(&dir, "full-report.json", &full_report_example());

    let output = run(dir.path(), &["validate", &mine, &full]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("my-report.json: valid"), "{text}");
    assert!(text.contains("full-report.json: valid"), "{text}");
}

#[test]
fn invalid_documents_exit_one_with_path_lines() {
    let dir = tempfile::tempdir().unwrap();
    let page = write_json(&dir, "page.json", &json!({ "title": "Orphan" }));

    let output = run(dir.path(), &["validate", &page]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("page.json: invalid (2 violation(s))"), "{text}");
    assert!(text.contains("  /meta: "), "{text}");
    assert!(text.contains("  /rows: "), "{text}");
}

#[test]
fn unreadable_input_exits_two_but_other_inputs_are_still_checked() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_json(&dir, "good.json", &my_report_example());
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();

    let output = run(dir.path(), &["validate", broken.to_str().unwrap(), &good]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("is not valid JSON"), "{}", stderr(&output));
    assert!(stdout(&output).contains("good.json: valid"));
}

#[test]
fn json_format_emits_one_object_per_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut document = my_report_example();
    document["meta"]["schema_version"] = json!("2.0.0");
    let page = write_json(&dir, "page.json", &document);

    let output = run(dir.path(), &["validate", "--format", "json", &page]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let parsed: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["valid"], json!(false));
    assert_eq!(parsed["violations"][0]["path"], json!("/meta/schema_version"));
    assert_eq!(parsed["violations"][0]["kind"], json!("unsupported_version"));
    assert!(parsed.get("schema_errors").is_none());
}

#[test]
fn strict_flag_rejects_unknown_members() {
    let dir = tempfile::tempdir().unwrap();
    let mut document = my_report_example();
    document["subtitle"] = json!("extra");
    let page = write_json(&dir, "page.json", &document);

    let permissive = run(dir.path(), &["validate", &page]);
    assert_eq!(permissive.status.code(), Some(0));
    assert!(stdout(&permissive).contains("warning: /subtitle"), "{}", stdout(&permissive));

    let strict = run(dir.path(), &["validate", "--strict", &page]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(stdout(&strict).contains("  /subtitle: "), "{}", stdout(&strict));
}

#[test]
fn stdin_is_read_for_dash() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(report_page_bin())
        .current_dir(dir.path())
        .env_remove("REPORT_PAGE_CONFIG")
        .env_remove("REPORT_PAGE_LANG")
        .args(["validate", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let payload = serde_json::to_vec(&my_report_example()).unwrap();
    child.stdin.take().unwrap().write_all(&payload).unwrap();
    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("-: valid"));
}

#[test]
fn schema_check_reports_schema_messages_alongside_the_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let page = write_json(&dir, "page.json", &json!({ "title": "Orphan" }));

    let output = run(dir.path(), &["validate", "--schema-check", "--format", "json", &page]);
    assert_eq!(output.status.code(), Some(1));
    let parsed: Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert!(!parsed["schema_errors"].as_array().unwrap().is_empty());
}

#[test]
fn oversized_documents_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("report-page.toml");
    fs::write(&config, "[input]\nmax_document_bytes = 1024\n").unwrap();
    let mut document = my_report_example();
    document["description"] = json!("x".repeat(2048));
    let page = write_json(&dir, "big.json", &document);

    let output = run(dir.path(), &["validate", "--config", config.to_str().unwrap(), &page]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Refusing to read"), "{}", stderr(&output));
}

#[test]
fn config_in_the_working_directory_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("report-page.toml"), "[validation]\nunknown_fields = \"strict\"\n")
        .unwrap();
    let mut document = my_report_example();
    document["subtitle"] = json!("extra");
    let page = write_json(&dir, "page.json", &document);

    let output = run(dir.path(), &["validate", &page]);
    assert_eq!(output.status.code(), Some(1), "{}", stdout(&output));
}

#[test]
fn file_audit_sink_records_each_document() {
    let dir = tempfile::tempdir().unwrap();
    let audit_path = dir.path().join("audit.jsonl");
    let config = dir.path().join("audit.toml");
    let config_text = format!(
        "[audit]\nenabled = true\nsink = \"file\"\npath = {}\n",
        serde_json::to_string(&audit_path.to_string_lossy()).unwrap()
    );
    fs::write(&config, config_text).unwrap();
    let good = write_json(&dir, "good.json", &my_report_example());
    let bad = write_json(&dir, "bad.json", &json!({ "title": "Orphan" }));

    let output = run(dir.path(), &["validate", "--config", config.to_str().unwrap(), &good, &bad]);
    assert_eq!(output.status.code(), Some(1));
    let log = fs::read_to_string(&audit_path).unwrap();
    let events: Vec<Value> = log.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["verdict"], json!("valid"));
    assert_eq!(events[1]["verdict"], json!("invalid"));
    assert_eq!(events[1]["violation_count"], json!(2));
}

// ============================================================================
// SECTION: Fixtures, Schema, Contract, Config
// ============================================================================

#[test]
fn fixture_bundle_passes() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["fixtures", "--quiet"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1, "{text}");
    assert!(text.contains("fixture cases passed"));
}

#[test]
fn schema_prints_the_selected_variant() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["schema", "--variant", "strict"]);
    assert_eq!(output.status.code(), Some(0));
    let printed: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(printed, report_page_schema(UnknownFieldPolicy::Strict));
}

#[test]
fn contract_generate_then_check_detects_drift() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contract");
    let out_arg = out.to_str().unwrap();

    let generated = run(dir.path(), &["contract", "generate", "--out", out_arg]);
    assert_eq!(generated.status.code(), Some(0), "{}", stderr(&generated));
    let checked = run(dir.path(), &["contract", "check", "--out", out_arg]);
    assert_eq!(checked.status.code(), Some(0), "{}", stderr(&checked));

    fs::write(out.join("examples/my-report.json"), "{}").unwrap();
    let drifted = run(dir.path(), &["contract", "check", "--out", out_arg]);
    assert_eq!(drifted.status.code(), Some(2));
    assert!(stderr(&drifted).contains("out of date"), "{}", stderr(&drifted));
}

#[test]
fn config_validate_accepts_the_example_and_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.toml");
    fs::write(&good, report_page_config::config_toml_example()).unwrap();
    let output = run(dir.path(), &["config", "validate", "--config", good.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Config valid"));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[validation]\nsupported_version = \"2.0.0\"\n").unwrap();
    let output = run(dir.path(), &["config", "validate", "--config", bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load config"), "{}", stderr(&output));
}

#[test]
fn catalan_output_carries_the_disclaimer() {
    let dir = tempfile::tempdir().unwrap();
    let page = write_json(&dir, "page.json", &my_report_example());
    let output = run(dir.path(), &["--lang", "ca", "validate", &page]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("page.json: vàlid"));
    assert!(stderr(&output).contains("traduïda automàticament"));
}
