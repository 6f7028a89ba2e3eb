//! Default and example tests for report-page-config.
// crates/report-page-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Default Tests
// Description: Defaults, the canonical example, and file loading.
// Purpose: Ensure an empty or example config yields the documented settings.
// =============================================================================

use report_page_config::AuditSinkKind;
use report_page_config::ConfigError;
use report_page_config::ReportPageConfig;
use report_page_config::config_toml_example;
use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::UnknownFieldPolicy;

mod common;

type TestResult = Result<(), String>;

#[test]
fn empty_config_uses_defaults() -> TestResult {
    let config = common::parse("").map_err(|err| err.to_string())?;
    assert_eq!(config.validation.unknown_fields, UnknownFieldPolicy::Permissive);
    assert_eq!(config.validation.supported_version, CURRENT_SCHEMA_VERSION);
    assert!(config.validation.check_sql_parameters);
    assert_eq!(config.validation.max_violations, 1000);
    assert_eq!(config.input.max_document_bytes, 4 * 1024 * 1024);
    assert!(!config.audit.enabled);
    assert_eq!(config.audit.sink, AuditSinkKind::Stderr);
    assert_eq!(config, ReportPageConfig::default());
    Ok(())
}

#[test]
fn canonical_example_loads_and_matches_defaults() -> TestResult {
    let config = common::parse(&config_toml_example()).map_err(|err| err.to_string())?;
    assert_eq!(config, ReportPageConfig::default());
    Ok(())
}

#[test]
fn strict_policy_parses() -> TestResult {
    let config = common::parse("[validation]\nunknown_fields = \"strict\"\n")
        .map_err(|err| err.to_string())?;
    assert!(config.validation.unknown_fields.is_strict());
    Ok(())
}

#[test]
fn load_reads_explicit_file() -> TestResult {
    let (_dir, path) = common::write_config("[validation]\nmax_violations = 5\n")
        .map_err(|err| err.to_string())?;
    let config = ReportPageConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    assert_eq!(config.validation.max_violations, 5);
    assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match ReportPageConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    let (_dir, path) = common::write_config(&padding).map_err(|err| err.to_string())?;
    match ReportPageConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size limit error, got {other:?}")),
    }
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("report-page.toml");
    std::fs::write(&path, [0xff_u8, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match ReportPageConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        other => Err(format!("expected utf-8 error, got {other:?}")),
    }
}
