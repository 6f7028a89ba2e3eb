// crates/report-page-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for report-page-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::path::PathBuf;

use report_page_config::ConfigError;
use report_page_config::ReportPageConfig;
use tempfile::TempDir;

/// Writes `content` to a `report-page.toml` inside a fresh temp dir.
pub fn write_config(content: &str) -> Result<(TempDir, PathBuf), std::io::Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report-page.toml");
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Parses TOML text into a validated config.
pub fn parse(content: &str) -> Result<ReportPageConfig, ConfigError> {
    ReportPageConfig::parse(content)
}

/// Asserts that parsing fails as invalid with a message containing `needle`.
pub fn assert_invalid(content: &str, needle: &str) -> Result<(), String> {
    match parse(content) {
        Err(ConfigError::Invalid(message)) if message.contains(needle) => Ok(()),
        Err(other) => Err(format!("unexpected error for {needle}: {other}")),
        Ok(_) => Err(format!("expected invalid config mentioning {needle}")),
    }
}
