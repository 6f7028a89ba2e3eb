// crates/report-page-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the contract bundle.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `report-page.toml`. It loads and validates as-is and
//! spells out every default.

/// Returns a canonical example `report-page.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[validation]
# "permissive" warns about undeclared members; "strict" rejects them.
unknown_fields = "permissive"
supported_version = "1.1.0"
check_sql_parameters = true
max_violations = 1000

[input]
max_document_bytes = 4194304

[audit]
enabled = false
sink = "stderr"
# path = "report-page-audit.jsonl"
"#,
    )
}
