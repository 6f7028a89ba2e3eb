// crates/report-page-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builder for report-page.toml.
// Purpose: Provide the canonical validation schema for config artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The schema mirrors [`crate::ReportPageConfig`] including its limits and
//! defaults. It is published alongside the document contract so editors can
//! validate `report-page.toml` files.

use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::VERSION_COMPONENT_PATTERN;
use serde_json::Value;
use serde_json::json;

use crate::config::MAX_DOCUMENT_BYTES;
use crate::config::MAX_MAX_VIOLATIONS;
use crate::config::MAX_TOTAL_PATH_LENGTH;
use crate::config::MIN_DOCUMENT_BYTES;
use crate::config::MIN_MAX_VIOLATIONS;
use crate::config::default_check_sql_parameters;
use crate::config::default_max_document_bytes;
use crate::config::default_max_violations;

/// Returns the JSON schema for `report-page.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "report-page://config/report-page-config.schema.json",
        "title": "Report Page Tool Configuration",
        "description": "Configuration for the report page validator and contract tooling.",
        "type": "object",
        "properties": {
            "validation": validation_config_schema(),
            "input": input_config_schema(),
            "audit": audit_config_schema()
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Schema for the `[validation]` section.
fn validation_config_schema() -> Value {
    let major = CURRENT_SCHEMA_VERSION.major;
    let component = VERSION_COMPONENT_PATTERN;
    json!({
        "type": "object",
        "properties": {
            "unknown_fields": {
                "type": "string",
                "enum": ["permissive", "strict"],
                "default": "permissive",
                "description": "permissive warns about undeclared members; strict rejects them."
            },
            "supported_version": {
                "type": "string",
                "pattern": format!("^{major}\\.{component}\\.{component}$"),
                "default": CURRENT_SCHEMA_VERSION.to_string(),
                "description": "Contract version the validator is pinned to."
            },
            "check_sql_parameters": {
                "type": "boolean",
                "default": default_check_sql_parameters(),
                "description": "Warn about SQL placeholders that no parameter declares."
            },
            "max_violations": {
                "type": "integer",
                "minimum": MIN_MAX_VIOLATIONS,
                "maximum": MAX_MAX_VIOLATIONS,
                "default": default_max_violations(),
                "description": "Cap on reported violations per document."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the `[input]` section.
fn input_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "max_document_bytes": {
                "type": "integer",
                "minimum": MIN_DOCUMENT_BYTES,
                "maximum": MAX_DOCUMENT_BYTES,
                "default": default_max_document_bytes(),
                "description": "Largest document accepted, in bytes."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the `[audit]` section.
fn audit_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "enabled": {
                "type": "boolean",
                "default": false,
                "description": "Emit one audit event per validated document."
            },
            "sink": {
                "type": "string",
                "enum": ["stderr", "file"],
                "default": "stderr",
                "description": "Audit destination."
            },
            "path": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_TOTAL_PATH_LENGTH,
                "description": "JSON-lines audit file; required when sink = \"file\"."
            }
        },
        "if": {
            "properties": { "sink": { "const": "file" } },
            "required": ["sink"]
        },
        "then": { "required": ["path"] },
        "additionalProperties": false
    })
}
