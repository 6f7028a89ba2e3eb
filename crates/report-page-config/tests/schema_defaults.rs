//! Config schema tests for report-page-config.
// crates/report-page-config/tests/schema_defaults.rs
// =============================================================================
// Module: Config Schema Tests
// Description: Keep the config JSON Schema aligned with the loader.
// Purpose: Ensure the published schema accepts what the loader accepts.
// =============================================================================

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test-only helpers are self-describing."
)]

use std::error::Error;

use jsonschema::Draft;
use jsonschema::Validator;
use report_page_config::config_schema;
use report_page_config::config_toml_example;
use serde_json::Value;
use serde_json::json;

fn compile() -> Result<Validator, Box<dyn Error>> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&config_schema())
        .map_err(|err| err.to_string().into())
}

fn toml_to_json(content: &str) -> Result<Value, Box<dyn Error>> {
    let value: toml::Table = toml::from_str(content)?;
    Ok(serde_json::to_value(value)?)
}

#[test]
fn example_validates_against_schema() -> Result<(), Box<dyn Error>> {
    let validator = compile()?;
    let example = toml_to_json(&config_toml_example())?;
    let messages: Vec<String> = validator.iter_errors(&example).map(|err| err.to_string()).collect();
    if !messages.is_empty() {
        return Err(format!("example rejected: {}", messages.join("; ")).into());
    }
    assert!(validator.is_valid(&json!({})));
    Ok(())
}

#[test]
fn schema_rejects_what_the_loader_rejects() -> Result<(), Box<dyn Error>> {
    let validator = compile()?;
    let cases = [
        json!({"validation": {"max_violations": 0}}),
        json!({"validation": {"unknown_fields": "lenient"}}),
        json!({"validation": {"supported_version": "2.0.0"}}),
        json!({"input": {"max_document_bytes": 10}}),
        json!({"audit": {"sink": "file"}}),
        json!({"server": {}}),
    ];
    for case in cases {
        if validator.is_valid(&case) {
            return Err(format!("schema accepted {case}").into());
        }
    }
    Ok(())
}

#[test]
fn schema_defaults_match_loader_defaults() -> Result<(), Box<dyn Error>> {
    let schema = config_schema();
    let defaults = report_page_config::ReportPageConfig::default();
    assert_eq!(
        schema.pointer("/properties/validation/properties/max_violations/default"),
        Some(&json!(defaults.validation.max_violations))
    );
    assert_eq!(
        schema.pointer("/properties/input/properties/max_document_bytes/default"),
        Some(&json!(defaults.input.max_document_bytes))
    );
    assert_eq!(
        schema.pointer("/properties/validation/properties/supported_version/default"),
        Some(&json!(defaults.validation.supported_version.to_string()))
    );
    Ok(())
}
