//! Published schema tests for report-page-contract.
// crates/report-page-contract/tests/schema_fixtures.rs
// =============================================================================
// Module: Schema Fixture Tests
// Description: Run the examples and fixture bundle through the JSON Schema.
// Purpose: Keep the published schema in agreement with the fixture verdicts.
// =============================================================================

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test-only helpers are self-describing."
)]

use std::collections::BTreeSet;
use std::error::Error;

use jsonschema::Draft;
use jsonschema::Validator;
use report_page_contract::examples::full_report_example;
use report_page_contract::examples::my_report_example;
use report_page_contract::latest_report_page_schema;
use report_page_contract::report_page_schema;
use report_page_contract::schemas::LATEST_SCHEMA_ID;
use report_page_contract::test_cases;
use report_page_core::UnknownFieldPolicy;
use serde_json::Value;
use serde_json::json;

fn compile(schema: &Value) -> Result<Validator, Box<dyn Error>> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| err.to_string().into())
}

fn errors(validator: &Validator, document: &Value) -> Vec<String> {
    validator.iter_errors(document).map(|err| err.to_string()).collect()
}

#[test]
fn examples_validate_under_both_policies() -> Result<(), Box<dyn Error>> {
    for policy in [UnknownFieldPolicy::Permissive, UnknownFieldPolicy::Strict] {
        let validator = compile(&report_page_schema(policy))?;
        for example in [my_report_example(), full_report_example()] {
            let messages = errors(&validator, &example);
            if !messages.is_empty() {
                return Err(format!("{policy}: example rejected: {}", messages.join("; ")).into());
            }
        }
    }
    Ok(())
}

#[test]
fn schema_expressible_fixtures_match_schema_verdicts() -> Result<(), Box<dyn Error>> {
    let permissive = compile(&report_page_schema(UnknownFieldPolicy::Permissive))?;
    let strict = compile(&report_page_schema(UnknownFieldPolicy::Strict))?;
    let mut checked = 0_usize;
    for case in test_cases().into_iter().filter(|case| case.schema_expressible) {
        let validator = if case.unknown_fields.is_strict() { &strict } else { &permissive };
        let valid = validator.is_valid(&case.document);
        if valid != case.expected.valid {
            return Err(format!(
                "{}: schema verdict {valid}, expected {} ({})",
                case.name,
                case.expected.valid,
                errors(validator, &case.document).join("; ")
            )
            .into());
        }
        checked += 1;
    }
    assert!(checked > 20, "expected most fixtures to be schema expressible");
    Ok(())
}

#[test]
fn native_only_fixtures_pass_the_schema() -> Result<(), Box<dyn Error>> {
    let permissive = compile(&report_page_schema(UnknownFieldPolicy::Permissive))?;
    for case in test_cases().into_iter().filter(|case| !case.schema_expressible) {
        assert!(!case.expected.valid, "{}: native-only cases exist to be rejected", case.name);
        let messages = errors(&permissive, &case.document);
        if !messages.is_empty() {
            return Err(format!("{}: schema rejected: {}", case.name, messages.join("; ")).into());
        }
    }
    Ok(())
}

#[test]
fn fixture_names_are_unique_and_expectations_sorted() {
    let cases = test_cases();
    let names: BTreeSet<&str> = cases.iter().map(|case| case.name.as_str()).collect();
    assert_eq!(names.len(), cases.len());
    for case in &cases {
        let mut paths = case.expected.violation_paths.clone();
        paths.sort();
        paths.dedup();
        assert_eq!(paths, case.expected.violation_paths, "{}", case.name);
        assert_eq!(case.expected.valid, case.expected.violation_paths.is_empty(), "{}", case.name);
        if !case.expected.valid {
            assert!(case.expected.warning_kinds.is_empty(), "{}", case.name);
        }
    }
}

#[test]
fn strict_schema_closes_objects() -> Result<(), Box<dyn Error>> {
    let strict = compile(&report_page_schema(UnknownFieldPolicy::Strict))?;
    let permissive = compile(&report_page_schema(UnknownFieldPolicy::Permissive))?;
    let mut document = my_report_example();
    document["rows"][0]["visuals"][0]["query"]["engine"] = json!("duckdb");
    assert!(permissive.is_valid(&document));
    assert!(!strict.is_valid(&document));
    Ok(())
}

#[test]
fn foreign_option_bundles_are_rejected_under_both_policies() -> Result<(), Box<dyn Error>> {
    let mut document = my_report_example();
    document["rows"][0]["visuals"][0]["chart_options"] =
        json!({ "category_field": "a", "value_field": "b" });
    for policy in [UnknownFieldPolicy::Permissive, UnknownFieldPolicy::Strict] {
        assert!(!compile(&report_page_schema(policy))?.is_valid(&document), "{policy}");
    }
    Ok(())
}

#[test]
fn latest_alias_matches_pinned_schema_except_id() {
    let mut pinned = report_page_schema(UnknownFieldPolicy::Permissive);
    let latest = latest_report_page_schema();
    assert_eq!(latest["$id"], json!(LATEST_SCHEMA_ID));
    pinned["$id"] = json!(LATEST_SCHEMA_ID);
    assert_eq!(pinned, latest);
}
