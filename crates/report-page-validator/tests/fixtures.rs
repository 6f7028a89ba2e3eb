//! Shared fixture conformance tests for report-page-validator.
//!
//! ## Purpose
//! Every fixture case shipped with the contract must produce exactly the
//! verdict, violation paths, and warning kinds it records.
//!
//! ## What is covered
//! - Native verdicts for every case under its own unknown-field policy.
//! - Schema parity for the schema-expressible cases.
//! - Schema leniency never exceeding native strictness.
// crates/report-page-validator/tests/fixtures.rs
// ============================================================================
// Module: Fixture Conformance Tests
// Description: Run the contract fixture bundle through the native validator.
// Purpose: Keep validator output and fixture expectations in lockstep.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use report_page_contract::TestCase;
use report_page_contract::test_cases;
use report_page_core::UnknownFieldPolicy;
use report_page_validator::ContractSchema;
use report_page_validator::DocumentValidator;
use report_page_validator::ValidatorOptions;

fn validator_for(case: &TestCase) -> DocumentValidator {
    DocumentValidator::new(ValidatorOptions::default().with_unknown_fields(case.unknown_fields))
}

#[test]
fn every_fixture_matches_its_expected_outcome() {
    let mut failures = Vec::new();
    for case in test_cases() {
        let report = validator_for(&case).validate(&case.document);
        let expected = &case.expected;
        if report.is_valid() != expected.valid
            || report.violation_paths() != expected.violation_paths
            || report.warning_kinds() != expected.warning_kinds
        {
            failures.push(format!(
                "{}: got valid={} paths={:?} warnings={:?}; expected valid={} paths={:?} \
                 warnings={:?}",
                case.name,
                report.is_valid(),
                report.violation_paths(),
                report.warning_kinds(),
                expected.valid,
                expected.violation_paths,
                expected.warning_kinds,
            ));
        }
    }
    assert!(failures.is_empty(), "fixture mismatches:\n{}", failures.join("\n"));
}

#[test]
fn schema_expressible_fixtures_agree_with_the_schema() {
    let permissive = ContractSchema::compile(UnknownFieldPolicy::Permissive).unwrap();
    let strict = ContractSchema::compile(UnknownFieldPolicy::Strict).unwrap();
    for case in test_cases().into_iter().filter(|case| case.schema_expressible) {
        let schema = if case.unknown_fields.is_strict() { &strict } else { &permissive };
        let native = validator_for(&case).validate(&case.document).is_valid();
        assert_eq!(schema.is_valid(&case.document), native, "{}", case.name);
    }
}

#[test]
fn schema_never_rejects_what_the_validator_accepts() {
    let permissive = ContractSchema::compile(UnknownFieldPolicy::Permissive).unwrap();
    for case in test_cases() {
        let native = validator_for(&case).validate(&case.document);
        if native.is_valid() && !case.unknown_fields.is_strict() {
            assert!(
                permissive.check(&case.document).is_ok(),
                "{}: schema rejected a natively valid document",
                case.name
            );
        }
    }
}

#[test]
fn accepted_fixtures_convert_to_the_typed_model() {
    for case in test_cases().into_iter().filter(|case| case.expected.valid) {
        let accepted = validator_for(&case).accept(&case.document);
        assert!(accepted.is_ok(), "{} did not convert", case.name);
    }
}
