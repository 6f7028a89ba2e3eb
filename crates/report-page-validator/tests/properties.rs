//! Report page validator property-based tests.
//!
//! ## Purpose
//! Validation is a pure function over arbitrary JSON. These tests generate
//! both arbitrary values and near-valid pages to check that the validator
//! never panics, is deterministic, and reports only addressable paths.
//!
//! ## What is covered
//! - Arbitrary JSON values are classified without panic.
//! - Every violation path resolves in the document (or its parent does, for
//!   missing members).
//! - Accepted pages survive a typed round trip with the same verdict.
//! - The published schema accepts every near-valid page the validator accepts.
// crates/report-page-validator/tests/properties.rs
// ============================================================================
// Module: Validator Property-Based Tests
// Description: Generated-input checks for the document validator.
// Purpose: Pin totality, determinism, and path addressability.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::LazyLock;

use proptest::prelude::*;
use report_page_core::ReportPage;
use report_page_core::UnknownFieldPolicy;
use report_page_validator::ContractSchema;
use report_page_validator::DocumentValidator;
use report_page_validator::ViolationKind;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

fn arbitrary_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z#:/~ ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 6).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("title".to_string()),
                    Just("meta".to_string()),
                    Just("rows".to_string()),
                    Just("type".to_string()),
                    Just("visuals".to_string()),
                    Just("kind".to_string()),
                    "[a-z_/~]{1,6}",
                ],
                inner,
                0 .. 6,
            )
            .prop_map(|map| Value::Object(map.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

static PERMISSIVE_SCHEMA: LazyLock<ContractSchema> =
    LazyLock::new(|| ContractSchema::compile(UnknownFieldPolicy::Permissive).unwrap());

fn tile(id: Option<String>, timeout: Value, color: String) -> Value {
    let mut visual = json!({
        "kind": "tile",
        "query": { "sql": "SELECT COUNT(*) AS total FROM orders", "timeout_ms": timeout },
        "tile_options": { "color": color, "decimals": 2 }
    });
    if let (Some(id), Value::Object(map)) = (id, &mut visual) {
        map.insert("id".to_string(), json!(id));
    }
    visual
}

fn near_valid_page() -> impl Strategy<Value = Value> {
    let visual = (
        prop::option::of("[a-z]{1,3}"),
        prop_oneof![
            (0_u32 .. 700_000).prop_map(Value::from),
            (0_u32 .. 700_000).prop_map(|timeout| json!(f64::from(timeout))),
        ],
        prop_oneof![Just("#abc".to_string()), Just("#a1b2c3".to_string()), "#[0-9a-z]{0,7}"],
    )
        .prop_map(|(id, timeout, color)| tile(id, timeout, color));
    let email = prop_oneof![
        Just("ana@example.com".to_string()),
        "[a-z]{1,3}[ \u{85}\u{a0}\u{2028}\u{3000}\u{feff}]?@[a-z.]{1,4}",
    ];
    (
        "[A-Za-z ]{0,12}",
        prop_oneof![
            Just("1.1.0"),
            Just("1.0.0"),
            Just("1.4.2"),
            Just("2.0.0"),
            Just("1.1"),
            Just("1.99999999999999999999.0"),
        ],
        prop::option::of(email),
        prop::collection::vec(visual, 0 .. 5),
    )
        .prop_map(|(title, version, email, visuals)| {
            let mut author = json!({ "id": "analyst-1", "name": "Report Author" });
            if let (Some(email), Value::Object(map)) = (email, &mut author) {
                map.insert("email".to_string(), json!(email));
            }
            json!({
                "title": title,
                "meta": {
                    "schema_version": version,
                    "last_updated": "2024-06-01T09:00:00Z",
                    "updated_by": author
                },
                "rows": [{ "type": "tiles", "visuals": visuals }]
            })
        })
}

fn parent(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

proptest! {
    #[test]
    fn arbitrary_json_is_classified_without_panic(document in arbitrary_json()) {
        let validator = DocumentValidator::default();
        let first = validator.validate(&document);
        let second = validator.validate(&document);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn violation_paths_are_addressable(document in arbitrary_json()) {
        let report = DocumentValidator::default().validate(&document);
        for violation in report.violations() {
            let resolves = document.pointer(&violation.path).is_some();
            let missing_under_parent = violation.kind == ViolationKind::MissingField
                && document.pointer(parent(&violation.path)).is_some();
            prop_assert!(resolves || missing_under_parent, "{}", violation);
        }
    }

    #[test]
    fn near_valid_pages_are_addressable(document in near_valid_page()) {
        let report = DocumentValidator::default().validate(&document);
        for violation in report.violations() {
            let resolves = document.pointer(&violation.path).is_some();
            let missing_under_parent = violation.kind == ViolationKind::MissingField
                && document.pointer(parent(&violation.path)).is_some();
            prop_assert!(resolves || missing_under_parent, "{}", violation);
        }
    }

    #[test]
    fn schema_accepts_what_the_validator_accepts(document in near_valid_page()) {
        if DocumentValidator::default().validate(&document).is_valid() {
            let messages = PERMISSIVE_SCHEMA.check(&document).err().unwrap_or_default();
            prop_assert!(messages.is_empty(), "{}: {:?}", document, messages);
        }
    }

    #[test]
    fn accepted_pages_round_trip(document in near_valid_page()) {
        let validator = DocumentValidator::default();
        if let Ok(accepted) = validator.accept(&document) {
            let round_tripped = accepted.page.to_value().unwrap();
            let again = validator.validate(&round_tripped);
            prop_assert!(again.is_valid(), "{:?}", again.violations());
            let reparsed = ReportPage::from_value(round_tripped).unwrap();
            prop_assert_eq!(reparsed, accepted.page);
        }
    }
}
