// crates/report-page-contract/src/fixtures.rs
// ============================================================================
// Module: Contract Fixtures
// Description: Test-case bundle of documents with expected verdicts.
// Purpose: Give every consumer one shared conformance suite.
// Dependencies: report-page-core, serde_json
// ============================================================================

//! ## Overview
//! Each case pairs a candidate document with the verdict, the sorted
//! violation paths, and the sorted warning kinds a conforming validator must
//! produce. Cases marked `schema_expressible` reach the same verdict through
//! the published JSON Schema alone; the rest depend on cross-field rules only
//! the native validator enforces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use report_page_core::UnknownFieldPolicy;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::examples::full_report_example;
use crate::examples::my_report_example;
use crate::types::ExpectedOutcome;
use crate::types::TestCase;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Returns the canonical fixture bundle in a stable order.
#[must_use]
pub fn test_cases() -> Vec<TestCase> {
    let mut cases = Vec::new();
    cases.extend(document_cases());
    cases.extend(version_cases());
    cases.extend(row_cases());
    cases.extend(visual_cases());
    cases.extend(query_cases());
    cases.extend(parameter_cases());
    cases.extend(unknown_field_cases());
    cases
}

// ============================================================================
// SECTION: Document Cases
// ============================================================================

/// Top-level shape cases.
fn document_cases() -> Vec<TestCase> {
    vec![
        valid("my-report", "Minimal page with one verified tile.", my_report_example(), &[]),
        valid("full-report", "Every row type and option bundle.", full_report_example(), &[]),
        invalid(
            "missing-title",
            "title is required.",
            without(my_report_example(), "title"),
            &["/title"],
        ),
        invalid(
            "missing-meta",
            "meta is required.",
            without(my_report_example(), "meta"),
            &["/meta"],
        ),
        invalid(
            "missing-rows",
            "rows is required.",
            without(my_report_example(), "rows"),
            &["/rows"],
        ),
        invalid(
            "title-wrong-type",
            "title must be a string.",
            with(my_report_example(), "title", json!(5)),
            &["/title"],
        ),
        invalid("not-an-object", "The document must be an object.", json!([]), &[""]),
        invalid("empty-rows", "A page needs at least one row.", page(json!([])), &["/rows"]),
        invalid(
            "bad-timestamp",
            "last_updated must be RFC 3339.",
            with_meta("last_updated", json!("yesterday")),
            &["/meta/last_updated"],
        ),
        invalid(
            "bad-email",
            "Author email needs exactly one @.",
            with_meta(
                "updated_by",
                json!({ "id": "a-1", "name": "Ana", "email": "ana.example.com" }),
            ),
            &["/meta/updated_by/email"],
        ),
        invalid(
            "email-byte-order-mark",
            "A byte order mark counts as whitespace inside an email.",
            with_meta(
                "updated_by",
                json!({ "id": "a-1", "name": "Ana", "email": "ana\u{feff}@example.com" }),
            ),
            &["/meta/updated_by/email"],
        ),
        invalid(
            "datasource-bad-slug-key",
            "Datasource names are slugs.",
            with(
                my_report_example(),
                "datasources",
                json!({ "bad key": { "kind": "postgres", "connection_ref": "secrets/db" } }),
            ),
            &["/datasources/bad key"],
        ),
        valid(
            "theme-accent-color-deprecated",
            "accent_color still reads in v1 with a warning.",
            with(my_report_example(), "theme", json!({ "accent_color": "#123456" })),
            &["deprecated_field"],
        ),
    ]
}

// ============================================================================
// SECTION: Version Cases
// ============================================================================

/// `meta.schema_version` cases.
fn version_cases() -> Vec<TestCase> {
    vec![
        invalid(
            "major-version-mismatch",
            "A different major is unreadable.",
            with_meta("schema_version", json!("2.0.0")),
            &["/meta/schema_version"],
        ),
        valid(
            "newer-minor-version",
            "A newer minor is readable with a warning.",
            with_meta("schema_version", json!("1.2.0")),
            &["newer_minor_version"],
        ),
        valid(
            "older-minor-version",
            "An older minor is fully readable.",
            with_meta("schema_version", json!("1.0.0")),
            &[],
        ),
        invalid(
            "malformed-version",
            "Versions are MAJOR.MINOR.PATCH.",
            with_meta("schema_version", json!("1.1")),
            &["/meta/schema_version"],
        ),
        invalid(
            "version-component-too-long",
            "Version components are limited to 19 digits.",
            with_meta("schema_version", json!("1.99999999999999999999.0")),
            &["/meta/schema_version"],
        ),
    ]
}

// ============================================================================
// SECTION: Row Cases
// ============================================================================

/// Row arity and kind whitelist cases.
fn row_cases() -> Vec<TestCase> {
    vec![
        valid(
            "tiles-row-three-visuals",
            "Three tiles fill a tiles row.",
            page(json!([row("tiles", vec![tile(), tile(), tile()])])),
            &[],
        ),
        invalid(
            "tiles-row-four-visuals",
            "Tiles rows hold at most three visuals.",
            page(json!([row("tiles", vec![tile(), tile(), tile(), tile()])])),
            &["/rows/0/visuals"],
        ),
        invalid(
            "tiles-row-zero-visuals",
            "Tiles rows hold at least one visual.",
            page(json!([row("tiles", Vec::new())])),
            &["/rows/0/visuals"],
        ),
        invalid(
            "table-row-two-visuals",
            "Table rows hold exactly one visual.",
            page(json!([row("table", vec![table(), table()])])),
            &["/rows/0/visuals"],
        ),
        invalid(
            "annotation-row-zero-visuals",
            "Annotation rows hold exactly one visual.",
            page(json!([row("annotation", Vec::new())])),
            &["/rows/0/visuals"],
        ),
        invalid(
            "charts-row-with-tile",
            "Charts rows accept only bar and pie visuals.",
            page(json!([row("charts", vec![tile()])])),
            &["/rows/0/visuals/0/kind"],
        ),
        invalid(
            "unknown-row-type",
            "Row type must be one of the four known types.",
            page(json!([row("grid", vec![tile()])])),
            &["/rows/0/type"],
        ),
    ]
}

// ============================================================================
// SECTION: Visual Cases
// ============================================================================

/// Visual kind, option bundle, and leaf cases.
fn visual_cases() -> Vec<TestCase> {
    vec![
        invalid(
            "bad-hex-color",
            "Hex colors need 3 or 6 hex digits.",
            page(json!([row("tiles", vec![tile_with("tile_options", json!({ "color": "#ZZZ" }))])])),
            &["/rows/0/visuals/0/tile_options/color"],
        ),
        valid(
            "short-hex-color",
            "Three-digit hex colors are accepted.",
            page(json!([row("tiles", vec![tile_with("tile_options", json!({ "color": "#abc" }))])])),
            &[],
        ),
        valid(
            "long-hex-color",
            "Six-digit hex colors are accepted.",
            page(json!([row(
                "tiles",
                vec![tile_with("tile_options", json!({ "color": "#aabbcc" }))]
            )])),
            &[],
        ),
        invalid(
            "decimals-out-of-range",
            "Tile decimals range from 0 to 10.",
            page(json!([row("tiles", vec![tile_with("tile_options", json!({ "decimals": 11 }))])])),
            &["/rows/0/visuals/0/tile_options/decimals"],
        ),
        invalid(
            "bar-with-table-options",
            "A bar visual may not carry table options.",
            page(json!([row("charts", vec![extend(bar(), "table_options", json!({}))])])),
            &["/rows/0/visuals/0/table_options"],
        ),
        invalid(
            "annotation-missing-options",
            "Annotations require annotation_options.",
            page(json!([row("annotation", vec![json!({ "kind": "annotation" })])])),
            &["/rows/0/visuals/0/annotation_options"],
        ),
        invalid(
            "chart-empty-category-field",
            "Chart category_field must be non-empty.",
            page(json!([row(
                "charts",
                vec![json!({
                    "kind": "bar",
                    "chart_options": { "category_field": "", "value_field": "total" }
                })]
            )])),
            &["/rows/0/visuals/0/chart_options/category_field"],
        ),
        native_only(invalid(
            "duplicate-visual-ids",
            "Visual ids are unique across the page.",
            page(json!([row(
                "tiles",
                vec![extend(tile(), "id", json!("kpi")), extend(tile(), "id", json!("kpi"))]
            )])),
            &["/rows/0/visuals/1/id"],
        )),
        native_only(invalid(
            "default-sort-unknown-column",
            "default_sort must name a declared column.",
            page(json!([row(
                "table",
                vec![extend(
                    table(),
                    "table_options",
                    json!({
                        "columns": [{ "field": "customer" }],
                        "default_sort": { "field": "revenue", "direction": "asc" }
                    })
                )]
            )])),
            &["/rows/0/visuals/0/table_options/default_sort/field"],
        )),
    ]
}

// ============================================================================
// SECTION: Query and Verify Cases
// ============================================================================

/// Query and verify block cases.
fn query_cases() -> Vec<TestCase> {
    vec![
        native_only(invalid(
            "unknown-datasource",
            "query.datasource must name a declared datasource.",
            page(json!([row(
                "tiles",
                vec![tile_with("query", json!({ "sql": "SELECT 1 AS v", "datasource": "nope" }))]
            )])),
            &["/rows/0/visuals/0/query/datasource"],
        )),
        invalid(
            "timeout-out-of-range",
            "timeout_ms ranges from 1 to 600000.",
            page(json!([row(
                "tiles",
                vec![tile_with("query", json!({ "sql": "SELECT 1 AS v", "timeout_ms": 0 }))]
            )])),
            &["/rows/0/visuals/0/query/timeout_ms"],
        ),
        valid(
            "integral-float-timeout",
            "An integral float such as 1000.0 is an integer.",
            page(json!([row(
                "tiles",
                vec![tile_with("query", json!({ "sql": "SELECT 1 AS v", "timeout_ms": 1000.0 }))]
            )])),
            &[],
        ),
        valid(
            "deprecated-limit",
            "query.limit still reads in v1 with a warning.",
            page(json!([row(
                "tiles",
                vec![tile_with("query", json!({ "sql": "SELECT 1 AS v", "limit": 10 }))]
            )])),
            &["deprecated_field"],
        ),
        valid(
            "sql-placeholder-undeclared",
            "Undeclared :name placeholders are reported as warnings.",
            page(json!([row(
                "tiles",
                vec![tile_with(
                    "query",
                    json!({ "sql": "SELECT COUNT(*) AS v FROM t WHERE region = :region" })
                )]
            )])),
            &["undeclared_sql_parameter"],
        ),
        invalid(
            "row-count-eq-with-min",
            "row_count.eq excludes min and max.",
            page(json!([row("tiles", vec![tile_with("verify", json!({ "row_count": { "eq": 1, "min": 0 } }))])])),
            &["/rows/0/visuals/0/verify/row_count"],
        ),
        invalid(
            "row-count-empty",
            "row_count needs at least one bound.",
            page(json!([row("tiles", vec![tile_with("verify", json!({ "row_count": {} }))])])),
            &["/rows/0/visuals/0/verify/row_count"],
        ),
        native_only(invalid(
            "row-count-min-above-max",
            "row_count.min may not exceed max.",
            page(json!([row(
                "tiles",
                vec![tile_with("verify", json!({ "row_count": { "min": 5, "max": 2 } }))]
            )])),
            &["/rows/0/visuals/0/verify/row_count"],
        )),
        invalid(
            "value-rule-without-assertion",
            "A value rule needs an assertion besides column.",
            page(json!([row(
                "tiles",
                vec![tile_with("verify", json!({ "values": [{ "column": "v" }] }))]
            )])),
            &["/rows/0/visuals/0/verify/values/0"],
        ),
        native_only(invalid(
            "verify-duplicate-column-names",
            "Verify column names are unique.",
            page(json!([row(
                "tiles",
                vec![tile_with("verify", json!({ "columns": [{ "name": "v" }, { "name": "v" }] }))]
            )])),
            &["/rows/0/visuals/0/verify/columns/1/name"],
        )),
    ]
}

// ============================================================================
// SECTION: Parameter Cases
// ============================================================================

/// Page parameter cases.
fn parameter_cases() -> Vec<TestCase> {
    vec![
        invalid(
            "parameter-default-type-mismatch",
            "A parameter default must match its type.",
            with(
                my_report_example(),
                "parameters",
                json!([{ "name": "top_n", "type": "integer", "default": "ten" }]),
            ),
            &["/parameters/0/default"],
        ),
        native_only(invalid(
            "parameter-default-not-allowed",
            "A parameter default must be one of allowed_values.",
            with(
                my_report_example(),
                "parameters",
                json!([{
                    "name": "region",
                    "type": "string",
                    "default": "emea",
                    "allowed_values": ["amer", "apac"]
                }]),
            ),
            &["/parameters/0/default"],
        )),
        native_only(invalid(
            "duplicate-parameter-names",
            "Parameter names are unique.",
            with(
                my_report_example(),
                "parameters",
                json!([
                    { "name": "region", "type": "string" },
                    { "name": "region", "type": "string" }
                ]),
            ),
            &["/parameters/1/name"],
        )),
    ]
}

// ============================================================================
// SECTION: Unknown Field Cases
// ============================================================================

/// Unknown-field policy cases.
fn unknown_field_cases() -> Vec<TestCase> {
    let with_owner = with(my_report_example(), "owner", json!("finance"));
    vec![
        valid(
            "unknown-field-permissive",
            "Permissive readers ignore undeclared members with a warning.",
            with_owner.clone(),
            &["unknown_field_ignored"],
        ),
        strict(invalid(
            "unknown-field-strict",
            "Strict readers reject undeclared members.",
            with_owner,
            &["/owner"],
        )),
        strict(valid(
            "full-report-strict",
            "The full example declares only known members.",
            full_report_example(),
            &[],
        )),
    ]
}

// ============================================================================
// SECTION: Case Builders
// ============================================================================

/// Builds a case expected to validate.
fn valid(name: &str, description: &str, document: Value, warning_kinds: &[&str]) -> TestCase {
    build_case(name, description, document, true, &[], warning_kinds)
}

/// Builds a case expected to fail at `paths`.
fn invalid(name: &str, description: &str, document: Value, paths: &[&str]) -> TestCase {
    build_case(name, description, document, false, paths, &[])
}

/// Assembles a permissive, schema-expressible case with sorted expectations.
fn build_case(
    name: &str,
    description: &str,
    document: Value,
    valid: bool,
    paths: &[&str],
    warning_kinds: &[&str],
) -> TestCase {
    let mut violation_paths: Vec<String> = paths.iter().map(ToString::to_string).collect();
    violation_paths.sort();
    let mut warning_kinds: Vec<String> = warning_kinds.iter().map(ToString::to_string).collect();
    warning_kinds.sort();
    TestCase {
        name: name.to_string(),
        description: description.to_string(),
        unknown_fields: UnknownFieldPolicy::Permissive,
        schema_expressible: true,
        document,
        expected: ExpectedOutcome {
            valid,
            violation_paths,
            warning_kinds,
        },
    }
}

/// Marks a case as depending on native-only cross-field rules.
fn native_only(mut case: TestCase) -> TestCase {
    case.schema_expressible = false;
    case
}

/// Evaluates a case under the strict unknown-field policy.
fn strict(mut case: TestCase) -> TestCase {
    case.unknown_fields = UnknownFieldPolicy::Strict;
    case
}

// ============================================================================
// SECTION: Document Builders
// ============================================================================

/// Wraps rows in a page with valid meta.
fn page(rows: Value) -> Value {
    let mut document = my_report_example();
    if let Value::Object(map) = &mut document {
        map.insert("rows".to_string(), rows);
    }
    document
}

/// Returns the example page with one `meta` member replaced.
fn with_meta(key: &str, value: Value) -> Value {
    let mut document = my_report_example();
    if let Some(Value::Object(meta)) = document.get_mut("meta") {
        meta.insert(key.to_string(), value);
    }
    document
}

/// Returns `document` with `key` set to `value`.
fn with(document: Value, key: &str, value: Value) -> Value {
    extend(document, key, value)
}

/// Returns `document` with `key` removed.
fn without(mut document: Value, key: &str) -> Value {
    if let Value::Object(map) = &mut document {
        map.remove(key);
    }
    document
}

/// Returns an object with `key` inserted.
fn extend(mut object: Value, key: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut object {
        map.insert(key.to_string(), value);
    }
    object
}

/// Builds a row object.
fn row(row_type: &str, visuals: Vec<Value>) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), json!(row_type));
    map.insert("visuals".to_string(), Value::Array(visuals));
    Value::Object(map)
}

/// Plain tile visual with a query.
fn tile() -> Value {
    json!({ "kind": "tile", "query": { "sql": "SELECT 1 AS v" } })
}

/// Tile visual with `key` replaced.
fn tile_with(key: &str, value: Value) -> Value {
    extend(tile(), key, value)
}

/// Plain table visual.
fn table() -> Value {
    json!({ "kind": "table", "query": { "sql": "SELECT customer, revenue FROM totals" } })
}

/// Plain bar visual.
fn bar() -> Value {
    json!({
        "kind": "bar",
        "chart_options": { "category_field": "region", "value_field": "total" }
    })
}
