// crates/report-page-contract/src/schemas.rs
// ============================================================================
// Module: Report Page Schemas
// Description: JSON Schema (draft 2020-12) builders for report page documents.
// Purpose: Publish the contract in a form any JSON Schema consumer can enforce.
// Dependencies: report-page-core, serde_json
// ============================================================================

//! ## Overview
//! The schema encodes every rule that JSON Schema can express: required
//! fields, leaf patterns, enumerations, ranges, row arity, the visual-kind
//! whitelist per row type, option-bundle exclusivity, and the `row_count`
//! and value-rule shape rules. Cross-document references (datasource names,
//! unique ids, allowed-value membership, sort columns) are enforced only by
//! the native validator.
//!
//! Two policies are published. The permissive schema leaves objects open so
//! newer minor versions stay readable; the strict schema closes every object.
//! Foreign option bundles are rejected under both policies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::ColumnType;
use report_page_core::DatasourceKind;
use report_page_core::MAX_RESULT_ROWS;
use report_page_core::MAX_TIMEOUT_MS;
use report_page_core::OPTION_BUNDLE_KEYS;
use report_page_core::ParameterType;
use report_page_core::RowType;
use report_page_core::UnknownFieldPolicy;
use report_page_core::VERSION_COMPONENT_PATTERN;
use report_page_core::ValueFormat;
use report_page_core::VisualKind;
use report_page_core::color::HEX_COLOR_PATTERN;
use report_page_core::identifiers::EMAIL_PATTERN;
use report_page_core::identifiers::IDENTIFIER_PATTERN;
use report_page_core::identifiers::SLUG_PATTERN;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Identifiers and Patterns
// ============================================================================

/// JSON Schema dialect used by every published schema.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";
/// `$id` of the unpinned alias.
pub const LATEST_SCHEMA_ID: &str = "report-page://schema/latest/report-page.schema.json";
/// RFC 3339 shape check; calendar validity is left to the native validator.
pub const TIMESTAMP_PATTERN: &str =
    r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?([Zz]|[+-][0-9]{2}:[0-9]{2})$";
/// Calendar date shape check.
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

/// Returns the artifact-relative path of the pinned schema for `policy`.
#[must_use]
pub fn schema_path(policy: UnknownFieldPolicy) -> String {
    let major = CURRENT_SCHEMA_VERSION.major_path();
    match policy {
        UnknownFieldPolicy::Permissive => format!("schema/{major}/report-page.schema.json"),
        UnknownFieldPolicy::Strict => format!("schema/{major}/report-page.strict.schema.json"),
    }
}

/// Returns the `$id` of the pinned schema for `policy`.
#[must_use]
pub fn schema_id(policy: UnknownFieldPolicy) -> String {
    format!("report-page://{}", schema_path(policy))
}

/// Returns the pattern accepting every version of the current major.
#[must_use]
pub fn schema_version_pattern() -> String {
    let component = VERSION_COMPONENT_PATTERN;
    format!(r"^{}\.{component}\.{component}$", CURRENT_SCHEMA_VERSION.major)
}

// ============================================================================
// SECTION: Public Builders
// ============================================================================

/// Returns the version-pinned report page schema for `policy`.
#[must_use]
pub fn report_page_schema(policy: UnknownFieldPolicy) -> Value {
    SchemaBuilder::new(policy).document(&schema_id(policy))
}

/// Returns the permissive schema published under the `latest` alias.
#[must_use]
pub fn latest_report_page_schema() -> Value {
    SchemaBuilder::new(UnknownFieldPolicy::Permissive).document(LATEST_SCHEMA_ID)
}

// ============================================================================
// SECTION: Schema Builder
// ============================================================================

/// Assembles schema fragments for one unknown-field policy.
struct SchemaBuilder {
    /// Policy applied to every object schema.
    policy: UnknownFieldPolicy,
}

impl SchemaBuilder {
    /// Creates a builder for `policy`.
    const fn new(policy: UnknownFieldPolicy) -> Self {
        Self {
            policy,
        }
    }

    /// Builds the full document schema.
    fn document(&self, id: &str) -> Value {
        let mut root = self.object(
            json!({
                "title": ref_to("nonEmptyString"),
                "description": { "type": "string" },
                "meta": ref_to("meta"),
                "rows": {
                    "type": "array",
                    "minItems": 1,
                    "items": ref_to("row")
                },
                "datasources": {
                    "type": "object",
                    "propertyNames": { "pattern": SLUG_PATTERN },
                    "additionalProperties": ref_to("datasource")
                },
                "parameters": {
                    "type": "array",
                    "items": ref_to("parameter")
                },
                "theme": ref_to("theme")
            }),
            &["title", "meta", "rows"],
        );
        let mut header = Map::new();
        header.insert("$schema".to_string(), json!(SCHEMA_DIALECT));
        header.insert("$id".to_string(), json!(id));
        header.insert("title".to_string(), json!("Report Page"));
        header.insert(
            "description".to_string(),
            json!(format!(
                "Report page contract v{CURRENT_SCHEMA_VERSION} ({} unknown fields).",
                self.policy
            )),
        );
        if let Value::Object(body) = &mut root {
            header.append(body);
        }
        header.insert("$defs".to_string(), Value::Object(self.defs()));
        Value::Object(header)
    }

    /// Builds the `$defs` table.
    fn defs(&self) -> Map<String, Value> {
        let mut defs = Map::new();
        defs.insert("nonEmptyString".to_string(), json!({ "type": "string", "minLength": 1 }));
        defs.insert(
            "hexColor".to_string(),
            json!({ "type": "string", "pattern": HEX_COLOR_PATTERN }),
        );
        defs.insert("slug".to_string(), json!({ "type": "string", "pattern": SLUG_PATTERN }));
        defs.insert(
            "identifier".to_string(),
            json!({ "type": "string", "pattern": IDENTIFIER_PATTERN }),
        );
        defs.insert("email".to_string(), json!({ "type": "string", "pattern": EMAIL_PATTERN }));
        defs.insert(
            "timestamp".to_string(),
            json!({ "type": "string", "format": "date-time", "pattern": TIMESTAMP_PATTERN }),
        );
        defs.insert(
            "schemaVersion".to_string(),
            json!({ "type": "string", "pattern": schema_version_pattern() }),
        );
        defs.insert(
            "scalar".to_string(),
            json!({ "type": ["string", "number", "boolean"] }),
        );
        defs.insert(
            "paramValue".to_string(),
            json!({
                "anyOf": [
                    ref_to("scalar"),
                    { "type": "null" },
                    { "type": "array", "items": ref_to("scalar") }
                ]
            }),
        );
        defs.insert("valueFormat".to_string(), enum_of(ValueFormat::ALL.iter().map(|f| f.as_str())));
        defs.insert("meta".to_string(), self.meta());
        defs.insert("author".to_string(), self.author());
        defs.insert("datasource".to_string(), self.datasource());
        defs.insert("parameter".to_string(), self.parameter());
        defs.insert("theme".to_string(), self.theme());
        defs.insert("query".to_string(), self.query());
        defs.insert("verify".to_string(), self.verify());
        defs.insert("rowCount".to_string(), self.row_count());
        defs.insert("columnRule".to_string(), self.column_rule());
        defs.insert("valueRule".to_string(), self.value_rule());
        defs.insert("threshold".to_string(), self.threshold());
        defs.insert("tileOptions".to_string(), self.tile_options());
        defs.insert("tableColumn".to_string(), self.table_column());
        defs.insert("sortSpec".to_string(), self.sort_spec());
        defs.insert("tableOptions".to_string(), self.table_options());
        defs.insert("annotationOptions".to_string(), self.annotation_options());
        defs.insert("barChartOptions".to_string(), self.bar_chart_options());
        defs.insert("pieChartOptions".to_string(), self.pie_chart_options());
        for kind in VisualKind::ALL {
            defs.insert(visual_def_name(*kind), self.visual(*kind));
        }
        for row_type in RowType::ALL {
            defs.insert(row_def_name(*row_type), self.row(*row_type));
        }
        defs.insert(
            "row".to_string(),
            json!({
                "oneOf": RowType::ALL.iter().map(|row_type| ref_to(&row_def_name(*row_type))).collect::<Vec<_>>()
            }),
        );
        defs
    }

    /// Builds an object schema honoring the unknown-field policy.
    fn object(&self, properties: Value, required: &[&str]) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), properties);
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        if self.policy.is_strict() {
            schema.insert("additionalProperties".to_string(), json!(false));
        }
        Value::Object(schema)
    }

    // ------------------------------------------------------------------------
    // Page-level definitions
    // ------------------------------------------------------------------------

    /// `meta` block.
    fn meta(&self) -> Value {
        self.object(
            json!({
                "schema_version": ref_to("schemaVersion"),
                "last_updated": ref_to("timestamp"),
                "updated_by": ref_to("author")
            }),
            &["schema_version", "last_updated", "updated_by"],
        )
    }

    /// Author identity.
    fn author(&self) -> Value {
        self.object(
            json!({
                "id": ref_to("nonEmptyString"),
                "name": ref_to("nonEmptyString"),
                "email": ref_to("email")
            }),
            &["id", "name"],
        )
    }

    /// Datasource declaration.
    fn datasource(&self) -> Value {
        self.object(
            json!({
                "kind": enum_of(DatasourceKind::ALL.iter().map(|kind| kind.as_str())),
                "connection_ref": ref_to("nonEmptyString"),
                "description": { "type": "string" }
            }),
            &["kind", "connection_ref"],
        )
    }

    /// Page parameter with type-conditional default and allowed values.
    fn parameter(&self) -> Value {
        let mut schema = self.object(
            json!({
                "name": ref_to("identifier"),
                "type": enum_of(ParameterType::ALL.iter().map(|kind| kind.as_str())),
                "label": { "type": "string" },
                "required": { "type": "boolean", "default": false },
                "default": ref_to("scalar"),
                "allowed_values": {
                    "type": "array",
                    "minItems": 1,
                    "items": ref_to("scalar")
                }
            }),
            &["name", "type"],
        );
        let branches: Vec<Value> = ParameterType::ALL
            .iter()
            .map(|kind| {
                let value = parameter_value_schema(*kind);
                json!({
                    "if": {
                        "properties": { "type": { "const": kind.as_str() } },
                        "required": ["type"]
                    },
                    "then": {
                        "properties": {
                            "default": value,
                            "allowed_values": { "items": value }
                        }
                    }
                })
            })
            .collect();
        if let Value::Object(map) = &mut schema {
            map.insert("allOf".to_string(), Value::Array(branches));
        }
        schema
    }

    /// Page theme.
    fn theme(&self) -> Value {
        self.object(
            json!({
                "primary_color": ref_to("hexColor"),
                "background_color": ref_to("hexColor"),
                "text_color": ref_to("hexColor"),
                "accent_color": {
                    "$ref": "#/$defs/hexColor",
                    "deprecated": true,
                    "description": "Deprecated since 1.1.0; use primary_color."
                },
                "palette": { "type": "array", "items": ref_to("hexColor") },
                "font_family": { "type": "string" },
                "density": {
                    "type": "string",
                    "enum": ["compact", "comfortable"],
                    "default": "comfortable"
                }
            }),
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // Query and verify definitions
    // ------------------------------------------------------------------------

    /// Embedded query.
    fn query(&self) -> Value {
        self.object(
            json!({
                "sql": ref_to("nonEmptyString"),
                "params": {
                    "type": "object",
                    "propertyNames": { "pattern": IDENTIFIER_PATTERN },
                    "additionalProperties": ref_to("paramValue")
                },
                "datasource": ref_to("slug"),
                "timeout_ms": { "type": "integer", "minimum": 1, "maximum": MAX_TIMEOUT_MS },
                "max_rows": { "type": "integer", "minimum": 1, "maximum": MAX_RESULT_ROWS },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "deprecated": true,
                    "description": "Deprecated since 1.1.0; use max_rows."
                }
            }),
            &["sql"],
        )
    }

    /// Verify block.
    fn verify(&self) -> Value {
        self.object(
            json!({
                "row_count": ref_to("rowCount"),
                "columns": { "type": "array", "items": ref_to("columnRule") },
                "values": { "type": "array", "items": ref_to("valueRule") }
            }),
            &[],
        )
    }

    /// Row count rule: at least one bound, `eq` excludes `min` and `max`.
    fn row_count(&self) -> Value {
        let count = json!({ "type": "integer", "minimum": 0 });
        let mut schema = self.object(json!({ "eq": count, "min": count, "max": count }), &[]);
        if let Value::Object(map) = &mut schema {
            map.insert(
                "anyOf".to_string(),
                json!([{ "required": ["eq"] }, { "required": ["min"] }, { "required": ["max"] }]),
            );
            map.insert(
                "dependentSchemas".to_string(),
                json!({
                    "eq": { "not": { "anyOf": [{ "required": ["min"] }, { "required": ["max"] }] } }
                }),
            );
        }
        schema
    }

    /// Expected result column.
    fn column_rule(&self) -> Value {
        self.object(
            json!({
                "name": ref_to("nonEmptyString"),
                "type": enum_of(ColumnType::ALL.iter().map(|kind| kind.as_str())),
                "nullable": { "type": "boolean" },
                "required": { "type": "boolean", "default": true }
            }),
            &["name"],
        )
    }

    /// Per-column value assertion with at least one assertion.
    fn value_rule(&self) -> Value {
        let mut schema = self.object(
            json!({
                "column": ref_to("nonEmptyString"),
                "min": { "type": "number" },
                "max": { "type": "number" },
                "regex": ref_to("nonEmptyString"),
                "allowed": { "type": "array", "minItems": 1, "items": ref_to("scalar") },
                "unique": { "type": "boolean" }
            }),
            &["column"],
        );
        if let Value::Object(map) = &mut schema {
            map.insert(
                "anyOf".to_string(),
                json!([
                    { "required": ["min"] },
                    { "required": ["max"] },
                    { "required": ["regex"] },
                    { "required": ["allowed"] },
                    { "required": ["unique"] }
                ]),
            );
        }
        schema
    }

    // ------------------------------------------------------------------------
    // Option bundles
    // ------------------------------------------------------------------------

    /// Tile threshold.
    fn threshold(&self) -> Value {
        self.object(
            json!({ "value": { "type": "number" }, "color": ref_to("hexColor") }),
            &["value", "color"],
        )
    }

    /// Tile options.
    fn tile_options(&self) -> Value {
        self.object(
            json!({
                "value_field": ref_to("nonEmptyString"),
                "format": ref_to("valueFormat"),
                "prefix": { "type": "string" },
                "suffix": { "type": "string" },
                "decimals": { "type": "integer", "minimum": 0, "maximum": 10 },
                "color": ref_to("hexColor"),
                "thresholds": { "type": "array", "items": ref_to("threshold") }
            }),
            &[],
        )
    }

    /// Table column declaration.
    fn table_column(&self) -> Value {
        self.object(
            json!({
                "field": ref_to("nonEmptyString"),
                "label": { "type": "string" },
                "format": ref_to("valueFormat"),
                "align": { "type": "string", "enum": ["left", "center", "right"] },
                "width": { "type": "integer", "minimum": 1 }
            }),
            &["field"],
        )
    }

    /// Initial sort.
    fn sort_spec(&self) -> Value {
        self.object(
            json!({
                "field": ref_to("nonEmptyString"),
                "direction": { "type": "string", "enum": ["asc", "desc"] }
            }),
            &["field", "direction"],
        )
    }

    /// Table options.
    fn table_options(&self) -> Value {
        self.object(
            json!({
                "columns": { "type": "array", "items": ref_to("tableColumn") },
                "page_size": { "type": "integer", "minimum": 1, "maximum": 1000 },
                "sortable": { "type": "boolean", "default": true },
                "striped": { "type": "boolean", "default": false },
                "default_sort": ref_to("sortSpec")
            }),
            &[],
        )
    }

    /// Annotation options.
    fn annotation_options(&self) -> Value {
        self.object(
            json!({
                "text": ref_to("nonEmptyString"),
                "format": { "type": "string", "enum": ["markdown", "plain"], "default": "markdown" },
                "severity": {
                    "type": "string",
                    "enum": ["info", "warning", "critical"],
                    "default": "info"
                },
                "color": ref_to("hexColor")
            }),
            &["text"],
        )
    }

    /// Bar chart options.
    fn bar_chart_options(&self) -> Value {
        let mut properties = chart_common_properties();
        properties.insert(
            "orientation".to_string(),
            json!({ "type": "string", "enum": ["vertical", "horizontal"], "default": "vertical" }),
        );
        properties.insert("stacked".to_string(), json!({ "type": "boolean", "default": false }));
        self.object(Value::Object(properties), &["category_field", "value_field"])
    }

    /// Pie chart options.
    fn pie_chart_options(&self) -> Value {
        let mut properties = chart_common_properties();
        properties.insert("donut".to_string(), json!({ "type": "boolean", "default": false }));
        properties.insert("show_labels".to_string(), json!({ "type": "boolean", "default": true }));
        self.object(Value::Object(properties), &["category_field", "value_field"])
    }

    // ------------------------------------------------------------------------
    // Visuals
    // ------------------------------------------------------------------------

    /// Visual of one kind; foreign option bundles are always rejected.
    fn visual(&self, kind: VisualKind) -> Value {
        let mut properties = Map::new();
        properties.insert("kind".to_string(), json!({ "const": kind.as_str() }));
        properties.insert("id".to_string(), ref_to("slug"));
        properties.insert("title".to_string(), json!({ "type": "string" }));
        properties.insert("description".to_string(), json!({ "type": "string" }));
        properties.insert("query".to_string(), ref_to("query"));
        properties.insert("verify".to_string(), ref_to("verify"));
        for key in OPTION_BUNDLE_KEYS {
            properties.insert((*key).to_string(), Value::Bool(false));
        }
        properties.insert(kind.options_key().to_string(), ref_to(options_def_name(kind)));
        let mut required = vec!["kind"];
        if kind.options_required() {
            required.push(kind.options_key());
        }
        self.object(Value::Object(properties), &required)
    }

    /// Row of one type with its arity and visual-kind whitelist.
    fn row(&self, row_type: RowType) -> Value {
        let arity = row_type.arity();
        let allowed = row_type.allowed_kinds();
        let items = if let [only] = allowed {
            ref_to(&visual_def_name(*only))
        } else {
            json!({
                "oneOf": allowed.iter().map(|kind| ref_to(&visual_def_name(*kind))).collect::<Vec<_>>()
            })
        };
        self.object(
            json!({
                "type": { "const": row_type.as_str() },
                "id": ref_to("slug"),
                "title": { "type": "string" },
                "visuals": {
                    "type": "array",
                    "minItems": arity.start(),
                    "maxItems": arity.end(),
                    "items": items
                }
            }),
            &["type", "visuals"],
        )
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns a local `$ref` to a definition.
fn ref_to(name: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{name}") })
}

/// Returns a string enumeration schema.
fn enum_of<'a>(labels: impl Iterator<Item = &'a str>) -> Value {
    json!({ "type": "string", "enum": labels.collect::<Vec<_>>() })
}

/// Returns the value schema a parameter of `kind` accepts.
fn parameter_value_schema(kind: ParameterType) -> Value {
    match kind {
        ParameterType::String => json!({ "type": "string" }),
        ParameterType::Integer => json!({ "type": "integer" }),
        ParameterType::Number => json!({ "type": "number" }),
        ParameterType::Boolean => json!({ "type": "boolean" }),
        ParameterType::Date => json!({ "type": "string", "pattern": DATE_PATTERN }),
        ParameterType::Datetime => ref_to("timestamp"),
    }
}

/// Properties shared by bar and pie chart options.
fn chart_common_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("category_field".to_string(), ref_to("nonEmptyString"));
    properties.insert("value_field".to_string(), ref_to("nonEmptyString"));
    properties.insert("series_field".to_string(), ref_to("nonEmptyString"));
    properties.insert("show_legend".to_string(), json!({ "type": "boolean", "default": true }));
    properties.insert("colors".to_string(), json!({ "type": "array", "items": ref_to("hexColor") }));
    properties
}

/// `$defs` name of the visual schema for `kind`.
fn visual_def_name(kind: VisualKind) -> String {
    format!("{}Visual", kind.as_str())
}

/// `$defs` name of the row schema for `row_type`.
fn row_def_name(row_type: RowType) -> String {
    format!("{}Row", row_type.as_str())
}

/// `$defs` name of the option bundle schema for `kind`.
const fn options_def_name(kind: VisualKind) -> &'static str {
    match kind {
        VisualKind::Tile => "tileOptions",
        VisualKind::Table => "tableOptions",
        VisualKind::Annotation => "annotationOptions",
        VisualKind::Bar => "barChartOptions",
        VisualKind::Pie => "pieChartOptions",
    }
}
