// crates/report-page-contract/src/typescript.rs
// ============================================================================
// Module: TypeScript Declarations
// Description: Renders `report-page.d.ts` for front-end consumers.
// Purpose: Mirror the report page schema as TypeScript interfaces.
// Dependencies: report-page-core
// ============================================================================

//! ## Overview
//! Emits interfaces and discriminated unions that mirror the published
//! schema. Enumerations are rendered from the same label tables the native
//! validator uses so the declarations cannot drift from the model.

// ============================================================================
// SECTION: Imports
// ============================================================================

use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::ColumnType;
use report_page_core::DatasourceKind;
use report_page_core::ParameterType;
use report_page_core::RowType;
use report_page_core::ValueFormat;
use report_page_core::VisualKind;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the TypeScript declaration file for the current contract version.
#[must_use]
pub fn render_typescript_declarations() -> String {
    let mut out = String::new();
    out.push_str("// This file is @generated by report-page-contract. DO NOT EDIT.\n");
    out.push_str("// Contract version: ");
    out.push_str(&CURRENT_SCHEMA_VERSION.to_string());
    out.push_str("\n\n");

    out.push_str("export type JsonScalar = string | number | boolean;\n\n");
    render_union(&mut out, "RowType", RowType::ALL.iter().map(|value| value.as_str()));
    render_union(&mut out, "VisualKind", VisualKind::ALL.iter().map(|value| value.as_str()));
    render_union(&mut out, "ValueFormat", ValueFormat::ALL.iter().map(|value| value.as_str()));
    render_union(
        &mut out,
        "DatasourceKind",
        DatasourceKind::ALL.iter().map(|value| value.as_str()),
    );
    render_union(
        &mut out,
        "ParameterType",
        ParameterType::ALL.iter().map(|value| value.as_str()),
    );
    render_union(&mut out, "ColumnType", ColumnType::ALL.iter().map(|value| value.as_str()));
    render_union(&mut out, "Alignment", ["left", "center", "right"]);
    render_union(&mut out, "SortDirection", ["asc", "desc"]);
    render_union(&mut out, "TextFormat", ["markdown", "plain"]);
    render_union(&mut out, "Severity", ["info", "warning", "critical"]);
    render_union(&mut out, "Orientation", ["vertical", "horizontal"]);
    render_union(&mut out, "Density", ["compact", "comfortable"]);

    out.push_str("/** Hex color: `#rgb` or `#rrggbb`. */\n");
    out.push_str("export type HexColor = string;\n\n");

    render_interface(
        &mut out,
        "ReportPage",
        "A single dashboard page.",
        &[
            ("title", "string", true),
            ("description", "string", false),
            ("meta", "Meta", true),
            ("rows", "Row[]", true),
            ("datasources", "Record<string, Datasource>", false),
            ("parameters", "Parameter[]", false),
            ("theme", "Theme", false),
        ],
    );
    render_interface(
        &mut out,
        "Meta",
        "Document metadata; `schema_version` is the compatibility signal.",
        &[
            ("schema_version", "string", true),
            ("last_updated", "string", true),
            ("updated_by", "Author", true),
        ],
    );
    render_interface(
        &mut out,
        "Author",
        "Who last edited the page.",
        &[("id", "string", true), ("name", "string", true), ("email", "string", false)],
    );
    render_interface(
        &mut out,
        "Datasource",
        "Named connection referenced by queries.",
        &[
            ("kind", "DatasourceKind", true),
            ("connection_ref", "string", true),
            ("description", "string", false),
        ],
    );
    render_interface(
        &mut out,
        "Parameter",
        "Page-level input bound into queries as `:name`.",
        &[
            ("name", "string", true),
            ("type", "ParameterType", true),
            ("label", "string", false),
            ("required", "boolean", false),
            ("default", "JsonScalar", false),
            ("allowed_values", "JsonScalar[]", false),
        ],
    );
    out.push_str("export interface Theme {\n");
    push_field(&mut out, "primary_color", "HexColor", false);
    push_field(&mut out, "background_color", "HexColor", false);
    push_field(&mut out, "text_color", "HexColor", false);
    out.push_str("  /** @deprecated since 1.1.0; use `primary_color`. */\n");
    push_field(&mut out, "accent_color", "HexColor", false);
    push_field(&mut out, "palette", "HexColor[]", false);
    push_field(&mut out, "font_family", "string", false);
    push_field(&mut out, "density", "Density", false);
    out.push_str("}\n\n");

    render_rows(&mut out);
    render_visuals(&mut out);
    render_query(&mut out);
    render_options(&mut out);
    out
}

/// Renders the row discriminated union.
fn render_rows(out: &mut String) {
    let mut members = Vec::new();
    for row_type in RowType::ALL {
        let name = format!("{}Row", pascal_case(row_type.as_str()));
        let arity = row_type.arity();
        let visual_union = row_type
            .allowed_kinds()
            .iter()
            .map(|kind| visual_interface_name(*kind))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str("/** Row of type `");
        out.push_str(row_type.as_str());
        out.push_str("` holding ");
        if arity.start() == arity.end() {
            out.push_str(&format!("exactly {}", arity.start()));
        } else {
            out.push_str(&format!("{} to {}", arity.start(), arity.end()));
        }
        out.push_str(" visuals. */\n");
        out.push_str("export interface ");
        out.push_str(&name);
        out.push_str(" {\n");
        push_field(out, "type", &format!("\"{}\"", row_type.as_str()), true);
        push_field(out, "id", "string", false);
        push_field(out, "title", "string", false);
        push_field(out, "visuals", &format!("Array<{visual_union}>"), true);
        out.push_str("}\n\n");
        members.push(name);
    }
    out.push_str("export type Row = ");
    out.push_str(&members.join(" | "));
    out.push_str(";\n\n");
}

/// Renders the visual discriminated union.
fn render_visuals(out: &mut String) {
    let mut members = Vec::new();
    for kind in VisualKind::ALL {
        let name = visual_interface_name(*kind);
        out.push_str("export interface ");
        out.push_str(&name);
        out.push_str(" {\n");
        push_field(out, "kind", &format!("\"{}\"", kind.as_str()), true);
        push_field(out, "id", "string", false);
        push_field(out, "title", "string", false);
        push_field(out, "description", "string", false);
        push_field(out, "query", "Query", false);
        push_field(out, "verify", "Verify", false);
        push_field(out, kind.options_key(), options_type(*kind), kind.options_required());
        out.push_str("}\n\n");
        members.push(name);
    }
    out.push_str("export type Visual = ");
    out.push_str(&members.join(" | "));
    out.push_str(";\n\n");
}

/// Renders query and verify interfaces.
fn render_query(out: &mut String) {
    out.push_str("export interface Query {\n");
    push_field(out, "sql", "string", true);
    push_field(out, "params", "Record<string, JsonScalar | JsonScalar[] | null>", false);
    push_field(out, "datasource", "string", false);
    push_field(out, "timeout_ms", "number", false);
    push_field(out, "max_rows", "number", false);
    out.push_str("  /** @deprecated since 1.1.0; use `max_rows`. */\n");
    push_field(out, "limit", "number", false);
    out.push_str("}\n\n");
    render_interface(
        out,
        "Verify",
        "Assertions checked against query results.",
        &[
            ("row_count", "RowCountRule", false),
            ("columns", "ColumnRule[]", false),
            ("values", "ValueRule[]", false),
        ],
    );
    render_interface(
        out,
        "RowCountRule",
        "`eq` excludes `min` and `max`; at least one bound is present.",
        &[("eq", "number", false), ("min", "number", false), ("max", "number", false)],
    );
    render_interface(
        out,
        "ColumnRule",
        "Expected result column.",
        &[
            ("name", "string", true),
            ("type", "ColumnType", false),
            ("nullable", "boolean", false),
            ("required", "boolean", false),
        ],
    );
    render_interface(
        out,
        "ValueRule",
        "Per-column value assertion; at least one assertion besides `column`.",
        &[
            ("column", "string", true),
            ("min", "number", false),
            ("max", "number", false),
            ("regex", "string", false),
            ("allowed", "JsonScalar[]", false),
            ("unique", "boolean", false),
        ],
    );
}

/// Renders the option bundle interfaces.
fn render_options(out: &mut String) {
    render_interface(
        out,
        "TileOptions",
        "KPI tile presentation.",
        &[
            ("value_field", "string", false),
            ("format", "ValueFormat", false),
            ("prefix", "string", false),
            ("suffix", "string", false),
            ("decimals", "number", false),
            ("color", "HexColor", false),
            ("thresholds", "Threshold[]", false),
        ],
    );
    render_interface(
        out,
        "Threshold",
        "Color applied at or above `value`.",
        &[("value", "number", true), ("color", "HexColor", true)],
    );
    render_interface(
        out,
        "TableOptions",
        "Table presentation.",
        &[
            ("columns", "TableColumn[]", false),
            ("page_size", "number", false),
            ("sortable", "boolean", false),
            ("striped", "boolean", false),
            ("default_sort", "SortSpec", false),
        ],
    );
    render_interface(
        out,
        "TableColumn",
        "Displayed table column.",
        &[
            ("field", "string", true),
            ("label", "string", false),
            ("format", "ValueFormat", false),
            ("align", "Alignment", false),
            ("width", "number", false),
        ],
    );
    render_interface(
        out,
        "SortSpec",
        "Initial sort; `field` names a declared column.",
        &[("field", "string", true), ("direction", "SortDirection", true)],
    );
    render_interface(
        out,
        "AnnotationOptions",
        "Annotation content.",
        &[
            ("text", "string", true),
            ("format", "TextFormat", false),
            ("severity", "Severity", false),
            ("color", "HexColor", false),
        ],
    );
    let common = [
        ("category_field", "string", true),
        ("value_field", "string", true),
        ("series_field", "string", false),
        ("show_legend", "boolean", false),
        ("colors", "HexColor[]", false),
    ];
    let mut bar = common.to_vec();
    bar.extend([("orientation", "Orientation", false), ("stacked", "boolean", false)]);
    render_interface(out, "BarChartOptions", "Bar chart presentation.", &bar);
    let mut pie = common.to_vec();
    pie.extend([("donut", "boolean", false), ("show_labels", "boolean", false)]);
    render_interface(out, "PieChartOptions", "Pie chart presentation.", &pie);
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders `export type Name = "a" | "b";`.
fn render_union<'a>(out: &mut String, name: &str, labels: impl IntoIterator<Item = &'a str>) {
    let members = labels.into_iter().map(|label| format!("\"{label}\"")).collect::<Vec<_>>();
    out.push_str("export type ");
    out.push_str(name);
    out.push_str(" = ");
    out.push_str(&members.join(" | "));
    out.push_str(";\n\n");
}

/// Renders a documented interface from `(name, type, required)` fields.
fn render_interface(out: &mut String, name: &str, doc: &str, fields: &[(&str, &str, bool)]) {
    out.push_str("/** ");
    out.push_str(doc);
    out.push_str(" */\n");
    out.push_str("export interface ");
    out.push_str(name);
    out.push_str(" {\n");
    for (field, ty, required) in fields {
        push_field(out, field, ty, *required);
    }
    out.push_str("}\n\n");
}

/// Appends one interface member.
fn push_field(out: &mut String, name: &str, ty: &str, required: bool) {
    out.push_str("  ");
    out.push_str(name);
    if !required {
        out.push('?');
    }
    out.push_str(": ");
    out.push_str(ty);
    out.push_str(";\n");
}

/// Interface name for a visual kind.
fn visual_interface_name(kind: VisualKind) -> String {
    format!("{}Visual", pascal_case(kind.as_str()))
}

/// Option bundle type for a visual kind.
const fn options_type(kind: VisualKind) -> &'static str {
    match kind {
        VisualKind::Tile => "TileOptions",
        VisualKind::Table => "TableOptions",
        VisualKind::Annotation => "AnnotationOptions",
        VisualKind::Bar => "BarChartOptions",
        VisualKind::Pie => "PieChartOptions",
    }
}

/// Converts a snake_case label to PascalCase.
fn pascal_case(label: &str) -> String {
    label
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::render_typescript_declarations;

    #[test]
    fn declarations_cover_every_union_member() {
        let out = render_typescript_declarations();
        assert!(out.contains("export type Row = TilesRow | TableRow | AnnotationRow | ChartsRow;"));
        assert!(out.contains(
            "export type Visual = TileVisual | TableVisual | AnnotationVisual | BarVisual | PieVisual;"
        ));
        assert!(out.contains("visuals: Array<BarVisual | PieVisual>;"));
        assert!(out.contains("annotation_options: AnnotationOptions;"));
        assert!(out.contains("tile_options?: TileOptions;"));
    }

    #[test]
    fn declarations_are_deterministic() {
        assert_eq!(render_typescript_declarations(), render_typescript_declarations());
    }
}
