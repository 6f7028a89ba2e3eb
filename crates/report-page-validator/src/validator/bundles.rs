// crates/report-page-validator/src/validator/bundles.rs
// ============================================================================
// Module: Option Bundle Checks
// Description: Validation of per-kind visual option bundles.
// Purpose: Check tile, table, annotation, and chart options.
// Dependencies: report-page-core, serde_json
// ============================================================================

use std::collections::BTreeSet;

use report_page_core::ValueFormat;
use report_page_core::VisualKind;
use serde_json::Map;
use serde_json::Value;

use super::Pass;
use super::leaf::field;
use crate::pointer::JsonPointer;
use crate::report::ViolationKind;

/// Members of `tile_options`.
const TILE_KEYS: &[&str] =
    &["value_field", "format", "prefix", "suffix", "decimals", "color", "thresholds"];
/// Members of a tile threshold.
const THRESHOLD_KEYS: &[&str] = &["value", "color"];
/// Members of `table_options`.
const TABLE_KEYS: &[&str] = &["columns", "page_size", "sortable", "striped", "default_sort"];
/// Members of a table column.
const TABLE_COLUMN_KEYS: &[&str] = &["field", "label", "format", "align", "width"];
/// Members of `table_options.default_sort`.
const SORT_KEYS: &[&str] = &["field", "direction"];
/// Members of `annotation_options`.
const ANNOTATION_KEYS: &[&str] = &["text", "format", "severity", "color"];
/// Members of `chart_options` for bar charts.
const BAR_KEYS: &[&str] = &[
    "category_field",
    "value_field",
    "series_field",
    "show_legend",
    "colors",
    "orientation",
    "stacked",
];
/// Members of `chart_options` for pie charts.
const PIE_KEYS: &[&str] = &[
    "category_field",
    "value_field",
    "series_field",
    "show_legend",
    "colors",
    "donut",
    "show_labels",
];
/// Largest table page size.
const MAX_PAGE_SIZE: u64 = 1000;
/// Largest number of tile decimals.
const MAX_DECIMALS: u64 = 10;

/// Returns the labels of every value format.
fn value_formats() -> Vec<&'static str> {
    ValueFormat::ALL.iter().map(|format| format.as_str()).collect()
}

impl Pass<'_> {
    /// Validates the option bundle owned by `kind`.
    pub(super) fn bundle(&mut self, kind: VisualKind, value: &Value, path: &JsonPointer) {
        let Some(options) = self.object(value, path) else {
            return;
        };
        match kind {
            VisualKind::Tile => self.tile_options(options, path),
            VisualKind::Table => self.table_options(options, path),
            VisualKind::Annotation => self.annotation_options(options, path),
            VisualKind::Bar => self.chart_options(options, path, BAR_KEYS),
            VisualKind::Pie => self.chart_options(options, path, PIE_KEYS),
        }
    }

    /// Validates `tile_options`.
    fn tile_options(&mut self, options: &Map<String, Value>, path: &JsonPointer) {
        self.check_keys(options, path, TILE_KEYS);
        if let Some((value_field, value_field_path)) = field(options, "value_field", path) {
            self.non_empty(value_field, &value_field_path);
        }
        if let Some((format, format_path)) = field(options, "format", path) {
            self.label(format, &format_path, &value_formats());
        }
        for key in ["prefix", "suffix"] {
            if let Some((text, text_path)) = field(options, key, path) {
                self.string(text, &text_path);
            }
        }
        if let Some((decimals, decimals_path)) = field(options, "decimals", path) {
            self.integer(decimals, &decimals_path, 0, Some(MAX_DECIMALS));
        }
        if let Some((color, color_path)) = field(options, "color", path) {
            self.hex_color(color, &color_path);
        }
        if let Some((thresholds, thresholds_path)) = field(options, "thresholds", path)
            && let Some(thresholds) = self.array(thresholds, &thresholds_path)
        {
            for (index, threshold) in thresholds.iter().enumerate() {
                let threshold_path = thresholds_path.index(index);
                let Some(threshold) = self.object(threshold, &threshold_path) else {
                    continue;
                };
                self.check_keys(threshold, &threshold_path, THRESHOLD_KEYS);
                if let Some((value, value_path)) = self.required(threshold, "value", &threshold_path)
                {
                    self.number(value, &value_path);
                }
                if let Some((color, color_path)) = self.required(threshold, "color", &threshold_path)
                {
                    self.hex_color(color, &color_path);
                }
            }
        }
    }

    /// Validates `table_options`.
    fn table_options(&mut self, options: &Map<String, Value>, path: &JsonPointer) {
        self.check_keys(options, path, TABLE_KEYS);
        let columns = field(options, "columns", path)
            .and_then(|(columns, columns_path)| self.table_columns(columns, &columns_path));
        if let Some((page_size, page_size_path)) = field(options, "page_size", path) {
            self.integer(page_size, &page_size_path, 1, Some(MAX_PAGE_SIZE));
        }
        for key in ["sortable", "striped"] {
            if let Some((flag, flag_path)) = field(options, key, path) {
                self.boolean(flag, &flag_path);
            }
        }
        let Some((sort, sort_path)) = field(options, "default_sort", path) else {
            return;
        };
        let Some(sort) = self.object(sort, &sort_path) else {
            return;
        };
        self.check_keys(sort, &sort_path, SORT_KEYS);
        if let Some((direction, direction_path)) = self.required(sort, "direction", &sort_path) {
            self.label(direction, &direction_path, &["asc", "desc"]);
        }
        if let Some((sort_field, sort_field_path)) = self.required(sort, "field", &sort_path)
            && let Some(sort_field) = self.non_empty(sort_field, &sort_field_path)
            && let Some(columns) = columns
            && !columns.contains(sort_field)
        {
            self.violation(
                &sort_field_path,
                ViolationKind::Inconsistent,
                format!("sort field `{sort_field}` is not one of the declared columns"),
            );
        }
    }

    /// Validates table columns; returns the declared fields when well formed.
    fn table_columns<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
    ) -> Option<BTreeSet<&'v str>> {
        let columns = self.array(value, path)?;
        let mut fields = BTreeSet::new();
        for (index, column) in columns.iter().enumerate() {
            let column_path = path.index(index);
            let Some(column) = self.object(column, &column_path) else {
                continue;
            };
            self.check_keys(column, &column_path, TABLE_COLUMN_KEYS);
            if let Some((column_field, field_path)) = self.required(column, "field", &column_path)
                && let Some(column_field) = self.non_empty(column_field, &field_path)
            {
                fields.insert(column_field);
            }
            if let Some((label, label_path)) = field(column, "label", &column_path) {
                self.string(label, &label_path);
            }
            if let Some((format, format_path)) = field(column, "format", &column_path) {
                self.label(format, &format_path, &value_formats());
            }
            if let Some((align, align_path)) = field(column, "align", &column_path) {
                self.label(align, &align_path, &["left", "center", "right"]);
            }
            if let Some((width, width_path)) = field(column, "width", &column_path) {
                self.integer(width, &width_path, 1, None);
            }
        }
        Some(fields)
    }

    /// Validates `annotation_options`.
    fn annotation_options(&mut self, options: &Map<String, Value>, path: &JsonPointer) {
        self.check_keys(options, path, ANNOTATION_KEYS);
        if let Some((text, text_path)) = self.required(options, "text", path) {
            self.non_empty(text, &text_path);
        }
        if let Some((format, format_path)) = field(options, "format", path) {
            self.label(format, &format_path, &["markdown", "plain"]);
        }
        if let Some((severity, severity_path)) = field(options, "severity", path) {
            self.label(severity, &severity_path, &["info", "warning", "critical"]);
        }
        if let Some((color, color_path)) = field(options, "color", path) {
            self.hex_color(color, &color_path);
        }
    }

    /// Validates `chart_options` against the members `known` for the kind.
    fn chart_options(&mut self, options: &Map<String, Value>, path: &JsonPointer, known: &[&str]) {
        self.check_keys(options, path, known);
        for key in ["category_field", "value_field"] {
            if let Some((name, name_path)) = self.required(options, key, path) {
                self.non_empty(name, &name_path);
            }
        }
        if let Some((series, series_path)) = field(options, "series_field", path) {
            self.non_empty(series, &series_path);
        }
        if let Some((colors, colors_path)) = field(options, "colors", path) {
            self.hex_colors(colors, &colors_path);
        }
        if let Some((orientation, orientation_path)) = field(options, "orientation", path)
            && known.contains(&"orientation")
        {
            self.label(orientation, &orientation_path, &["vertical", "horizontal"]);
        }
        for key in ["show_legend", "stacked", "donut", "show_labels"] {
            if known.contains(&key)
                && let Some((flag, flag_path)) = field(options, key, path)
            {
                self.boolean(flag, &flag_path);
            }
        }
    }
}
