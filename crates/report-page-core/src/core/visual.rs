// crates/report-page-core/src/core/visual.rs
// ============================================================================
// Module: Report Page Rows and Visuals
// Description: Tagged unions for rows and visuals plus their option bundles.
// Purpose: Encode the row-type/visual-kind grammar of a report page.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Rows discriminate on `type` and visuals discriminate on `kind`. Each row
//! type fixes an arity range and a whitelist of visual kinds; each visual
//! kind owns exactly one option bundle key.
//!
//! ## Invariants
//! - `tiles` and `charts` rows hold 1 to 3 visuals; `table` and `annotation`
//!   rows hold exactly 1.
//! - Only `annotation` visuals require their option bundle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::RangeInclusive;

use serde::Deserialize;
use serde::Serialize;

use crate::core::color::HexColor;
use crate::core::identifiers::Slug;
use crate::core::query::Query;
use crate::core::query::Verify;

// ============================================================================
// SECTION: Rows
// ============================================================================

/// Row of a report page, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row {
    /// Up to three KPI tiles.
    Tiles(RowBody),
    /// A single table.
    Table(RowBody),
    /// A single annotation.
    Annotation(RowBody),
    /// Up to three charts.
    Charts(RowBody),
}

/// Fields shared by every row type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowBody {
    /// Optional row identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Slug>,
    /// Optional row heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Visuals laid out left to right.
    pub visuals: Vec<Visual>,
}

impl Row {
    /// Returns the row type discriminator.
    #[must_use]
    pub const fn row_type(&self) -> RowType {
        match self {
            Self::Tiles(_) => RowType::Tiles,
            Self::Table(_) => RowType::Table,
            Self::Annotation(_) => RowType::Annotation,
            Self::Charts(_) => RowType::Charts,
        }
    }

    /// Returns the shared row fields.
    #[must_use]
    pub const fn body(&self) -> &RowBody {
        match self {
            Self::Tiles(body) | Self::Table(body) | Self::Annotation(body) | Self::Charts(body) => {
                body
            }
        }
    }

    /// Returns the row visuals.
    #[must_use]
    pub fn visuals(&self) -> &[Visual] {
        &self.body().visuals
    }
}

/// Row type discriminator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowType {
    /// `tiles`
    Tiles,
    /// `table`
    Table,
    /// `annotation`
    Annotation,
    /// `charts`
    Charts,
}

impl RowType {
    /// Every row type, in schema order.
    pub const ALL: &'static [Self] = &[Self::Tiles, Self::Table, Self::Annotation, Self::Charts];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tiles => "tiles",
            Self::Table => "table",
            Self::Annotation => "annotation",
            Self::Charts => "charts",
        }
    }

    /// Parses a wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|row_type| row_type.as_str() == label)
    }

    /// Visual kinds permitted inside rows of this type.
    #[must_use]
    pub const fn allowed_kinds(self) -> &'static [VisualKind] {
        match self {
            Self::Tiles => &[VisualKind::Tile],
            Self::Table => &[VisualKind::Table],
            Self::Annotation => &[VisualKind::Annotation],
            Self::Charts => &[VisualKind::Bar, VisualKind::Pie],
        }
    }

    /// Permitted number of visuals.
    #[must_use]
    pub const fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Tiles | Self::Charts => 1 ..= 3,
            Self::Table | Self::Annotation => 1 ..= 1,
        }
    }

    /// Returns true when `kind` may appear in this row type.
    #[must_use]
    pub fn allows(self, kind: VisualKind) -> bool {
        self.allowed_kinds().contains(&kind)
    }
}

// ============================================================================
// SECTION: Visuals
// ============================================================================

/// Visual, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visual {
    /// KPI tile.
    Tile(TileVisual),
    /// Data table.
    Table(TableVisual),
    /// Text annotation.
    Annotation(AnnotationVisual),
    /// Bar chart.
    Bar(BarVisual),
    /// Pie chart.
    Pie(PieVisual),
}

impl Visual {
    /// Returns the visual kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> VisualKind {
        match self {
            Self::Tile(_) => VisualKind::Tile,
            Self::Table(_) => VisualKind::Table,
            Self::Annotation(_) => VisualKind::Annotation,
            Self::Bar(_) => VisualKind::Bar,
            Self::Pie(_) => VisualKind::Pie,
        }
    }

    /// Returns the optional visual id.
    #[must_use]
    pub const fn id(&self) -> Option<&Slug> {
        match self {
            Self::Tile(visual) => visual.id.as_ref(),
            Self::Table(visual) => visual.id.as_ref(),
            Self::Annotation(visual) => visual.id.as_ref(),
            Self::Bar(visual) => visual.id.as_ref(),
            Self::Pie(visual) => visual.id.as_ref(),
        }
    }

    /// Returns the embedded query, if any.
    #[must_use]
    pub const fn query(&self) -> Option<&Query> {
        match self {
            Self::Tile(visual) => visual.query.as_ref(),
            Self::Table(visual) => visual.query.as_ref(),
            Self::Annotation(visual) => visual.query.as_ref(),
            Self::Bar(visual) => visual.query.as_ref(),
            Self::Pie(visual) => visual.query.as_ref(),
        }
    }

    /// Returns the verify block, if any.
    #[must_use]
    pub const fn verify(&self) -> Option<&Verify> {
        match self {
            Self::Tile(visual) => visual.verify.as_ref(),
            Self::Table(visual) => visual.verify.as_ref(),
            Self::Annotation(visual) => visual.verify.as_ref(),
            Self::Bar(visual) => visual.verify.as_ref(),
            Self::Pie(visual) => visual.verify.as_ref(),
        }
    }
}

/// Visual kind discriminator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualKind {
    /// `tile`
    Tile,
    /// `table`
    Table,
    /// `annotation`
    Annotation,
    /// `bar`
    Bar,
    /// `pie`
    Pie,
}

/// Every option bundle key a visual may carry.
pub const OPTION_BUNDLE_KEYS: &[&str] =
    &["tile_options", "table_options", "annotation_options", "chart_options"];

impl VisualKind {
    /// Every visual kind, in schema order.
    pub const ALL: &'static [Self] =
        &[Self::Tile, Self::Table, Self::Annotation, Self::Bar, Self::Pie];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Table => "table",
            Self::Annotation => "annotation",
            Self::Bar => "bar",
            Self::Pie => "pie",
        }
    }

    /// Parses a wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == label)
    }

    /// Returns the option bundle key owned by this kind.
    #[must_use]
    pub const fn options_key(self) -> &'static str {
        match self {
            Self::Tile => "tile_options",
            Self::Table => "table_options",
            Self::Annotation => "annotation_options",
            Self::Bar | Self::Pie => "chart_options",
        }
    }

    /// Returns true when the option bundle must be present.
    #[must_use]
    pub const fn options_required(self) -> bool {
        matches!(self, Self::Annotation)
    }
}

/// KPI tile visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileVisual {
    /// Optional visual id, unique across the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Slug>,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Post-query assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<Verify>,
    /// Tile presentation options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_options: Option<TileOptions>,
}

/// Table visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableVisual {
    /// Optional visual id, unique across the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Slug>,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Post-query assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<Verify>,
    /// Table presentation options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_options: Option<TableOptions>,
}

/// Annotation visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationVisual {
    /// Optional visual id, unique across the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Slug>,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Post-query assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<Verify>,
    /// Annotation content.
    pub annotation_options: AnnotationOptions,
}

/// Bar chart visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarVisual {
    /// Optional visual id, unique across the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Slug>,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Post-query assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<Verify>,
    /// Bar chart options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_options: Option<BarChartOptions>,
}

/// Pie chart visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieVisual {
    /// Optional visual id, unique across the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Slug>,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Post-query assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<Verify>,
    /// Pie chart options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_options: Option<PieChartOptions>,
}

// ============================================================================
// SECTION: Tile Options
// ============================================================================

/// Display format for numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Plain number.
    Number,
    /// Currency amount.
    Currency,
    /// Percentage.
    Percent,
    /// Elapsed time.
    Duration,
    /// Verbatim text.
    Text,
}

impl ValueFormat {
    /// Every value format, in schema order.
    pub const ALL: &'static [Self] =
        &[Self::Number, Self::Currency, Self::Percent, Self::Duration, Self::Text];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percent => "percent",
            Self::Duration => "duration",
            Self::Text => "text",
        }
    }
}

/// KPI tile options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileOptions {
    /// Result column holding the KPI value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
    /// Value display format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
    /// Text placed before the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Text placed after the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Fraction digits, 0 to 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    /// Tile accent color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    /// Value thresholds that recolor the tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<Threshold>>,
}

impl TileOptions {
    /// Returns the display format (defaults to number).
    #[must_use]
    pub fn format(&self) -> ValueFormat {
        self.format.unwrap_or(ValueFormat::Number)
    }
}

/// Color applied once the tile value reaches `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Lower bound that activates the color.
    pub value: f64,
    /// Color to apply.
    pub color: HexColor,
}

// ============================================================================
// SECTION: Table Options
// ============================================================================

/// Column cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Table column declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Result column name.
    pub field: String,
    /// Header label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Cell display format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
    /// Cell alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    /// Width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
}

/// Initial table sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column to sort by.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Table options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableOptions {
    /// Column declarations; all result columns are shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<TableColumn>>,
    /// Rows per page, 1 to 1000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Whether users may sort columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    /// Whether alternating rows are shaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub striped: Option<bool>,
    /// Initial sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,
}

impl TableOptions {
    /// Returns whether columns are sortable (defaults to true).
    #[must_use]
    pub fn sortable(&self) -> bool {
        self.sortable.unwrap_or(true)
    }

    /// Returns whether rows are striped (defaults to false).
    #[must_use]
    pub fn striped(&self) -> bool {
        self.striped.unwrap_or(false)
    }
}

// ============================================================================
// SECTION: Annotation Options
// ============================================================================

/// Annotation text markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    /// `CommonMark` markdown.
    Markdown,
    /// Plain text.
    Plain,
}

/// Annotation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational.
    Info,
    /// Needs attention.
    Warning,
    /// Urgent.
    Critical,
}

/// Annotation content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationOptions {
    /// Annotation body.
    pub text: String,
    /// Body markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TextFormat>,
    /// Severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Highlight color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
}

impl AnnotationOptions {
    /// Returns the body markup (defaults to markdown).
    #[must_use]
    pub fn format(&self) -> TextFormat {
        self.format.unwrap_or(TextFormat::Markdown)
    }

    /// Returns the severity (defaults to info).
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Info)
    }
}

// ============================================================================
// SECTION: Chart Options
// ============================================================================

/// Options shared by bar and pie charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartCommonOptions {
    /// Column providing categories.
    pub category_field: String,
    /// Column providing values.
    pub value_field: String,
    /// Column splitting values into series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_field: Option<String>,
    /// Whether the legend is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    /// Series colors in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<HexColor>>,
}

impl ChartCommonOptions {
    /// Returns whether the legend is shown (defaults to true).
    #[must_use]
    pub fn show_legend(&self) -> bool {
        self.show_legend.unwrap_or(true)
    }
}

/// Bar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Bars grow upward.
    Vertical,
    /// Bars grow rightward.
    Horizontal,
}

/// Bar chart options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChartOptions {
    /// Shared chart options.
    #[serde(flatten)]
    pub common: ChartCommonOptions,
    /// Bar orientation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Whether series are stacked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
}

impl BarChartOptions {
    /// Returns the orientation (defaults to vertical).
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or(Orientation::Vertical)
    }

    /// Returns whether series are stacked (defaults to false).
    #[must_use]
    pub fn stacked(&self) -> bool {
        self.stacked.unwrap_or(false)
    }
}

/// Pie chart options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChartOptions {
    /// Shared chart options.
    #[serde(flatten)]
    pub common: ChartCommonOptions,
    /// Whether the pie has a hole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donut: Option<bool>,
    /// Whether slice labels are drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
}

impl PieChartOptions {
    /// Returns whether the pie is a donut (defaults to false).
    #[must_use]
    pub fn donut(&self) -> bool {
        self.donut.unwrap_or(false)
    }

    /// Returns whether slice labels are drawn (defaults to true).
    #[must_use]
    pub fn show_labels(&self) -> bool {
        self.show_labels.unwrap_or(true)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::RowType;
    use super::VisualKind;

    #[test]
    fn row_grammar_table() {
        assert_eq!(RowType::Tiles.arity(), 1 ..= 3);
        assert_eq!(RowType::Table.arity(), 1 ..= 1);
        assert!(RowType::Charts.allows(VisualKind::Pie));
        assert!(!RowType::Charts.allows(VisualKind::Tile));
        assert!(!RowType::Tiles.allows(VisualKind::Bar));
    }

    #[test]
    fn labels_parse_back() {
        for row_type in RowType::ALL {
            assert_eq!(RowType::parse(row_type.as_str()), Some(*row_type));
        }
        for kind in VisualKind::ALL {
            assert_eq!(VisualKind::parse(kind.as_str()), Some(*kind));
        }
        assert_eq!(RowType::parse("grid"), None);
    }

    #[test]
    fn chart_kinds_share_one_bundle() {
        assert_eq!(VisualKind::Bar.options_key(), VisualKind::Pie.options_key());
        assert!(VisualKind::Annotation.options_required());
        assert!(!VisualKind::Tile.options_required());
    }
}
