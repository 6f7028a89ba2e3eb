// crates/report-page-core/tests/model_serde.rs
// ============================================================================
// Module: Model Serialization Tests
// Description: Serde behavior of the typed report page model.
// Purpose: Ensure tagged unions, defaults, and leaf types read as documented.
// Dependencies: report-page-core, proptest, serde_json
// ============================================================================

//! Serialization tests for the report page model.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions favor direct unwraps."
)]

use proptest::prelude::*;
use report_page_core::Density;
use report_page_core::HexColor;
use report_page_core::ReportPage;
use report_page_core::RowType;
use report_page_core::SchemaVersion;
use report_page_core::Severity;
use report_page_core::TextFormat;
use report_page_core::Visual;
use report_page_core::VisualKind;
use serde_json::Value;
use serde_json::json;

fn sample_page() -> Value {
    json!({
        "title": "Sales overview",
        "meta": {
            "schema_version": "1.1.0",
            "last_updated": "2024-05-01T08:00:00Z",
            "updated_by": {"id": "u-1", "name": "Ana", "email": "ana@example.com"}
        },
        "datasources": {
            "warehouse": {"kind": "postgres", "connection_ref": "env:WAREHOUSE_URL"}
        },
        "theme": {"accent_color": "#336699"},
        "rows": [
            {
                "type": "tiles",
                "visuals": [{
                    "kind": "tile",
                    "id": "revenue",
                    "query": {"sql": "select sum(amount) as v from sales", "datasource": "warehouse"},
                    "verify": {"row_count": {"eq": 1}},
                    "tile_options": {"value_field": "v", "format": "currency"}
                }]
            },
            {
                "type": "charts",
                "visuals": [{
                    "kind": "bar",
                    "chart_options": {"category_field": "region", "value_field": "total", "stacked": true}
                }, {
                    "kind": "pie",
                    "chart_options": {"category_field": "region", "value_field": "total"}
                }]
            },
            {
                "type": "annotation",
                "visuals": [{"kind": "annotation", "annotation_options": {"text": "Figures are preliminary."}}]
            }
        ]
    })
}

#[test]
fn tagged_unions_deserialize() -> Result<(), serde_json::Error> {
    let page = ReportPage::from_value(sample_page())?;
    let row_types: Vec<RowType> = page.rows.iter().map(report_page_core::Row::row_type).collect();
    assert_eq!(row_types, vec![RowType::Tiles, RowType::Charts, RowType::Annotation]);
    let kinds: Vec<VisualKind> = page.visuals().map(Visual::kind).collect();
    assert_eq!(
        kinds,
        vec![VisualKind::Tile, VisualKind::Bar, VisualKind::Pie, VisualKind::Annotation]
    );
    assert_eq!(page.schema_version(), SchemaVersion::new(1, 1, 0));
    Ok(())
}

#[test]
fn option_defaults_apply() -> Result<(), serde_json::Error> {
    let page = ReportPage::from_value(sample_page())?;
    let visuals: Vec<&Visual> = page.visuals().collect();
    let Visual::Bar(bar) = visuals[1] else { panic!("expected bar visual") };
    let options = bar.chart_options.as_ref().unwrap();
    assert!(options.stacked());
    assert!(options.common.show_legend());
    let Visual::Pie(pie) = visuals[2] else { panic!("expected pie visual") };
    let options = pie.chart_options.as_ref().unwrap();
    assert!(!options.donut());
    assert!(options.show_labels());
    let Visual::Annotation(note) = visuals[3] else { panic!("expected annotation visual") };
    assert_eq!(note.annotation_options.format(), TextFormat::Markdown);
    assert_eq!(note.annotation_options.severity(), Severity::Info);
    let theme = page.theme.as_ref().unwrap();
    assert_eq!(theme.density(), Density::Comfortable);
    assert_eq!(theme.effective_primary_color().map(HexColor::as_str), Some("#336699"));
    Ok(())
}

#[test]
fn serialization_omits_absent_fields() -> Result<(), serde_json::Error> {
    let page = ReportPage::from_value(sample_page())?;
    let value = page.to_value()?;
    assert!(value.get("description").is_none());
    assert!(value.pointer("/rows/0/visuals/0/title").is_none());
    assert_eq!(value.pointer("/rows/0/type"), Some(&json!("tiles")));
    assert_eq!(value.pointer("/rows/1/visuals/0/chart_options/stacked"), Some(&json!(true)));
    assert_eq!(ReportPage::from_value(value)?, page);
    Ok(())
}

#[test]
fn bad_leaf_values_fail_to_deserialize() {
    let mut bad_color = sample_page();
    bad_color["theme"]["accent_color"] = json!("#ZZZ");
    assert!(ReportPage::from_value(bad_color).is_err());

    let mut bad_time = sample_page();
    bad_time["meta"]["last_updated"] = json!("last tuesday");
    assert!(ReportPage::from_value(bad_time).is_err());

    let mut bad_kind = sample_page();
    bad_kind["rows"][0]["visuals"][0]["kind"] = json!("gauge");
    assert!(ReportPage::from_value(bad_kind).is_err());
}

proptest! {
    #[test]
    fn hex_colors_accept_three_or_six_digits(digits in "[0-9a-fA-F]{3}|[0-9a-fA-F]{6}") {
        let color = format!("#{digits}");
        prop_assert!(HexColor::parse(&color).is_ok());
    }

    #[test]
    fn hex_colors_reject_other_lengths(digits in "[0-9a-f]{1,2}|[0-9a-f]{4,5}|[0-9a-f]{7,9}") {
        let color = format!("#{digits}");
        prop_assert!(HexColor::parse(&color).is_err());
    }

    #[test]
    fn schema_versions_round_trip(major in 0_u64 .. 50, minor in 0_u64 .. 50, patch in 0_u64 .. 50) {
        let version = SchemaVersion::new(major, minor, patch);
        prop_assert_eq!(SchemaVersion::parse(&version.to_string()), Ok(version));
    }
}
