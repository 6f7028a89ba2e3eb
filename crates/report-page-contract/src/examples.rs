// crates/report-page-contract/src/examples.rs
// ============================================================================
// Module: Contract Examples
// Description: Canonical report page documents for docs and tests.
// Purpose: Deterministic samples that the validator and schema both accept.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Two canonical documents ship with the contract: the smallest useful page
//! and a page that exercises every row type, visual kind, and option bundle.
//! Both validate cleanly (no violations and no warnings) against the current
//! contract version.

use serde_json::Value;
use serde_json::json;

/// Returns the minimal example: one tiles row with a single verified KPI.
#[must_use]
pub fn my_report_example() -> Value {
    json!({
        "title": "My Report",
        "meta": {
            "schema_version": "1.1.0",
            "last_updated": "2024-06-01T09:00:00Z",
            "updated_by": { "id": "analyst-1", "name": "Report Author" }
        },
        "rows": [
            {
                "type": "tiles",
                "visuals": [
                    {
                        "kind": "tile",
                        "title": "Total orders",
                        "query": { "sql": "SELECT COUNT(*) AS total FROM orders" },
                        "verify": { "row_count": { "eq": 1 } }
                    }
                ]
            }
        ]
    })
}

/// Returns a page exercising every row type, visual kind, and option bundle.
#[must_use]
pub fn full_report_example() -> Value {
    json!({
        "title": "Regional Sales Review",
        "description": "Weekly revenue, order volume, and channel mix per region.",
        "meta": {
            "schema_version": "1.1.0",
            "last_updated": "2024-06-03T14:25:00+02:00",
            "updated_by": {
                "id": "analyst-7",
                "name": "Sales Analytics",
                "email": "sales-analytics@example.com"
            }
        },
        "datasources": {
            "warehouse": {
                "kind": "postgres",
                "connection_ref": "secrets/warehouse-readonly",
                "description": "Read replica of the sales warehouse."
            },
            "events": { "kind": "bigquery", "connection_ref": "secrets/events" }
        },
        "parameters": [
            {
                "name": "region",
                "type": "string",
                "label": "Region",
                "default": "emea",
                "allowed_values": ["emea", "amer", "apac"]
            },
            {
                "name": "start_date",
                "type": "date",
                "label": "From",
                "required": true,
                "default": "2024-01-01"
            }
        ],
        "theme": {
            "primary_color": "#1f6feb",
            "background_color": "#ffffff",
            "text_color": "#222",
            "palette": ["#1f6feb", "#f78166", "#3fb950"],
            "font_family": "Inter",
            "density": "compact"
        },
        "rows": [
            {
                "type": "tiles",
                "id": "headline",
                "title": "Headline numbers",
                "visuals": [
                    {
                        "kind": "tile",
                        "id": "revenue",
                        "title": "Revenue",
                        "query": {
                            "sql": "SELECT SUM(amount) AS revenue FROM sales WHERE region = :region AND sold_on >= :start_date",
                            "datasource": "warehouse",
                            "timeout_ms": 15000
                        },
                        "verify": {
                            "row_count": { "eq": 1 },
                            "columns": [{ "name": "revenue", "type": "number", "nullable": false }]
                        },
                        "tile_options": {
                            "value_field": "revenue",
                            "format": "currency",
                            "prefix": "$",
                            "decimals": 0,
                            "thresholds": [
                                { "value": 0, "color": "#cf222e" },
                                { "value": 100000, "color": "#1a7f37" }
                            ]
                        }
                    },
                    {
                        "kind": "tile",
                        "id": "orders",
                        "title": "Orders",
                        "query": {
                            "sql": "SELECT COUNT(*) AS orders FROM sales WHERE region = :region",
                            "datasource": "warehouse"
                        },
                        "tile_options": { "value_field": "orders", "format": "number" }
                    },
                    {
                        "kind": "tile",
                        "id": "conversion",
                        "title": "Conversion",
                        "query": {
                            "sql": "SELECT AVG(converted) AS rate FROM sessions WHERE region = :region",
                            "datasource": "events"
                        },
                        "tile_options": {
                            "value_field": "rate",
                            "format": "percent",
                            "decimals": 1,
                            "suffix": " of sessions",
                            "color": "#8250df"
                        }
                    }
                ]
            },
            {
                "type": "table",
                "id": "customers",
                "visuals": [
                    {
                        "kind": "table",
                        "id": "top-customers",
                        "title": "Top customers",
                        "description": "Largest customers by revenue in the selected region.",
                        "query": {
                            "sql": "SELECT customer, SUM(amount) AS revenue FROM sales WHERE region = :region GROUP BY customer ORDER BY revenue DESC LIMIT :top_n",
                            "params": { "top_n": 25 },
                            "datasource": "warehouse",
                            "max_rows": 100
                        },
                        "verify": {
                            "row_count": { "min": 0, "max": 100 },
                            "columns": [
                                { "name": "customer", "type": "string", "required": true },
                                { "name": "revenue", "type": "number" }
                            ],
                            "values": [
                                { "column": "revenue", "min": 0 },
                                { "column": "customer", "unique": true }
                            ]
                        },
                        "table_options": {
                            "columns": [
                                { "field": "customer", "label": "Customer", "align": "left" },
                                {
                                    "field": "revenue",
                                    "label": "Revenue",
                                    "format": "currency",
                                    "align": "right",
                                    "width": 140
                                }
                            ],
                            "page_size": 25,
                            "sortable": true,
                            "striped": true,
                            "default_sort": { "field": "revenue", "direction": "desc" }
                        }
                    }
                ]
            },
            {
                "type": "charts",
                "id": "mix",
                "title": "Mix",
                "visuals": [
                    {
                        "kind": "bar",
                        "id": "revenue-by-segment",
                        "title": "Revenue by segment",
                        "query": {
                            "sql": "SELECT segment, channel, SUM(amount) AS revenue FROM sales WHERE region = :region GROUP BY segment, channel",
                            "datasource": "warehouse"
                        },
                        "chart_options": {
                            "category_field": "segment",
                            "value_field": "revenue",
                            "series_field": "channel",
                            "orientation": "horizontal",
                            "stacked": true,
                            "colors": ["#1f6feb", "#f78166"]
                        }
                    },
                    {
                        "kind": "pie",
                        "id": "orders-by-channel",
                        "title": "Orders by channel",
                        "query": {
                            "sql": "SELECT channel, COUNT(*) AS orders FROM sales GROUP BY channel",
                            "datasource": "warehouse"
                        },
                        "verify": {
                            "values": [{ "column": "channel", "allowed": ["web", "store", "partner"] }]
                        },
                        "chart_options": {
                            "category_field": "channel",
                            "value_field": "orders",
                            "show_legend": false,
                            "donut": true,
                            "show_labels": true
                        }
                    }
                ]
            },
            {
                "type": "annotation",
                "visuals": [
                    {
                        "kind": "annotation",
                        "annotation_options": {
                            "text": "Figures for the **current week** are provisional until Monday close.",
                            "format": "markdown",
                            "severity": "warning",
                            "color": "#9a6700"
                        }
                    }
                ]
            }
        ]
    })
}
