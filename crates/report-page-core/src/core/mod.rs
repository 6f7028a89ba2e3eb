// crates/report-page-core/src/core/mod.rs
// ============================================================================
// Module: Report Page Core Types
// Description: Canonical report page document structures.
// Purpose: Provide stable, serializable types for report page documents.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Core types define the report page tree, the leaf value types (colors,
//! timestamps, identifiers), and the versioning rules for the contract.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod color;
pub mod deprecation;
pub mod hashing;
pub mod identifiers;
pub mod numbers;
pub mod page;
pub mod policy;
pub mod query;
pub mod version;
pub mod visual;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use color::HexColor;
pub use color::HexColorError;
pub use color::is_hex_color;
pub use deprecation::DEPRECATED_FIELDS;
pub use deprecation::DeprecatedField;
pub use deprecation::FieldScope;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::ParameterName;
pub use identifiers::Slug;
pub use identifiers::SlugError;
pub use identifiers::is_email;
pub use identifiers::is_identifier;
pub use identifiers::is_slug;
pub use numbers::integral_number;
pub use numbers::integral_value;
pub use numbers::normalize_integral_numbers;
pub use page::Author;
pub use page::Datasource;
pub use page::DatasourceKind;
pub use page::Density;
pub use page::Meta;
pub use page::Parameter;
pub use page::ParameterType;
pub use page::ReportPage;
pub use page::Theme;
pub use page::Timestamp;
pub use page::TimestampError;
pub use page::is_calendar_date;
pub use page::is_timestamp;
pub use policy::UnknownFieldPolicy;
pub use query::ColumnRule;
pub use query::ColumnType;
pub use query::MAX_RESULT_ROWS;
pub use query::MAX_TIMEOUT_MS;
pub use query::Query;
pub use query::RowCountRule;
pub use query::ValueRule;
pub use query::Verify;
pub use version::CURRENT_SCHEMA_VERSION;
pub use version::MAX_COMPONENT_DIGITS;
pub use version::SchemaVersion;
pub use version::VERSION_COMPONENT_PATTERN;
pub use version::VersionCompatibility;
pub use version::VersionError;
pub use visual::Alignment;
pub use visual::AnnotationOptions;
pub use visual::AnnotationVisual;
pub use visual::BarChartOptions;
pub use visual::BarVisual;
pub use visual::ChartCommonOptions;
pub use visual::OPTION_BUNDLE_KEYS;
pub use visual::Orientation;
pub use visual::PieChartOptions;
pub use visual::PieVisual;
pub use visual::Row;
pub use visual::RowBody;
pub use visual::RowType;
pub use visual::Severity;
pub use visual::SortDirection;
pub use visual::SortSpec;
pub use visual::TableColumn;
pub use visual::TableOptions;
pub use visual::TableVisual;
pub use visual::TextFormat;
pub use visual::Threshold;
pub use visual::TileOptions;
pub use visual::TileVisual;
pub use visual::ValueFormat;
pub use visual::Visual;
pub use visual::VisualKind;
