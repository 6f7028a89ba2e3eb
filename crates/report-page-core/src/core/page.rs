// crates/report-page-core/src/core/page.rs
// ============================================================================
// Module: Report Page Document
// Description: Top-level report page, meta block, and page-level settings.
// Purpose: Canonical typed representation of a report page document.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! A [`ReportPage`] is immutable configuration consumed by report runners.
//! It is produced from raw JSON only after the document validator accepts
//! it; deserializing directly is lenient and ignores unknown fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use time::Date;
use time::Month;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::color::HexColor;
use crate::core::identifiers::ParameterName;
use crate::core::identifiers::Slug;
use crate::core::numbers::integral_value;
use crate::core::numbers::normalize_integral_numbers;
use crate::core::version::SchemaVersion;
use crate::core::visual::Row;
use crate::core::visual::Visual;

// ============================================================================
// SECTION: Report Page
// ============================================================================

/// Report page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    /// Page title.
    pub title: String,
    /// Optional page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Versioning and authorship metadata.
    pub meta: Meta,
    /// Ordered rows rendered top to bottom.
    pub rows: Vec<Row>,
    /// Named datasources referenced by visual queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasources: Option<BTreeMap<Slug, Datasource>>,
    /// Page parameters available to every query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Page theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl ReportPage {
    /// Deserializes a page from a JSON value.
    ///
    /// Integral floats such as `1000.0` are read as integers.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the value does not match the model.
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        normalize_integral_numbers(&mut value);
        serde_json::from_value(value)
    }

    /// Serializes the page into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when serialization fails.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Iterates every visual on the page in row order.
    pub fn visuals(&self) -> impl Iterator<Item = &Visual> {
        self.rows.iter().flat_map(|row| row.visuals().iter())
    }

    /// Returns the declared schema version.
    #[must_use]
    pub const fn schema_version(&self) -> SchemaVersion {
        self.meta.schema_version
    }
}

// ============================================================================
// SECTION: Meta
// ============================================================================

/// Versioning and authorship block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Contract version the document was written against.
    pub schema_version: SchemaVersion,
    /// Last modification time.
    pub last_updated: Timestamp,
    /// Last author.
    pub updated_by: Author,
}

/// Author identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable author identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// RFC 3339 timestamp preserved in its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

/// Error raised when a timestamp is not RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid RFC 3339 timestamp: {0}")]
pub struct TimestampError(pub String);

impl Timestamp {
    /// Parses an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when the value is not RFC 3339.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        if is_timestamp(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(TimestampError(value.to_string()))
        }
    }

    /// Returns the timestamp as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parsed instant.
    #[must_use]
    pub fn instant(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.0, &Rfc3339).ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_timestamp(&value) { Ok(Self(value)) } else { Err(TimestampError(value)) }
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

/// Returns true when `value` parses as an RFC 3339 timestamp.
#[must_use]
pub fn is_timestamp(value: &str) -> bool {
    OffsetDateTime::parse(value, &Rfc3339).is_ok()
}

/// Returns true when `value` is a calendar date in `YYYY-MM-DD` form.
#[must_use]
pub fn is_calendar_date(value: &str) -> bool {
    let mut parts = value.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return false;
    }
    let (Ok(year), Ok(month), Ok(day)) = (year.parse::<i32>(), month.parse::<u8>(), day.parse::<u8>())
    else {
        return false;
    };
    let Ok(month) = Month::try_from(month) else {
        return false;
    };
    Date::from_calendar_date(year, month, day).is_ok()
}

// ============================================================================
// SECTION: Datasources
// ============================================================================

/// Named datasource declaration. Connection details live with the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datasource {
    /// Datasource engine.
    pub kind: DatasourceKind,
    /// Opaque reference resolved by the runner (never a secret).
    pub connection_ref: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Supported datasource engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasourceKind {
    /// `PostgreSQL`.
    Postgres,
    /// `MySQL`.
    Mysql,
    /// `SQLite`.
    Sqlite,
    /// Microsoft SQL Server.
    Mssql,
    /// Google `BigQuery`.
    Bigquery,
    /// Snowflake.
    Snowflake,
    /// `DuckDB`.
    Duckdb,
}

impl DatasourceKind {
    /// Every datasource kind, in schema order.
    pub const ALL: &'static [Self] = &[
        Self::Postgres,
        Self::Mysql,
        Self::Sqlite,
        Self::Mssql,
        Self::Bigquery,
        Self::Snowflake,
        Self::Duckdb,
    ];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Mssql => "mssql",
            Self::Bigquery => "bigquery",
            Self::Snowflake => "snowflake",
            Self::Duckdb => "duckdb",
        }
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Page parameter bound into queries as `:name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: ParameterName,
    /// Value type.
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the runner must obtain a value before executing queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Default value, typed per `parameter_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Closed set of permitted values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
}

impl Parameter {
    /// Returns whether a value is required (defaults to false).
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Parameter value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Free text.
    String,
    /// Whole number.
    Integer,
    /// Any JSON number.
    Number,
    /// Boolean flag.
    Boolean,
    /// Calendar date `YYYY-MM-DD`.
    Date,
    /// RFC 3339 timestamp.
    Datetime,
}

impl ParameterType {
    /// Every parameter type, in schema order.
    pub const ALL: &'static [Self] =
        &[Self::String, Self::Integer, Self::Number, Self::Boolean, Self::Date, Self::Datetime];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }

    /// Returns true when `value` is a well-typed value of this parameter type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => integral_value(value).is_some(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Date => value.as_str().is_some_and(is_calendar_date),
            Self::Datetime => value.as_str().is_some_and(is_timestamp),
        }
    }
}

// ============================================================================
// SECTION: Theme
// ============================================================================

/// Page theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Primary brand color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<HexColor>,
    /// Page background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<HexColor>,
    /// Body text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<HexColor>,
    /// Deprecated since 1.1.0; use `primary_color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<HexColor>,
    /// Series palette for charts without explicit colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<HexColor>>,
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Layout density.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<Density>,
}

impl Theme {
    /// Returns the effective primary color, falling back to the deprecated accent color.
    #[must_use]
    pub fn effective_primary_color(&self) -> Option<&HexColor> {
        self.primary_color.as_ref().or(self.accent_color.as_ref())
    }

    /// Returns the layout density (defaults to comfortable).
    #[must_use]
    pub fn density(&self) -> Density {
        self.density.unwrap_or(Density::Comfortable)
    }
}

/// Layout density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    /// Tight spacing.
    Compact,
    /// Default spacing.
    Comfortable,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ParameterType;
    use super::is_calendar_date;
    use super::is_timestamp;

    #[test]
    fn timestamps_follow_rfc3339() {
        assert!(is_timestamp("2024-05-01T12:30:00Z"));
        assert!(is_timestamp("2024-05-01T12:30:00.250+02:00"));
        assert!(!is_timestamp("2024-05-01"));
        assert!(!is_timestamp("yesterday"));
    }

    #[test]
    fn calendar_dates_are_checked() {
        assert!(is_calendar_date("2024-02-29"));
        assert!(!is_calendar_date("2023-02-29"));
        assert!(!is_calendar_date("2024-2-01"));
        assert!(!is_calendar_date("2024-13-01"));
    }

    #[test]
    fn parameter_types_match_values() {
        assert!(ParameterType::Integer.matches(&json!(3)));
        assert!(ParameterType::Integer.matches(&json!(3.0)));
        assert!(!ParameterType::Integer.matches(&json!(3.5)));
        assert!(ParameterType::Number.matches(&json!(3.5)));
        assert!(ParameterType::Date.matches(&json!("2024-01-31")));
        assert!(!ParameterType::Date.matches(&json!("2024-01-31T00:00:00Z")));
        assert!(ParameterType::Datetime.matches(&json!("2024-01-31T00:00:00Z")));
        assert!(!ParameterType::Boolean.matches(&json!("true")));
    }
}
