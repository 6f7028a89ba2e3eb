// crates/report-page-core/src/core/identifiers.rs
// ============================================================================
// Module: Report Page Identifiers
// Description: Validated string identifiers used across report pages.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Two identifier grammars appear in report pages:
//! - slugs (`[A-Za-z0-9][A-Za-z0-9_-]*`) for row ids, visual ids, and
//!   datasource names;
//! - identifiers (`[A-Za-z_][A-Za-z0-9_]*`) for parameter names, which must be
//!   usable as SQL `:name` placeholders.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// JSON Schema pattern for slugs.
pub const SLUG_PATTERN: &str = "^[A-Za-z0-9][A-Za-z0-9_-]*$";
/// JSON Schema pattern for parameter identifiers.
pub const IDENTIFIER_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";
/// JSON Schema pattern for author emails.
pub const EMAIL_PATTERN: &str = "^[^@\\s]+@[^@\\s]+$";

/// Returns true when `value` is a slug.
#[must_use]
pub fn is_slug(value: &str) -> bool {
    let mut bytes = value.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && bytes.all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}

/// Returns true when `value` is a parameter identifier.
#[must_use]
pub fn is_identifier(value: &str) -> bool {
    let mut bytes = value.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == b'_')
        && bytes.all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

/// Returns true when `value` has exactly one `@` with non-empty sides and no whitespace.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(is_email_whitespace)
}

/// Whitespace excluded from emails: Unicode `White_Space` plus U+FEFF, which
/// the ECMA-262 `\s` class used by [`EMAIL_PATTERN`] also matches.
fn is_email_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when an identifier does not match its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Value is not a slug.
    #[error("invalid slug: {0}")]
    Slug(String),
    /// Value is not a parameter identifier.
    #[error("invalid identifier: {0}")]
    Identifier(String),
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Slug used for row ids, visual ids, and datasource names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Creates a slug after validating the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Slug`] when the value is not a slug.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if is_slug(&value) { Ok(Self(value)) } else { Err(SlugError::Slug(value)) }
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Page parameter name usable as a SQL placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParameterName(String);

impl ParameterName {
    /// Creates a parameter name after validating the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Identifier`] when the value is not an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if is_identifier(&value) { Ok(Self(value)) } else { Err(SlugError::Identifier(value)) }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for ParameterName {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParameterName> for String {
    fn from(value: ParameterName) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::is_email;
    use super::is_identifier;
    use super::is_slug;

    #[test]
    fn slug_grammar() {
        assert!(is_slug("revenue-2024"));
        assert!(is_slug("7day_active"));
        assert!(!is_slug(""));
        assert!(!is_slug("-leading"));
        assert!(!is_slug("has space"));
    }

    #[test]
    fn identifier_grammar() {
        assert!(is_identifier("region"));
        assert!(is_identifier("_start_date"));
        assert!(!is_identifier("1region"));
        assert!(!is_identifier("start-date"));
    }

    #[test]
    fn email_grammar() {
        assert!(is_email("ana@example.com"));
        assert!(!is_email("ana.example.com"));
        assert!(!is_email("ana@@example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("ana @example.com"));
        assert!(!is_email("ana\u{feff}@example.com"));
        assert!(!is_email("ana@example\u{3000}com"));
    }
}
