// crates/report-page-core/src/core/color.rs
// ============================================================================
// Module: Report Page Colors
// Description: Hex color leaf type used by themes, tiles, and charts.
// Purpose: Enforce the 3- or 6-digit `#rgb` / `#rrggbb` pattern.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`HexColor`] wraps a validated color literal. The original spelling is
//! preserved so that documents round-trip byte-for-byte through the model.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON Schema pattern matching a valid hex color.
pub const HEX_COLOR_PATTERN: &str = "^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Hex color literal such as `#abc` or `#aabbcc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

/// Error raised when a string is not a valid hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0}")]
pub struct HexColorError(pub String);

impl HexColor {
    /// Parses a hex color literal.
    ///
    /// # Errors
    ///
    /// Returns [`HexColorError`] when the value does not match `#rgb` or `#rrggbb`.
    pub fn parse(value: &str) -> Result<Self, HexColorError> {
        if is_hex_color(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(HexColorError(value.to_string()))
        }
    }

    /// Returns the color literal as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the color expanded to lowercase six-digit form.
    #[must_use]
    pub fn to_long_form(&self) -> String {
        let digits = &self.0[1 ..];
        if digits.len() == 3 {
            let mut out = String::with_capacity(7);
            out.push('#');
            for ch in digits.chars() {
                let lower = ch.to_ascii_lowercase();
                out.push(lower);
                out.push(lower);
            }
            out
        } else {
            self.0.to_ascii_lowercase()
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_hex_color(&value) { Ok(Self(value)) } else { Err(HexColorError(value)) }
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Returns true when `value` is `#` followed by exactly 3 or 6 hex digits.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::HexColor;
    use super::is_hex_color;

    #[test]
    fn accepts_short_and_long_forms() {
        assert!(is_hex_color("#abc"));
        assert!(is_hex_color("#aabbcc"));
        assert!(is_hex_color("#A1B2C3"));
    }

    #[test]
    fn rejects_malformed_colors() {
        for value in ["#ZZZ", "abc", "#abcd", "#", "", "#aabbccdd", "# abc", "#ab"] {
            assert!(!is_hex_color(value), "{value} should be rejected");
        }
    }

    #[test]
    fn long_form_expands_short_colors() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(HexColor::parse("#AbC")?.to_long_form(), "#aabbcc");
        assert_eq!(HexColor::parse("#A0B0C0")?.to_long_form(), "#a0b0c0");
        Ok(())
    }

    #[test]
    fn serde_rejects_invalid_color() {
        let parsed: Result<HexColor, _> = serde_json::from_str("\"#ZZZ\"");
        assert!(parsed.is_err());
    }
}
