// crates/report-page-validator/src/pointer.rs
// ============================================================================
// Module: JSON Pointer
// Description: RFC 6901 pointer construction for violation paths.
// Purpose: Address any location in a document unambiguously.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Pointers are built by appending reference tokens while the validator
//! descends. Tokens are escaped (`~` as `~0`, `/` as `~1`) so keys holding
//! either character remain addressable.

use std::fmt;

/// JSON Pointer to a document location; the empty pointer is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonPointer(String);

impl JsonPointer {
    /// Returns the root pointer.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns a pointer to member `key` of the addressed object.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        let mut pointer = String::with_capacity(self.0.len() + key.len() + 1);
        pointer.push_str(&self.0);
        pointer.push('/');
        for ch in key.chars() {
            match ch {
                '~' => pointer.push_str("~0"),
                '/' => pointer.push_str("~1"),
                other => pointer.push(other),
            }
        }
        Self(pointer)
    }

    /// Returns a pointer to element `index` of the addressed array.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{index}", self.0))
    }

    /// Returns the pointer text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<JsonPointer> for String {
    fn from(pointer: JsonPointer) -> Self {
        pointer.0
    }
}
