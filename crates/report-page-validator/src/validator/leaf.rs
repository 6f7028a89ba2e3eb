// crates/report-page-validator/src/validator/leaf.rs
// ============================================================================
// Module: Leaf Checks
// Description: Type, range, enumeration, and pattern checks on JSON leaves.
// Purpose: Keep violation kinds and messages uniform across the walk.
// Dependencies: report-page-core, serde_json
// ============================================================================

use report_page_core::integral_value;
use report_page_core::is_hex_color;
use report_page_core::is_slug;
use serde_json::Map;
use serde_json::Value;

use super::Pass;
use crate::pointer::JsonPointer;
use crate::report::ViolationKind;

/// Returns member `key` with its pointer when present.
pub(super) fn field<'v>(
    object: &'v Map<String, Value>,
    key: &str,
    path: &JsonPointer,
) -> Option<(&'v Value, JsonPointer)> {
    object.get(key).map(|value| (value, path.key(key)))
}

/// Returns true for strings, numbers, and booleans.
pub(super) const fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

impl Pass<'_> {
    /// Returns member `key`, recording `missing_field` when absent.
    pub(super) fn required<'v>(
        &mut self,
        object: &'v Map<String, Value>,
        key: &str,
        path: &JsonPointer,
    ) -> Option<(&'v Value, JsonPointer)> {
        let found = field(object, key, path);
        if found.is_none() {
            self.violation(&path.key(key), ViolationKind::MissingField, "is required");
        }
        found
    }

    /// Expects an object.
    pub(super) fn object<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
    ) -> Option<&'v Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.violation(path, ViolationKind::WrongType, "must be an object");
        }
        object
    }

    /// Expects an array.
    pub(super) fn array<'v>(&mut self, value: &'v Value, path: &JsonPointer) -> Option<&'v [Value]> {
        let array = value.as_array().map(Vec::as_slice);
        if array.is_none() {
            self.violation(path, ViolationKind::WrongType, "must be an array");
        }
        array
    }

    /// Expects a non-empty array.
    pub(super) fn non_empty_array<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
    ) -> Option<&'v [Value]> {
        let array = self.array(value, path)?;
        if array.is_empty() {
            self.violation(path, ViolationKind::OutOfRange, "must not be empty");
        }
        Some(array)
    }

    /// Expects a string.
    pub(super) fn string<'v>(&mut self, value: &'v Value, path: &JsonPointer) -> Option<&'v str> {
        let text = value.as_str();
        if text.is_none() {
            self.violation(path, ViolationKind::WrongType, "must be a string");
        }
        text
    }

    /// Expects a non-empty string; returns it only when non-empty.
    pub(super) fn non_empty<'v>(&mut self, value: &'v Value, path: &JsonPointer) -> Option<&'v str> {
        let text = self.string(value, path)?;
        if text.is_empty() {
            self.violation(path, ViolationKind::OutOfRange, "must not be empty");
            return None;
        }
        Some(text)
    }

    /// Expects a boolean.
    pub(super) fn boolean(&mut self, value: &Value, path: &JsonPointer) {
        if !value.is_boolean() {
            self.violation(path, ViolationKind::WrongType, "must be a boolean");
        }
    }

    /// Expects a number.
    pub(super) fn number(&mut self, value: &Value, path: &JsonPointer) -> Option<f64> {
        let number = value.as_f64();
        if number.is_none() {
            self.violation(path, ViolationKind::WrongType, "must be a number");
        }
        number
    }

    /// Expects an integer in `min..=max`; returns it only when in range.
    pub(super) fn integer(
        &mut self,
        value: &Value,
        path: &JsonPointer,
        min: u64,
        max: Option<u64>,
    ) -> Option<u64> {
        let Some(number) = integral_value(value) else {
            self.violation(path, ViolationKind::WrongType, "must be an integer");
            return None;
        };
        let in_range = number >= i128::from(min) && max.is_none_or(|max| number <= i128::from(max));
        let accepted = if in_range { u64::try_from(number).ok() } else { None };
        if accepted.is_none() {
            let message = match max {
                Some(max) => format!("must be between {min} and {max}"),
                None => format!("must be at least {min}"),
            };
            self.violation(path, ViolationKind::OutOfRange, message);
        }
        accepted
    }

    /// Expects one of `labels`; returns the label when it matches.
    pub(super) fn label<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
        labels: &[&str],
    ) -> Option<&'v str> {
        let text = self.string(value, path)?;
        if labels.contains(&text) {
            return Some(text);
        }
        self.violation(
            path,
            ViolationKind::EnumMismatch,
            format!("must be one of {}", labels.join(", ")),
        );
        None
    }

    /// Expects a string accepted by `matches`; returns it when it matches.
    pub(super) fn pattern<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
        matches: fn(&str) -> bool,
        expected: &str,
    ) -> Option<&'v str> {
        let text = self.string(value, path)?;
        if matches(text) {
            return Some(text);
        }
        self.violation(path, ViolationKind::PatternMismatch, format!("must be {expected}"));
        None
    }

    /// Expects a `#rgb` or `#rrggbb` color.
    pub(super) fn hex_color(&mut self, value: &Value, path: &JsonPointer) {
        self.pattern(value, path, is_hex_color, "a hex color (#rgb or #rrggbb)");
    }

    /// Expects an array of hex colors.
    pub(super) fn hex_colors(&mut self, value: &Value, path: &JsonPointer) {
        if let Some(colors) = self.array(value, path) {
            for (index, color) in colors.iter().enumerate() {
                self.hex_color(color, &path.index(index));
            }
        }
    }

    /// Expects a slug.
    pub(super) fn slug<'v>(&mut self, value: &'v Value, path: &JsonPointer) -> Option<&'v str> {
        self.pattern(value, path, is_slug, "a slug ([A-Za-z0-9][A-Za-z0-9_-]*)")
    }

    /// Expects a string, number, or boolean.
    pub(super) fn scalar(&mut self, value: &Value, path: &JsonPointer) -> bool {
        let scalar = is_scalar(value);
        if !scalar {
            self.violation(path, ViolationKind::WrongType, "must be a string, number, or boolean");
        }
        scalar
    }
}
