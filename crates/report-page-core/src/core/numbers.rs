// crates/report-page-core/src/core/numbers.rs
// ============================================================================
// Module: Report Page Numbers
// Description: Integer reading of JSON numbers.
// Purpose: Count integral floats as integers, as JSON Schema does.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! JSON Schema treats `1000.0` and `-0.0` as integers. `serde_json` keeps
//! them as floats, so integer fields read them through [`integral_value`] and
//! the typed model rewrites them with [`normalize_integral_numbers`] before
//! deserializing.

use serde_json::Number;
use serde_json::Value;

/// Returns the integer `number` denotes, counting integral floats.
///
/// Integral floats beyond the `i128` range saturate at its bounds.
#[must_use]
pub fn integral_number(number: &Number) -> Option<i128> {
    if let Some(unsigned) = number.as_u64() {
        return Some(i128::from(unsigned));
    }
    if let Some(signed) = number.as_i64() {
        return Some(i128::from(signed));
    }
    let float = number.as_f64()?;
    if !float.is_finite() || float.fract() != 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "integral floats saturate at the i128 bounds")]
    let integer = float as i128;
    Some(integer)
}

/// Returns the integer `value` denotes when it is an integral JSON number.
#[must_use]
pub fn integral_value(value: &Value) -> Option<i128> {
    match value {
        Value::Number(number) => integral_number(number),
        _ => None,
    }
}

/// Rewrites integral floats that fit `i64` or `u64` as JSON integers.
pub fn normalize_integral_numbers(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(normalize_integral_numbers),
        Value::Object(members) => members.values_mut().for_each(normalize_integral_numbers),
        Value::Number(number) if number.is_f64() => {
            let integer = integral_number(number);
            if let Some(signed) = integer.and_then(|integer| i64::try_from(integer).ok()) {
                *number = Number::from(signed);
            } else if let Some(unsigned) = integer.and_then(|integer| u64::try_from(integer).ok()) {
                *number = Number::from(unsigned);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::integral_value;
    use super::normalize_integral_numbers;

    #[test]
    fn integral_floats_count_as_integers() {
        assert_eq!(integral_value(&json!(1000)), Some(1000));
        assert_eq!(integral_value(&json!(1000.0)), Some(1000));
        assert_eq!(integral_value(&json!(-0.0)), Some(0));
        assert_eq!(integral_value(&json!(-7)), Some(-7));
        assert_eq!(integral_value(&json!(2.5)), None);
        assert_eq!(integral_value(&json!("3")), None);
        assert_eq!(integral_value(&json!(1e300)), Some(i128::MAX));
    }

    #[test]
    fn normalization_rewrites_only_integral_floats() {
        let mut value = json!({ "timeout_ms": 1000.0, "ratio": 0.5, "rows": [2.0, -0.0, 3] });
        normalize_integral_numbers(&mut value);
        assert_eq!(value, json!({ "timeout_ms": 1000, "ratio": 0.5, "rows": [2, 0, 3] }));
        assert!(value["timeout_ms"].is_u64());
    }
}
