//! Helpers for inspecting `serde_json::Value` the way rule checks need to.

use std::borrow::Cow;

use serde_json::{Number, Value};

/// Short type name used in configuration error messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An optional field is skipped when its value is absent.
///
/// Missing keys are looked up as `Value::Null`, so both cases collapse here.
#[inline]
#[must_use]
pub fn is_absent(value: &Value) -> bool {
    value.is_null()
}

/// Emptiness as understood by the `required` check: null, whitespace-only
/// strings, empty arrays and empty objects.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Decimal text of a number as a JavaScript client would write it.
///
/// Integral floats below `1e21` drop their fraction (`100.0` is `100`,
/// `1e20` is written out in full); everything else keeps serde_json's form.
#[must_use]
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !(n.is_i64() || n.is_u64()) && f.fract() == 0.0 && f.abs() < 1e21 => {
            // Adding `0.0` turns `-0.0` into `0.0`.
            format!("{:.0}", f + 0.0)
        }
        _ => n.to_string(),
    }
}

/// Text form of a scalar for pattern-style checks.
///
/// Strings are used as-is and numbers by their decimal text. Other values
/// have no text form and fail such checks.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        _ => None,
    }
}

/// Renders a value for inclusion in a message: strings without quotes,
/// everything else as JSON.
#[must_use]
pub fn display(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Number(n) => Cow::Owned(number_text(n)),
        other => Cow::Owned(other.to_string()),
    }
}

/// Returns the value as a finite `f64`, if it is a number.
#[must_use]
pub fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Returns `true` when `value` is a number with no fractional part.
#[must_use]
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        _ => finite_number(value).is_some_and(|f| f.fract() == 0.0),
    }
}
