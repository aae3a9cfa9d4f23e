//! Schema-less, best-effort coercion.
//!
//! When no schema is available, [`infer`] guesses the most specific type a
//! piece of text can stand for. Text that matches no literal grammar is
//! returned unchanged.

use std::num::FpCategory;

use crate::convert::{convert, parse_bool};
use crate::kind::TypeKind;
use crate::value::Value;

const GUESSES: [TypeKind; 2] = [TypeKind::Integer, TypeKind::Float];

/// Returns `true` for values that carry no information: `Null`, `false`,
/// zero, empty text and `NaN`.
///
/// # Examples
///
/// ```
/// use safe_coerce::{Value, is_falsy};
///
/// assert!(is_falsy(&Value::from("")));
/// assert!(is_falsy(&Value::Float(f64::NAN)));
/// assert!(!is_falsy(&Value::from("false")));
/// ```
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) | Value::Integer(0) => true,
        Value::Float(number) => matches!(number.classify(), FpCategory::Nan | FpCategory::Zero),
        Value::Text(text) => text.is_empty(),
        _ => false,
    }
}

/// Negation of [`is_falsy`].
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    !is_falsy(value)
}

/// Guess a typed value for `input`.
///
/// Falsy input becomes `Null`. Text is tried, in order, as a boolean
/// literal, an integer, a float, and then a timestamp (when it contains a
/// time of day) or a date. Lists and maps are inferred element by element;
/// every other value is returned as is.
///
/// # Examples
///
/// ```
/// use safe_coerce::{Value, infer};
///
/// assert_eq!(infer(&Value::from("yes")), Value::Bool(true));
/// assert_eq!(infer(&Value::from("42")), Value::Integer(42));
/// assert_eq!(infer(&Value::from("4.2")), Value::Float(4.2));
/// assert_eq!(infer(&Value::from("apple")), Value::from("apple"));
/// assert_eq!(infer(&Value::from("")), Value::Null);
/// ```
#[must_use]
pub fn infer(input: &Value) -> Value {
    if is_falsy(input) {
        return Value::Null;
    }
    match input {
        Value::Text(text) => infer_text(input, text),
        Value::List(items) => Value::List(items.iter().map(infer).collect()),
        Value::Map(map) => Value::Map(map.iter().map(|(key, value)| (key, infer(value))).collect()),
        other => other.clone(),
    }
}

fn infer_text(input: &Value, text: &str) -> Value {
    if let Some(flag) = parse_bool(text.trim()) {
        return Value::Bool(flag);
    }
    let temporal = if text.contains(':') {
        TypeKind::DateTime
    } else {
        TypeKind::Date
    };
    GUESSES
        .iter()
        .chain([&temporal])
        .find_map(|kind| convert(input, kind).ok())
        .unwrap_or_else(|| input.clone())
}
