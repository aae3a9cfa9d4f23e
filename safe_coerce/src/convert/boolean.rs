//! Boolean literal tables and parsing.

use crate::error::{ConversionError, ConversionErrorKind};
use crate::kind::TypeKind;
use crate::value::Value;

use super::failure;

/// Literals read as `true`, compared without regard to ASCII case.
pub static TRUE_LITERALS: [&str; 5] = ["true", "on", "yes", "y", "t"];

/// Literals read as `false`, compared without regard to ASCII case.
pub static FALSE_LITERALS: [&str; 5] = ["false", "off", "no", "n", "f"];

/// Parse a boolean literal.
///
/// Surrounding whitespace is not trimmed: `" yes"` is not a literal.
///
/// # Examples
///
/// ```
/// use safe_coerce::parse_bool;
///
/// assert_eq!(parse_bool("YES"), Some(true));
/// assert_eq!(parse_bool("f"), Some(false));
/// assert_eq!(parse_bool("what"), None);
/// ```
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    let matches = |literal: &&str| literal.eq_ignore_ascii_case(text);
    if TRUE_LITERALS.iter().any(matches) {
        Some(true)
    } else if FALSE_LITERALS.iter().any(matches) {
        Some(false)
    } else {
        None
    }
}

pub(super) fn to_bool(input: &Value) -> Result<bool, ConversionError> {
    let Some(text) = input.as_str() else {
        return Err(failure(ConversionErrorKind::Unsupported, &TypeKind::Boolean, input));
    };
    if text.is_empty() {
        return Err(failure(ConversionErrorKind::Empty, &TypeKind::Boolean, input));
    }
    parse_bool(text).ok_or_else(|| failure(ConversionErrorKind::Malformed, &TypeKind::Boolean, input))
}
