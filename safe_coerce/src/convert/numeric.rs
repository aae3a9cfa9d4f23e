//! Integer and float conversion.

use crate::error::{ConversionError, ConversionErrorKind};
use crate::kind::TypeKind;
use crate::value::Value;

use super::failure;

/// Largest float magnitude that truncates into `i64` without overflow.
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

pub(super) fn to_integer(input: &Value) -> Result<i64, ConversionError> {
    let reject = |kind| failure(kind, &TypeKind::Integer, input);
    match input {
        Value::Text(text) => parse_integer(text).map_err(reject),
        Value::Float(number) => truncate(*number).ok_or_else(|| reject(ConversionErrorKind::Malformed)),
        _ => Err(reject(ConversionErrorKind::Unsupported)),
    }
}

pub(super) fn to_float(input: &Value) -> Result<f64, ConversionError> {
    let reject = |kind| failure(kind, &TypeKind::Float, input);
    match input {
        Value::Text(text) => parse_float(text).map_err(reject),
        #[expect(
            clippy::cast_precision_loss,
            reason = "widening an integer to a float is the requested conversion"
        )]
        Value::Integer(number) => Ok(*number as f64),
        _ => Err(reject(ConversionErrorKind::Unsupported)),
    }
}

/// Parse a decimal integer literal: optional sign, then ASCII digits.
///
/// Single underscores may separate digit groups (`1_000`). Leading zeros are
/// accepted and dropped, surrounding whitespace ignored.
fn parse_integer(raw: &str) -> Result<i64, ConversionErrorKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ConversionErrorKind::Empty);
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !is_digit_groups(digits) {
        return Err(ConversionErrorKind::Malformed);
    }
    let compact: String = text.chars().filter(|ch| *ch != '_').collect();
    compact.parse().map_err(|_| ConversionErrorKind::Malformed)
}

/// ASCII digits, optionally split by single underscores between digits.
fn is_digit_groups(text: &str) -> bool {
    !text.is_empty()
        && text
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|byte| byte.is_ascii_digit()))
}

/// Parse a decimal float literal.
///
/// Grammar: `[sign] digits ["." digits] [("e"|"E") [sign] digits]`, or
/// `[sign] "." digits [exponent]`. Spellings such as `inf` or `NaN` that the
/// standard library would accept are rejected, as are literals too large to
/// be represented (`1e400`).
fn parse_float(raw: &str) -> Result<f64, ConversionErrorKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ConversionErrorKind::Empty);
    }
    if !is_float_literal(text) {
        return Err(ConversionErrorKind::Malformed);
    }
    text.parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or(ConversionErrorKind::Malformed)
}

fn is_float_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => all_digits(whole, true) && all_digits(fraction, false),
        None => all_digits(mantissa, false),
    };
    let exponent_ok = exponent.is_none_or(|exp| {
        let exp_digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        all_digits(exp_digits, false)
    });
    mantissa_ok && exponent_ok
}

fn all_digits(text: &str, allow_empty: bool) -> bool {
    if text.is_empty() {
        return allow_empty;
    }
    text.bytes().all(|byte| byte.is_ascii_digit())
}

fn truncate(number: f64) -> Option<i64> {
    if !number.is_finite() || number.abs() >= I64_FLOAT_LIMIT {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "magnitude checked against the i64 range above; truncation toward zero is intended"
    )]
    let truncated = number.trunc() as i64;
    Some(truncated)
}
