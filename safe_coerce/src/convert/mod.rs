//! Primitive converters.
//!
//! [`convert`] maps one untyped [`Value`] to one [`TypeKind`]. Converters are
//! pure: they never substitute defaults and never return a value of the wrong
//! type. Default handling belongs to [`crate::Rule`].

mod boolean;
mod numeric;
mod temporal;
mod text;

use crate::error::{ConversionError, ConversionErrorKind};
use crate::kind::{CustomType, TypeKind};
use crate::value::Value;

pub use boolean::{FALSE_LITERALS, TRUE_LITERALS, parse_bool};

/// Convert `input` into an instance of `kind`.
///
/// Input already of the target type is returned unchanged. Otherwise a custom
/// input exposing [`crate::CustomValue::coerce_hint`] is replaced by its hint
/// before conversion.
///
/// # Errors
///
/// Returns a [`ConversionError`] describing why the input cannot become
/// `kind`; `Null` input always fails with [`ConversionErrorKind::Empty`].
///
/// # Examples
///
/// ```
/// use safe_coerce::{TypeKind, Value, convert};
///
/// assert_eq!(convert(&Value::from("-0123"), &TypeKind::Integer)?, Value::Integer(-123));
/// assert!(convert(&Value::from("123!"), &TypeKind::Integer).is_err());
/// # Ok::<_, safe_coerce::ConversionError>(())
/// ```
pub fn convert(input: &Value, kind: &TypeKind) -> Result<Value, ConversionError> {
    if kind.admits(input) {
        return Ok(input.clone());
    }
    if let Value::Custom(custom) = input
        && let Some(hint) = custom.coerce_hint()
    {
        return convert_plain(&hint, kind);
    }
    convert_plain(input, kind)
}

fn convert_plain(input: &Value, kind: &TypeKind) -> Result<Value, ConversionError> {
    if kind.admits(input) {
        return Ok(input.clone());
    }
    if input.is_null() {
        return Err(failure(ConversionErrorKind::Empty, kind, input));
    }
    match kind {
        TypeKind::Boolean => boolean::to_bool(input).map(Value::Bool),
        TypeKind::Integer => numeric::to_integer(input).map(Value::Integer),
        TypeKind::Float => numeric::to_float(input).map(Value::Float),
        TypeKind::Date => temporal::to_date(input).map(Value::Date),
        TypeKind::DateTime => temporal::to_date_time(input).map(Value::DateTime),
        TypeKind::Time => temporal::to_time(input).map(Value::Time),
        TypeKind::Text => text::to_text(input).map(Value::Text),
        TypeKind::Symbol => text::to_symbol(input).map(Value::Symbol),
        TypeKind::Custom(custom) => to_custom(input, custom),
    }
}

fn to_custom(input: &Value, custom: &CustomType) -> Result<Value, ConversionError> {
    if let Some(converted) = custom.try_convert(input) {
        return Ok(converted);
    }
    custom.construct(input.clone())
}

/// Build the error for `input` failing to become `kind`.
pub(crate) fn failure(kind: ConversionErrorKind, target: &TypeKind, input: &Value) -> ConversionError {
    ConversionError::new(kind, target.name(), input.type_name())
}
