//! Text and symbol conversion.

use crate::error::{ConversionError, ConversionErrorKind};
use crate::kind::TypeKind;
use crate::value::{Symbol, Value};

use super::failure;

pub(super) fn to_text(input: &Value) -> Result<String, ConversionError> {
    input
        .to_text()
        .ok_or_else(|| failure(ConversionErrorKind::Unsupported, &TypeKind::Text, input))
}

pub(super) fn to_symbol(input: &Value) -> Result<Symbol, ConversionError> {
    match input {
        Value::Text(text) if text.is_empty() => {
            Err(failure(ConversionErrorKind::Empty, &TypeKind::Symbol, input))
        }
        Value::Text(text) => Ok(Symbol::new(text.as_str())),
        _ => Err(failure(ConversionErrorKind::Unsupported, &TypeKind::Symbol, input)),
    }
}
