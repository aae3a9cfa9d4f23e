//! Primary error enums for coercion flows.

use std::fmt;

use thiserror::Error;

use super::FieldPath;

/// Why a single converter could not produce its target type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConversionErrorKind {
    /// Text input that does not follow the literal grammar of the target.
    Malformed,
    /// Absent or empty input that cannot stand for any value.
    Empty,
    /// Input whose type has no conversion path to the target.
    Unsupported,
    /// A value that was produced but is not of the target type.
    TypeMismatch,
}

impl fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Malformed => "malformed literal",
            Self::Empty => "empty input",
            Self::Unsupported => "unsupported input",
            Self::TypeMismatch => "type mismatch",
        })
    }
}

/// Failure reported by a converter or a type assertion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: cannot convert {found} to {target}")]
pub struct ConversionError {
    kind: ConversionErrorKind,
    target: String,
    found: &'static str,
}

impl ConversionError {
    /// Build a conversion error.
    ///
    /// `target` names the requested type and `found` the runtime type of the
    /// offending input (see [`crate::Value::type_name`]).
    #[must_use]
    pub fn new(kind: ConversionErrorKind, target: impl Into<String>, found: &'static str) -> Self {
        Self {
            kind,
            target: target.into(),
            found,
        }
    }

    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> ConversionErrorKind {
        self.kind
    }

    /// Name of the type the conversion targeted.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Runtime type name of the rejected input.
    #[must_use]
    pub const fn found(&self) -> &'static str {
        self.found
    }
}

/// Coarse classification of a [`CoerceError`], convenient for matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required value was missing.
    EmptyValue,
    /// A converted value failed its rule's predicate.
    Validation,
    /// Conversion failed and no default applied.
    Coercion,
    /// The schema itself is malformed.
    InvalidRule,
    /// An in-place write hit a read-only container.
    UnsupportedMutation,
}

/// Errors that can occur while coercing a value against a schema.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoerceError {
    /// A required leaf received no usable input, or its hooks produced none.
    #[error("value at '{path}' must not be empty")]
    EmptyValue {
        /// Location of the empty value.
        path: FieldPath,
    },

    /// The converted value was rejected by the rule's predicate.
    #[error("value at '{path}' failed validation: {message}")]
    Validation {
        /// Location of the rejected value.
        path: FieldPath,
        /// Which check rejected the value.
        message: String,
    },

    /// Conversion failed and the rule offered no eligible default.
    #[error("cannot coerce value at '{path}': {source}")]
    Coercion {
        /// Location of the value that could not be converted.
        path: FieldPath,
        /// Converter failure.
        #[source]
        source: ConversionError,
    },

    /// The schema cannot be applied as written.
    #[error("invalid coercion rule at '{path}': {message}")]
    InvalidRule {
        /// Location in the input where the schema was being applied.
        path: FieldPath,
        /// What is wrong with the schema.
        message: String,
    },

    /// In-place coercion tried to write into a read-only container.
    #[error("container at '{path}' does not support in-place mutation")]
    UnsupportedMutation {
        /// Slot that could not be written.
        path: FieldPath,
    },
}
