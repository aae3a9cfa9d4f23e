//! Error types produced while coercing values.
//!
//! [`CoerceError`] is what the engine and rules return; [`ConversionError`]
//! is the narrower failure reported by a single converter and is carried
//! inside [`CoerceError::Coercion`].

mod constructors;
mod path;
mod types;

pub use path::{FieldPath, Segment};
pub use types::{CoerceError, ConversionError, ConversionErrorKind, ErrorKind};

/// Result alias used across the crate.
pub type CoerceResult<T> = Result<T, CoerceError>;
