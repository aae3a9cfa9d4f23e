//! Target type tags understood by the converters.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{CoerceError, ConversionError, ConversionErrorKind};
use crate::value::{CustomValue, Value};

/// Opt-in conversion protocol for user-defined types.
///
/// A type implementing `Coercible` can be targeted by a rule through
/// [`TypeKind::custom`]. The converter tries [`Coercible::try_convert`]
/// first and falls back to [`Coercible::construct`].
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use safe_coerce::{Coercible, ConversionError, CustomValue, Rule, Schema, TypeKind, Value, coerce};
///
/// #[derive(Debug, PartialEq)]
/// struct Doubled(i64);
///
/// impl CustomValue for Doubled {
///     fn type_name(&self) -> &'static str {
///         Self::NAME
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// impl Coercible for Doubled {
///     const NAME: &'static str = "doubled";
///
///     fn construct(input: Value) -> Result<Self, ConversionError> {
///         let n: i64 = input.as_str().and_then(|s| s.parse().ok()).unwrap_or_default();
///         Ok(Self(n * 2))
///     }
/// }
///
/// let rule = Rule::new(TypeKind::custom::<Doubled>());
/// let out = coerce(&Value::from("1"), &Schema::leaf(rule))?;
/// assert_eq!(out.downcast_ref::<Doubled>(), Some(&Doubled(2)));
/// # Ok::<_, safe_coerce::CoerceError>(())
/// ```
pub trait Coercible: CustomValue + Sized + 'static {
    /// Type name shared with [`CustomValue::type_name`].
    const NAME: &'static str;

    /// Attempt a conversion; `None` defers to [`Coercible::construct`].
    fn try_convert(input: &Value) -> Option<Self> {
        let _ = input;
        None
    }

    /// Build a value from the raw input.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when the input cannot represent `Self`.
    /// The default rejects every input as unsupported.
    fn construct(input: Value) -> Result<Self, ConversionError> {
        Err(ConversionError::new(
            ConversionErrorKind::Unsupported,
            Self::NAME,
            input.type_name(),
        ))
    }
}

type TryConvertFn = fn(&Value) -> Option<Value>;
type ConstructFn = fn(Value) -> Result<Value, ConversionError>;

/// Conversion capabilities of one user-defined type.
#[derive(Clone, Copy)]
pub struct CustomType {
    name: &'static str,
    try_convert: TryConvertFn,
    construct: ConstructFn,
}

impl CustomType {
    /// Capture the [`Coercible`] implementation of `T`.
    #[must_use]
    pub fn of<T: Coercible>() -> Self {
        Self {
            name: T::NAME,
            try_convert: |input| {
                T::try_convert(input).map(|converted| Value::Custom(Arc::new(converted)))
            },
            construct: |input| T::construct(input).map(|built| Value::Custom(Arc::new(built))),
        }
    }

    /// Name of the user type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run the type's `try_convert` capability.
    #[must_use]
    pub fn try_convert(&self, input: &Value) -> Option<Value> {
        (self.try_convert)(input)
    }

    /// Run the type's `construct` capability.
    ///
    /// # Errors
    ///
    /// Propagates the failure reported by the user type.
    pub fn construct(&self, input: Value) -> Result<Value, ConversionError> {
        (self.construct)(input)
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CustomType {}

/// Target type of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeKind {
    /// [`Value::Bool`].
    Boolean,
    /// [`Value::Integer`].
    Integer,
    /// [`Value::Float`].
    Float,
    /// [`Value::Date`].
    Date,
    /// [`Value::DateTime`].
    DateTime,
    /// [`Value::Time`].
    Time,
    /// [`Value::Text`].
    Text,
    /// [`Value::Symbol`].
    Symbol,
    /// [`Value::Custom`] holding the named user type.
    Custom(CustomType),
}

impl TypeKind {
    /// Shorthand for `TypeKind::Custom(CustomType::of::<T>())`.
    #[must_use]
    pub fn custom<T: Coercible>() -> Self {
        Self::Custom(CustomType::of::<T>())
    }

    /// Name used in diagnostics and accepted by [`TypeKind::from_str`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Text => "text",
            Self::Symbol => "symbol",
            Self::Custom(custom) => custom.name(),
        }
    }

    /// Returns `true` when `value` is an instance of this type.
    ///
    /// This is an exact check: an integer is not admitted as a float.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Boolean, Value::Bool(_))
            | (Self::Integer, Value::Integer(_))
            | (Self::Float, Value::Float(_))
            | (Self::Date, Value::Date(_))
            | (Self::DateTime, Value::DateTime(_))
            | (Self::Time, Value::Time(_))
            | (Self::Text, Value::Text(_))
            | (Self::Symbol, Value::Symbol(_)) => true,
            (Self::Custom(custom), Value::Custom(held)) => held.type_name() == custom.name(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a primitive type name.
///
/// Accepts the names produced by [`TypeKind::name`] plus the common aliases
/// `bool`, `int`, `string` and `str`, ignoring ASCII case. Custom types are
/// never parsed from text.
///
/// # Errors
///
/// Unknown names fail with [`CoerceError::InvalidRule`].
impl FromStr for TypeKind {
    type Err = CoerceError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Self::Boolean,
            "integer" | "int" => Self::Integer,
            "float" => Self::Float,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "time" => Self::Time,
            "text" | "string" | "str" => Self::Text,
            "symbol" => Self::Symbol,
            _ => {
                return Err(CoerceError::invalid_rule(format!(
                    "`{name}` is not a known type"
                )));
            }
        };
        Ok(kind)
    }
}
