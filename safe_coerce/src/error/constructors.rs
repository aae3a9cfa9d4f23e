//! Constructors and accessors for `CoerceError`.

use super::{CoerceError, ConversionError, ErrorKind, FieldPath, Segment};

impl CoerceError {
    /// Construct an [`CoerceError::EmptyValue`] at the root.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EmptyValue {
            path: FieldPath::root(),
        }
    }

    /// Construct a [`CoerceError::Validation`] at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use safe_coerce::{CoerceError, ErrorKind};
    ///
    /// let err = CoerceError::validation("must be at least 3");
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            path: FieldPath::root(),
            message: message.into(),
        }
    }

    /// Construct a [`CoerceError::Coercion`] at the root.
    #[must_use]
    pub const fn coercion(source: ConversionError) -> Self {
        Self::Coercion {
            path: FieldPath::root(),
            source,
        }
    }

    /// Construct a [`CoerceError::InvalidRule`] at the root.
    #[must_use]
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule {
            path: FieldPath::root(),
            message: message.into(),
        }
    }

    /// Construct a [`CoerceError::UnsupportedMutation`] for the slot `segment`.
    #[must_use]
    pub fn unsupported_mutation(segment: Segment) -> Self {
        Self::UnsupportedMutation {
            path: FieldPath::root().child(segment),
        }
    }

    /// Returns the coarse category of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyValue { .. } => ErrorKind::EmptyValue,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Coercion { .. } => ErrorKind::Coercion,
            Self::InvalidRule { .. } => ErrorKind::InvalidRule,
            Self::UnsupportedMutation { .. } => ErrorKind::UnsupportedMutation,
        }
    }

    /// Location of the value that failed.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        match self {
            Self::EmptyValue { path }
            | Self::Validation { path, .. }
            | Self::Coercion { path, .. }
            | Self::InvalidRule { path, .. }
            | Self::UnsupportedMutation { path } => path,
        }
    }

    /// Re-anchor the error one level deeper, beneath `segment`.
    ///
    /// # Examples
    ///
    /// ```
    /// use safe_coerce::{CoerceError, Segment};
    ///
    /// let err = CoerceError::empty()
    ///     .within(Segment::Key("school_id".into()))
    ///     .within(Segment::Key("info".into()));
    /// assert_eq!(err.path().to_string(), "info.school_id");
    /// ```
    #[must_use]
    pub fn within(self, segment: Segment) -> Self {
        match self {
            Self::EmptyValue { path } => Self::EmptyValue {
                path: path.prefixed(segment),
            },
            Self::Validation { path, message } => Self::Validation {
                path: path.prefixed(segment),
                message,
            },
            Self::Coercion { path, source } => Self::Coercion {
                path: path.prefixed(segment),
                source,
            },
            Self::InvalidRule { path, message } => Self::InvalidRule {
                path: path.prefixed(segment),
                message,
            },
            Self::UnsupportedMutation { path } => Self::UnsupportedMutation {
                path: path.prefixed(segment),
            },
        }
    }
}

impl From<ConversionError> for CoerceError {
    fn from(source: ConversionError) -> Self {
        Self::coercion(source)
    }
}
