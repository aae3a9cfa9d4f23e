//! Built-in validation constraints.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

#[expect(
    clippy::expect_used,
    reason = "the e-mail pattern is a literal covered by unit tests"
)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w+\-.]+@[a-z\d\-]+(\.[a-z\d\-]+)*\.[a-z]+$")
        .expect("built-in e-mail pattern compiles")
});

/// A declarative check applied to a converted value.
///
/// Constraints run before the rule's custom `validate` hook. A value of a
/// type the constraint does not understand (for example a length bound on an
/// integer) fails the check.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Constraint {
    /// Inclusive lower bound for numbers and temporal values.
    Min(Value),
    /// Inclusive upper bound for numbers and temporal values.
    Max(Value),
    /// Minimum number of characters in text or a symbol name.
    MinLength(usize),
    /// Maximum number of characters in text or a symbol name.
    MaxLength(usize),
    /// The value must equal one of the listed values.
    OneOf(Vec<Value>),
    /// Text or symbol must match the regular expression.
    Pattern(Regex),
}

impl Constraint {
    /// Text must look like an e-mail address.
    #[must_use]
    pub fn email() -> Self {
        Self::Pattern(EMAIL.clone())
    }

    /// Check `value`, returning a description of the violation.
    ///
    /// # Errors
    ///
    /// Returns the violated constraint rendered as text.
    pub(crate) fn check(&self, value: &Value) -> Result<(), String> {
        let satisfied = match self {
            Self::Min(bound) => {
                compare(value, bound).is_some_and(|order| order != Ordering::Less)
            }
            Self::Max(bound) => {
                compare(value, bound).is_some_and(|order| order != Ordering::Greater)
            }
            Self::MinLength(limit) => char_len(value).is_some_and(|len| len >= *limit),
            Self::MaxLength(limit) => char_len(value).is_some_and(|len| len <= *limit),
            Self::OneOf(allowed) => allowed.contains(value),
            Self::Pattern(pattern) => value.as_str().is_some_and(|text| pattern.is_match(text)),
        };
        if satisfied {
            Ok(())
        } else {
            Err(format!("{value} {self}"))
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min(bound) => write!(f, "must be at least {bound}"),
            Self::Max(bound) => write!(f, "must be at most {bound}"),
            Self::MinLength(limit) => write!(f, "must be at least {limit} characters long"),
            Self::MaxLength(limit) => write!(f, "must be at most {limit} characters long"),
            Self::OneOf(allowed) => write!(f, "must be one of {}", Value::List(allowed.clone())),
            Self::Pattern(pattern) => write!(f, "must match /{}/", pattern.as_str()),
        }
    }
}

fn char_len(value: &Value) -> Option<usize> {
    value.as_str().map(|text| text.chars().count())
}

/// Order two scalar values of compatible types.
///
/// Integers and floats compare numerically with each other; temporal values
/// compare only with the same temporal kind.
fn compare(value: &Value, bound: &Value) -> Option<Ordering> {
    match (value, bound) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        #[expect(
            clippy::cast_precision_loss,
            reason = "bounds are compared approximately across numeric types"
        )]
        (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        #[expect(
            clippy::cast_precision_loss,
            reason = "bounds are compared approximately across numeric types"
        )]
        (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
