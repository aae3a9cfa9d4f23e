//! Single-value coercion contracts.
//!
//! A [`Rule`] converts one input value into its target [`TypeKind`], applying
//! the required/default policy and the optional `before`, `validate` and
//! `after` hooks in a fixed order.

mod constraint;

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::convert::{convert, failure};
use crate::error::{CoerceError, CoerceResult, ConversionErrorKind};
use crate::kind::TypeKind;
use crate::value::Value;

pub use constraint::Constraint;

type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;
type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Coercion contract for one value.
///
/// Rules are immutable once built and carry no per-call state, so one rule
/// can be applied to any number of inputs, from any number of threads.
///
/// Applying a rule runs these steps, stopping at the first failure:
///
/// 1. `Null` input: a required rule fails with
///    [`CoerceError::EmptyValue`]; otherwise the default is taken.
/// 2. The `before` hook rewrites the raw input.
/// 3. The input is converted. When conversion fails a non-required rule
///    takes its default; a required rule fails with [`CoerceError::Coercion`].
/// 4. Built-in constraints and then the `validate` hook check the converted
///    value. A rejection is always a [`CoerceError::Validation`].
/// 5. The `after` hook rewrites the converted value. A `Null` result is
///    handled like `Null` input in step 1.
/// 6. The final value must be of the rule's type, unless it is a `Null`
///    default.
///
/// Defaults are never passed through the hooks.
///
/// # Examples
///
/// ```
/// use safe_coerce::{Rule, TypeKind, Value};
///
/// let port = Rule::default_of(TypeKind::Integer, 8080).min(1).max(65_535);
/// assert_eq!(port.apply(&Value::from("443"))?, Value::Integer(443));
/// assert_eq!(port.apply(&Value::from("https"))?, Value::Integer(8080));
/// assert!(port.apply(&Value::from("70000")).is_err());
/// # Ok::<_, safe_coerce::CoerceError>(())
/// ```
#[derive(Clone)]
pub struct Rule {
    kind: TypeKind,
    required: bool,
    default: Value,
    before: Option<Transform>,
    validate: Option<Predicate>,
    after: Option<Transform>,
    constraints: Vec<Constraint>,
}

impl Rule {
    /// An optional rule for `kind` whose default is `Null`.
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            required: false,
            default: Value::Null,
            before: None,
            validate: None,
            after: None,
            constraints: Vec::new(),
        }
    }

    /// A required rule for `kind`.
    #[must_use]
    pub const fn required_of(kind: TypeKind) -> Self {
        Self::new(kind).required()
    }

    /// An optional rule for `kind` that falls back to `default`.
    #[must_use]
    pub fn default_of(kind: TypeKind, default: impl Into<Value>) -> Self {
        Self::new(kind).default(default)
    }

    /// Mark the rule as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the value substituted for empty or unconvertible input.
    ///
    /// The default is ignored while the rule is required.
    #[must_use]
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Rewrite the raw input before conversion.
    #[must_use]
    pub fn before(mut self, hook: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Accept a converted value only when `hook` returns `true`.
    #[must_use]
    pub fn validate(mut self, hook: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(Arc::new(hook));
        self
    }

    /// Rewrite the converted value.
    #[must_use]
    pub fn after(mut self, hook: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.after = Some(Arc::new(hook));
        self
    }

    /// Add a built-in constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Inclusive lower bound for numeric or temporal values.
    #[must_use]
    pub fn min(self, bound: impl Into<Value>) -> Self {
        self.constraint(Constraint::Min(bound.into()))
    }

    /// Inclusive upper bound for numeric or temporal values.
    #[must_use]
    pub fn max(self, bound: impl Into<Value>) -> Self {
        self.constraint(Constraint::Max(bound.into()))
    }

    /// Minimum length of text, in characters.
    #[must_use]
    pub fn min_length(self, limit: usize) -> Self {
        self.constraint(Constraint::MinLength(limit))
    }

    /// Maximum length of text, in characters.
    #[must_use]
    pub fn max_length(self, limit: usize) -> Self {
        self.constraint(Constraint::MaxLength(limit))
    }

    /// Restrict the value to the listed alternatives.
    #[must_use]
    pub fn one_of<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraint(Constraint::OneOf(
            allowed.into_iter().map(Into::into).collect(),
        ))
    }

    /// Require text to match `pattern`.
    #[must_use]
    pub fn pattern(self, pattern: Regex) -> Self {
        self.constraint(Constraint::Pattern(pattern))
    }

    /// Require text to look like an e-mail address.
    #[must_use]
    pub fn email(self) -> Self {
        self.constraint(Constraint::email())
    }

    /// Target type of the rule.
    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Whether empty input is an error.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Value substituted for empty or unconvertible input.
    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default
    }

    /// Coerce `input` according to the rule.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::EmptyValue`] when a required rule has nothing to
    /// work with, [`CoerceError::Coercion`] when a required rule cannot
    /// convert its input or a hook produced the wrong type, and
    /// [`CoerceError::Validation`] when a constraint or the `validate` hook
    /// rejects the converted value.
    pub fn apply(&self, input: &Value) -> CoerceResult<Value> {
        if input.is_null() {
            return self.fallback("input is null");
        }
        let prepared = match &self.before {
            Some(hook) => hook(input.clone()),
            None => input.clone(),
        };
        let converted = match convert(&prepared, &self.kind) {
            Ok(converted) => converted,
            Err(err) if self.required => return Err(err.into()),
            Err(err) => {
                debug!(target_kind = %self.kind, reason = %err, "substituting default");
                return self.assert_type(self.default.clone());
            }
        };
        self.check(&converted)?;
        let finished = match &self.after {
            Some(hook) => hook(converted),
            None => converted,
        };
        if finished.is_null() {
            return self.fallback("after hook returned null");
        }
        self.assert_type(finished)
    }

    fn fallback(&self, reason: &'static str) -> CoerceResult<Value> {
        if self.required {
            return Err(CoerceError::empty());
        }
        debug!(target_kind = %self.kind, reason, "substituting default");
        self.assert_type(self.default.clone())
    }

    fn check(&self, value: &Value) -> CoerceResult<()> {
        for constraint in &self.constraints {
            constraint.check(value).map_err(CoerceError::validation)?;
        }
        match &self.validate {
            Some(hook) if !hook(value) => Err(CoerceError::validation(format!(
                "{value} rejected by validate hook"
            ))),
            _ => Ok(()),
        }
    }

    fn assert_type(&self, value: Value) -> CoerceResult<Value> {
        if value.is_null() {
            if self.required {
                return Err(CoerceError::empty());
            }
            return Ok(value);
        }
        if self.kind.admits(&value) {
            Ok(value)
        } else {
            Err(failure(ConversionErrorKind::TypeMismatch, &self.kind, &value).into())
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("before", &self.before.is_some())
            .field("validate", &self.validate.is_some())
            .field("after", &self.after.is_some())
            .field("constraints", &self.constraints)
            .finish()
    }
}
