//! Process environment as coercion input.
//!
//! [`EnvSource`] wraps `figment::providers::Env` to select variables by
//! prefix or allow-list; [`EnvSource::snapshot`] captures them into an
//! [`EnvSnapshot`], a string-keyed, string-valued mapping that can be
//! coerced but not rewritten in place.

use figment::providers::Env;
use tracing::debug;
use uncased::UncasedStr;

use crate::engine::{Container, Shape, Slot, coerce};
use crate::error::{CoerceError, CoerceResult};
use crate::schema::Schema;
use crate::value::{Map, Value};

/// Selection of environment variables to capture.
///
/// Keys keep the case they have in the environment unless
/// [`EnvSource::lowercase`] is enabled.
#[derive(Clone)]
pub struct EnvSource {
    inner: Env,
}

impl EnvSource {
    /// Capture every variable.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use safe_coerce::EnvSource;
    /// let vars = EnvSource::raw().snapshot();
    /// let _ = vars.get("PATH");
    /// ```
    #[must_use]
    pub fn raw() -> Self {
        Env::raw().lowercase(false).into()
    }

    /// Capture variables starting with `prefix`, with the prefix stripped.
    ///
    /// The prefix is matched ignoring ASCII case.
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Env::prefixed(prefix).lowercase(false).into()
    }

    /// Whether to lowercase keys as they are captured.
    #[must_use]
    pub fn lowercase(self, lowercase: bool) -> Self {
        self.inner.lowercase(lowercase).into()
    }

    /// Restrict capture to the listed keys, compared ignoring ASCII case
    /// after any prefix is stripped.
    #[must_use]
    pub fn only(self, keys: &[&str]) -> Self {
        self.inner.only(keys).into()
    }

    /// Read the selected variables now.
    #[must_use]
    pub fn snapshot(&self) -> EnvSnapshot {
        let vars: Map = self
            .inner
            .iter()
            .map(|(key, value)| (key.into_string(), Value::Text(value)))
            .collect();
        debug!(keys = vars.len(), "captured environment snapshot");
        EnvSnapshot { vars }
    }
}

impl From<Env> for EnvSource {
    fn from(inner: Env) -> Self {
        Self { inner }
    }
}

/// Immutable capture of environment variables.
///
/// Every value is [`Value::Text`]. The snapshot implements [`Container`] so
/// it can be handed to [`crate::coerce_in_place`], which fails with
/// [`CoerceError::UnsupportedMutation`] on the first write; use
/// [`EnvSnapshot::coerce`] to obtain a typed copy instead.
///
/// # Examples
///
/// ```
/// use safe_coerce::{EnvSnapshot, KeyCase, Rule, Schema, TypeKind, Value};
///
/// let vars = EnvSnapshot::from_pairs([("FLAG_0", "true"), ("FLAG_1", "off")]);
/// let schema = Schema::object()
///     .field("flag_0", Rule::default_of(TypeKind::Boolean, false))
///     .field("flag_1", Rule::default_of(TypeKind::Boolean, true))
///     .with_key_case(KeyCase::Upper);
/// let typed = vars.coerce(&schema.into())?;
/// assert_eq!(typed.as_map().and_then(|m| m.get("FLAG_1")), Some(&Value::Bool(false)));
/// # Ok::<_, safe_coerce::CoerceError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvSnapshot {
    vars: Map,
}

impl EnvSnapshot {
    /// Build a snapshot from explicit pairs instead of the process
    /// environment.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Value::Text(value.into())))
            .collect();
        Self { vars }
    }

    /// Number of captured variables.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when nothing was captured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Look up `key`, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).and_then(Value::as_str)
    }

    /// Copy the captured variables into a [`Value::Map`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Map(self.vars.clone())
    }

    /// Coerce the captured variables against `schema`.
    ///
    /// Schema keys must match the captured keys exactly; recase one side with
    /// [`crate::KeyCase`] when they differ.
    ///
    /// # Errors
    ///
    /// Propagates any [`CoerceError`] raised by [`crate::coerce`].
    pub fn coerce(&self, schema: &Schema) -> CoerceResult<Value> {
        coerce(&self.to_value(), schema)
    }

    fn entry(&self, key: &str) -> Option<&Value> {
        let wanted = UncasedStr::new(key);
        self.vars
            .iter()
            .find_map(|(name, value)| (UncasedStr::new(name) == wanted).then_some(value))
    }
}

impl Container for EnvSnapshot {
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn len(&self) -> usize {
        self.vars.len()
    }

    fn read(&self, slot: Slot<'_>) -> Option<&Value> {
        match slot {
            Slot::Key(key) => self.entry(key),
            Slot::Index(_) => None,
        }
    }

    fn write(&mut self, slot: Slot<'_>, _value: Value) -> CoerceResult<()> {
        Err(CoerceError::unsupported_mutation(slot.into()))
    }

    fn descend(&mut self, _slot: Slot<'_>) -> Option<&mut dyn Container> {
        None
    }
}
