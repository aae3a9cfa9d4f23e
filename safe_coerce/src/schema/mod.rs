//! Recursive schema shapes.
//!
//! A [`Schema`] is either a single [`Rule`], a mapping from keys to
//! sub-schemas, or a sequence of sub-schemas cycled across a longer input
//! list.

use crate::rule::Rule;
use crate::value::KeyCase;

/// Shape describing how to coerce a whole structure.
///
/// # Examples
///
/// ```
/// use safe_coerce::{Rule, Schema, TypeKind};
///
/// let schema: Schema = Schema::object()
///     .field("role", Rule::required_of(TypeKind::Text))
///     .field(
///         "info",
///         Schema::object().field("school_id", Rule::required_of(TypeKind::Integer)),
///     )
///     .into();
/// assert!(matches!(schema, Schema::Object(_)));
/// ```
#[derive(Clone, Debug)]
pub enum Schema {
    /// Coerce one value with a rule.
    Leaf(Rule),
    /// Coerce the listed keys of a mapping.
    Object(ObjectSchema),
    /// Coerce list elements, cycling through the sub-schemas by position.
    Sequence(Vec<Self>),
}

impl Schema {
    /// Wrap a rule.
    #[must_use]
    pub const fn leaf(rule: Rule) -> Self {
        Self::Leaf(rule)
    }

    /// Start an empty object schema.
    #[must_use]
    pub const fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// A sequence schema cycling through `items`.
    ///
    /// A single item applies to every element of the input.
    #[must_use]
    pub fn sequence<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Self>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for object and sequence schemas.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Sequence(_))
    }
}

impl From<Rule> for Schema {
    fn from(rule: Rule) -> Self {
        Self::Leaf(rule)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Self::Object(object)
    }
}

/// Insertion-ordered mapping from keys to sub-schemas.
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
}

impl ObjectSchema {
    /// An object schema without fields.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add or replace the schema for `key`.
    ///
    /// A replaced key keeps its original position.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = key.into();
        let node = schema.into();
        if let Some(slot) = self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = node;
        } else {
            self.fields.push((name, node));
        }
        self
    }

    /// Rewrite every key with `case`.
    ///
    /// Environment maps are keyed by upper-case strings; recasing the schema
    /// lets one schema serve both them and lower-case configuration maps.
    /// When two keys collide after recasing the later one wins.
    #[must_use]
    pub fn with_key_case(self, case: KeyCase) -> Self {
        self.fields
            .into_iter()
            .fold(Self::new(), |object, (key, schema)| {
                object.field(case.apply(&key), schema)
            })
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the schema lists no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sub-schema for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find_map(|(name, schema)| (name == key).then_some(schema))
    }

    /// Iterate over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }
}
