//! Schema-driven coercion of whole structures.
//!
//! [`coerce`] builds a new value mirroring the schema and never touches its
//! input. [`coerce_in_place`] rewrites an existing [`Container`] slot by
//! slot.

mod container;

use tracing::trace;

use crate::error::{CoerceError, CoerceResult, ConversionError, ConversionErrorKind, Segment};
use crate::schema::{ObjectSchema, Schema};
use crate::value::{Map, Value};

pub use container::{Container, Shape, Slot};

static NULL: Value = Value::Null;

/// Coerce `input` against `schema`, returning a new value.
///
/// Object schemas produce a map holding exactly the schema's keys, in schema
/// order; keys missing from the input are coerced from `Null`. Sequence
/// schemas map element `i` through sub-schema `i mod len`.
///
/// # Errors
///
/// Propagates the first [`CoerceError`] raised by a rule, located by the path
/// of the offending value. A non-mapping input to an object schema, or a
/// non-list input to a sequence schema, is a [`CoerceError::Coercion`];
/// `Null` reads as an empty mapping or list. An empty sequence schema applied
/// to a non-empty list is a [`CoerceError::InvalidRule`].
///
/// # Examples
///
/// ```
/// use safe_coerce::{Rule, Schema, TypeKind, Value, coerce};
///
/// let schema = Schema::sequence([
///     Rule::required_of(TypeKind::Integer),
///     Rule::required_of(TypeKind::Boolean),
/// ]);
/// let input = Value::from(vec!["1", "true", "3", "false"]);
/// assert_eq!(
///     coerce(&input, &schema)?,
///     Value::List(vec![1.into(), true.into(), 3.into(), false.into()]),
/// );
/// # Ok::<_, safe_coerce::CoerceError>(())
/// ```
pub fn coerce(input: &Value, schema: &Schema) -> CoerceResult<Value> {
    match schema {
        Schema::Leaf(rule) => rule.apply(input),
        Schema::Object(object) => coerce_object(input, object),
        Schema::Sequence(items) => coerce_sequence(input, items),
    }
}

fn coerce_object(input: &Value, object: &ObjectSchema) -> CoerceResult<Value> {
    let source = match input {
        Value::Map(map) => Some(map),
        Value::Null => None,
        other => return Err(mismatch("mapping", other)),
    };
    trace!(fields = object.len(), "coercing object");
    let mut out = Map::new();
    for (key, schema) in object.iter() {
        let field = source.and_then(|map| map.get(key)).unwrap_or(&NULL);
        let coerced = coerce(field, schema).map_err(|err| err.within(key_segment(key)))?;
        out.insert(key, coerced);
    }
    Ok(Value::Map(out))
}

fn coerce_sequence(input: &Value, items: &[Schema]) -> CoerceResult<Value> {
    let elements = match input {
        Value::List(elements) => elements,
        Value::Null => return Ok(Value::List(Vec::new())),
        other => return Err(mismatch("list", other)),
    };
    trace!(elements = elements.len(), rules = items.len(), "coercing sequence");
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let schema = cycle(items, index)?;
            coerce(element, schema).map_err(|err| err.within(Segment::Index(index)))
        })
        .collect::<CoerceResult<Vec<_>>>()
        .map(Value::List)
}

/// Coerce the contents of `input` against `schema`, in place.
///
/// Nested mappings and lists matched by object or sequence sub-schemas are
/// rewritten through [`Container::descend`]; every other slot is replaced by
/// the result of [`coerce`] on its current value. Keys the schema does not
/// mention are left untouched. For inputs without such keys the rewritten
/// container equals what [`coerce`] would have returned.
///
/// Slots are written in order and nothing is rolled back: when element *k*
/// fails, elements before *k* are already overwritten.
///
/// # Errors
///
/// Returns [`CoerceError::InvalidRule`] for a leaf schema at the top level,
/// [`CoerceError::Coercion`] when `input` does not have the shape the schema
/// expects, [`CoerceError::UnsupportedMutation`] when the container refuses a
/// write, and otherwise the first error raised by a rule.
///
/// # Examples
///
/// ```
/// use safe_coerce::{Map, Rule, Schema, TypeKind, Value, coerce_in_place};
///
/// let mut input: Value = [("port", Value::from("8080"))]
///     .into_iter()
///     .collect::<Map>()
///     .into();
/// let schema = Schema::object().field("port", Rule::required_of(TypeKind::Integer));
/// coerce_in_place(&mut input, &schema.into())?;
/// assert_eq!(input.as_map().and_then(|m| m.get("port")), Some(&Value::Integer(8080)));
/// # Ok::<_, safe_coerce::CoerceError>(())
/// ```
pub fn coerce_in_place(input: &mut dyn Container, schema: &Schema) -> CoerceResult<()> {
    match (schema, input.shape()) {
        (Schema::Leaf(_), _) => Err(CoerceError::invalid_rule(
            "in-place coercion needs an object or sequence schema at the top level",
        )),
        (Schema::Object(object), Shape::Mapping) => rewrite_object(input, object),
        (Schema::Sequence(items), Shape::Sequence) => rewrite_sequence(input, items),
        (Schema::Object(_), shape) => Err(mismatch_shape("mapping", shape)),
        (Schema::Sequence(_), shape) => Err(mismatch_shape("list", shape)),
    }
}

fn rewrite_object(input: &mut dyn Container, object: &ObjectSchema) -> CoerceResult<()> {
    trace!(fields = object.len(), "rewriting object in place");
    for (key, schema) in object.iter() {
        rewrite_slot(input, Slot::Key(key), schema)?;
    }
    Ok(())
}

fn rewrite_sequence(input: &mut dyn Container, items: &[Schema]) -> CoerceResult<()> {
    let len = input.len();
    trace!(elements = len, rules = items.len(), "rewriting sequence in place");
    for index in 0..len {
        let schema = cycle(items, index)?;
        rewrite_slot(input, Slot::Index(index), schema)?;
    }
    Ok(())
}

fn rewrite_slot(input: &mut dyn Container, slot: Slot<'_>, schema: &Schema) -> CoerceResult<()> {
    if holds_matching_container(input.read(slot), schema)
        && let Some(nested) = input.descend(slot)
    {
        return coerce_in_place(nested, schema).map_err(|err| err.within(slot.into()));
    }
    let current = input.read(slot).unwrap_or(&NULL);
    let coerced = coerce(current, schema).map_err(|err| err.within(slot.into()))?;
    input.write(slot, coerced)
}

fn holds_matching_container(current: Option<&Value>, schema: &Schema) -> bool {
    matches!(
        (current, schema),
        (Some(Value::Map(_)), Schema::Object(_)) | (Some(Value::List(_)), Schema::Sequence(_))
    )
}

fn cycle(items: &[Schema], index: usize) -> CoerceResult<&Schema> {
    index
        .checked_rem(items.len())
        .and_then(|position| items.get(position))
        .ok_or_else(|| CoerceError::invalid_rule("sequence schema has no rules to cycle through"))
}

fn key_segment(key: &str) -> Segment {
    Segment::Key(key.to_owned())
}

fn mismatch(expected: &str, found: &Value) -> CoerceError {
    mismatch_shape(expected, Shape::Other(found.type_name()))
}

fn mismatch_shape(expected: &str, shape: Shape) -> CoerceError {
    let found = match shape {
        Shape::Mapping => "map",
        Shape::Sequence => "list",
        Shape::Other(name) => name,
    };
    ConversionError::new(ConversionErrorKind::Unsupported, expected, found).into()
}

#[cfg(test)]
mod tests;
