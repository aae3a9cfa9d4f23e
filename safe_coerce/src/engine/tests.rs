//! Tests for the schema walker and the in-place rewriter.

use rstest::{fixture, rstest};

use super::{Container, Shape, Slot, coerce, coerce_in_place};
use crate::error::{CoerceError, CoerceResult, ErrorKind, FieldPath, Segment};
use crate::kind::TypeKind;
use crate::rule::Rule;
use crate::schema::Schema;
use crate::value::{Map, Value};

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(entries.into_iter().collect())
}

fn texts(items: &[&str]) -> Value {
    Value::List(items.iter().copied().map(Value::from).collect())
}

fn path(segments: impl IntoIterator<Item = Segment>) -> FieldPath {
    segments.into_iter().collect()
}

fn key(name: &str) -> Segment {
    Segment::Key(name.to_owned())
}

#[fixture]
fn profile_schema() -> Schema {
    Schema::object()
        .field("role", Rule::required_of(TypeKind::Text))
        .field(
            "info",
            Schema::object()
                .field("school_id", Rule::required_of(TypeKind::Integer))
                .field("num_students", Rule::default_of(TypeKind::Integer, 0)),
        )
        .into()
}

#[fixture]
fn profile_input() -> Value {
    map([
        ("role", Value::from("teacher")),
        (
            "info",
            map([
                ("school_id", Value::from("1")),
                ("num_students", Value::from("100")),
            ]),
        ),
    ])
}

#[fixture]
fn profile_output() -> Value {
    map([
        ("role", Value::from("teacher")),
        (
            "info",
            map([
                ("school_id", Value::Integer(1)),
                ("num_students", Value::Integer(100)),
            ]),
        ),
    ])
}

#[fixture]
fn alternating() -> Schema {
    Schema::sequence([
        Rule::required_of(TypeKind::Integer),
        Rule::required_of(TypeKind::Boolean),
    ])
}

#[rstest]
fn coerces_nested_objects(profile_input: Value, profile_schema: Schema, profile_output: Value) {
    assert_eq!(
        coerce(&profile_input, &profile_schema).expect("coerces"),
        profile_output
    );
}

#[rstest]
fn coercion_does_not_touch_the_input(profile_input: Value, profile_schema: Schema) {
    let before = profile_input.clone();
    coerce(&profile_input, &profile_schema).expect("coerces");
    assert_eq!(profile_input, before);
}

#[rstest]
fn cycles_sequence_rules(alternating: Schema) {
    assert_eq!(
        coerce(&texts(&["1", "true", "3", "false"]), &alternating).expect("coerces"),
        Value::List(vec![
            Value::Integer(1),
            Value::Bool(true),
            Value::Integer(3),
            Value::Bool(false),
        ])
    );
}

#[test]
fn single_rule_sequence_applies_to_every_element() {
    let schema = Schema::sequence([Rule::required_of(TypeKind::Float)]);
    assert_eq!(
        coerce(&texts(&["5.0", "3.5", "4"]), &schema).expect("coerces"),
        Value::List(vec![Value::Float(5.0), Value::Float(3.5), Value::Float(4.0)])
    );
}

#[test]
fn nested_sequences_mix_schemas() {
    let schema = Schema::sequence([
        Schema::leaf(Rule::required_of(TypeKind::Boolean)),
        Schema::sequence([Rule::required_of(TypeKind::Integer)]),
    ]);
    let input = Value::List(vec![Value::from("yes"), texts(&["1", "2"])]);
    assert_eq!(
        coerce(&input, &schema).expect("coerces"),
        Value::List(vec![
            Value::Bool(true),
            Value::List(vec![Value::Integer(1), Value::Integer(2)]),
        ])
    );
}

#[test]
fn absent_keys_follow_the_rule_policy() {
    let schema: Schema = Schema::object()
        .field("flag", Rule::default_of(TypeKind::Boolean, false))
        .field("name", Rule::new(TypeKind::Text))
        .into();
    assert_eq!(
        coerce(&Value::Map(Map::new()), &schema).expect("defaults"),
        map([("flag", Value::Bool(false)), ("name", Value::Null)])
    );
    assert_eq!(
        coerce(&Value::Null, &schema).expect("null reads as empty mapping"),
        map([("flag", Value::Bool(false)), ("name", Value::Null)])
    );
}

#[test]
fn output_keeps_only_schema_keys_in_schema_order() {
    let schema: Schema = Schema::object()
        .field("b", Rule::new(TypeKind::Integer))
        .field("a", Rule::new(TypeKind::Integer))
        .into();
    let input = map([
        ("a", Value::from("1")),
        ("extra", Value::from("x")),
        ("b", Value::from("2")),
    ]);
    let output = coerce(&input, &schema).expect("coerces");
    let keys: Vec<_> = output.as_map().expect("map output").keys().collect();
    assert_eq!(keys, ["b", "a"]);
}

#[rstest]
fn null_sequence_input_is_an_empty_list(alternating: Schema) {
    assert_eq!(
        coerce(&Value::Null, &alternating).expect("empty list"),
        Value::List(Vec::new())
    );
}

#[rstest]
#[case(Value::from("text"), Schema::object().into())]
#[case(map([("a", Value::Null)]), Schema::sequence([Rule::new(TypeKind::Text)]))]
fn rejects_mismatched_shapes(#[case] input: Value, #[case] schema: Schema) {
    assert_eq!(
        coerce(&input, &schema).expect_err("shape mismatch").kind(),
        ErrorKind::Coercion
    );
}

#[test]
fn empty_sequence_schema_cannot_cycle() {
    let schema = Schema::Sequence(Vec::new());
    assert_eq!(
        coerce(&texts(&["1"]), &schema).expect_err("no rules").kind(),
        ErrorKind::InvalidRule
    );
    assert_eq!(
        coerce(&Value::List(Vec::new()), &schema).expect("nothing to cycle"),
        Value::List(Vec::new())
    );
}

#[test]
fn errors_carry_the_failing_path() {
    let schema: Schema = Schema::object()
        .field(
            "scores",
            Schema::sequence([Rule::required_of(TypeKind::Float)]),
        )
        .into();
    let input = map([("scores", texts(&["1.0", "2.0", "oops"]))]);
    let err = coerce(&input, &schema).expect_err("bad score");
    assert_eq!(err.kind(), ErrorKind::Coercion);
    assert_eq!(err.path(), &path([key("scores"), Segment::Index(2)]));
    assert_eq!(err.path().to_string(), "scores[2]");
}

#[rstest]
fn rewrites_nested_objects_in_place(
    mut profile_input: Value,
    profile_schema: Schema,
    profile_output: Value,
) {
    coerce_in_place(&mut profile_input, &profile_schema).expect("rewrites");
    assert_eq!(profile_input, profile_output);
}

#[rstest]
#[case(texts(&["1", "true", "3", "false"]), alternating())]
#[case(
    map([("scores", texts(&["5.0", "3.5"])), ("names", texts(&["a", "b"]))]),
    Schema::object()
        .field("scores", Schema::sequence([Rule::required_of(TypeKind::Float)]))
        .field("names", Schema::sequence([Rule::required_of(TypeKind::Text)]))
        .into()
)]
#[case(
    Value::List(vec![Value::Bool(false), texts(&["1", "2"]), map([("id", Value::from("7"))])]),
    Schema::sequence([
        Schema::leaf(Rule::required_of(TypeKind::Boolean).after(|v| Value::Bool(v.as_bool() != Some(true)))),
        Schema::sequence([Rule::required_of(TypeKind::Integer)]),
        Schema::object().field("id", Rule::required_of(TypeKind::Integer)).into(),
    ])
)]
#[case(
    map([("missing_list", Value::Null), ("flag", Value::from("on"))]),
    Schema::object()
        .field("missing_list", Schema::sequence([Rule::new(TypeKind::Integer)]))
        .field("flag", Rule::required_of(TypeKind::Boolean))
        .field("absent", Schema::object().field("x", Rule::default_of(TypeKind::Integer, 1)))
        .into()
)]
fn in_place_matches_pure_coercion(#[case] input: Value, #[case] schema: Schema) {
    let expected = coerce(&input, &schema).expect("pure coercion");
    let mut rewritten = input;
    coerce_in_place(&mut rewritten, &schema).expect("in-place coercion");
    assert_eq!(rewritten, expected);
}

#[test]
fn in_place_rejects_a_top_level_leaf() {
    let mut input = Value::from("1");
    let err = coerce_in_place(&mut input, &Schema::leaf(Rule::new(TypeKind::Integer)))
        .expect_err("leaf at top level");
    assert_eq!(err.kind(), ErrorKind::InvalidRule);
    assert_eq!(input, Value::from("1"));
}

#[test]
fn in_place_rejects_a_mismatched_root() {
    let mut input = texts(&["1"]);
    let err = coerce_in_place(&mut input, &Schema::object().into()).expect_err("list root");
    assert_eq!(err.kind(), ErrorKind::Coercion);
}

#[test]
fn in_place_failure_leaves_earlier_slots_rewritten() {
    let mut input = texts(&["1", "2", "x", "4"]);
    let schema = Schema::sequence([Rule::required_of(TypeKind::Integer)]);
    let err = coerce_in_place(&mut input, &schema).expect_err("bad element");
    assert_eq!(err.path(), &path([Segment::Index(2)]));
    assert_eq!(
        input,
        Value::List(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::from("x"),
            Value::from("4"),
        ])
    );
}

#[test]
fn in_place_keeps_keys_outside_the_schema() {
    let mut input = map([("port", Value::from("80")), ("note", Value::from("kept"))]);
    let schema: Schema = Schema::object()
        .field("port", Rule::required_of(TypeKind::Integer))
        .into();
    coerce_in_place(&mut input, &schema).expect("rewrites");
    assert_eq!(
        input,
        map([("port", Value::Integer(80)), ("note", Value::from("kept"))])
    );
}

/// A mapping that can be read but never written.
struct Frozen(Map);

impl Container for Frozen {
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn read(&self, slot: Slot<'_>) -> Option<&Value> {
        match slot {
            Slot::Key(name) => self.0.get(name),
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

#[test]
fn read_only_containers_surface_the_mutation_error() {
    let mut frozen = Frozen([("port", Value::from("80"))].into_iter().collect());
    let schema: Schema = Schema::object()
        .field("port", Rule::required_of(TypeKind::Integer))
        .into();
    let err = coerce_in_place(&mut frozen, &schema).expect_err("read-only");
    assert_eq!(err, CoerceError::unsupported_mutation(key("port")));
    assert_eq!(frozen.0.get("port"), Some(&Value::from("80")));
    assert_eq!(
        coerce(&Value::Map(frozen.0.clone()), &schema).expect("pure coercion still works"),
        map([("port", Value::Integer(80))])
    );
}

#[test]
fn value_container_reports_shape_and_length() {
    let list = texts(&["a", "b"]);
    assert_eq!(list.shape(), Shape::Sequence);
    assert_eq!(Container::len(&list), 2);
    assert_eq!(Value::Integer(1).shape(), Shape::Other("integer"));
    assert!(Container::is_empty(&Value::Null));
}
