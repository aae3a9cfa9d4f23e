//! Steps building schemas, running coercions and checking their outcome.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{given, then, when};
use safe_coerce::{Map, Rule, Schema, TypeKind, Value, coerce, coerce_in_place, convert};

use super::value_parsing::{parse_kind, text_list, unquote};
use crate::fixtures::CoercionWorld;

fn profile(school_id: &str) -> Value {
    let info: Map = [("school_id", Value::from(unquote(school_id)))]
        .into_iter()
        .collect();
    let profile: Map = [("role", Value::from("teacher")), ("info", Value::Map(info))]
        .into_iter()
        .collect();
    Value::Map(profile)
}

fn run(world: &CoercionWorld, input: &Value) -> Result<()> {
    let outcome = world
        .schema
        .with_ref(|schema| coerce(input, schema))
        .ok_or_else(|| anyhow!("no schema configured"))?;
    world.result.set(outcome);
    Ok(())
}

#[given("a required {kind} rule")]
fn required_rule(world: &CoercionWorld, kind: String) -> Result<()> {
    world
        .schema
        .set(Schema::leaf(Rule::required_of(parse_kind(&kind)?)));
    Ok(())
}

#[given("an optional {kind} rule defaulting to {default}")]
fn optional_rule(world: &CoercionWorld, kind: String, default: String) -> Result<()> {
    let target = parse_kind(&kind)?;
    let typed_default = convert(&Value::from(unquote(&default)), &target)?;
    world
        .schema
        .set(Schema::leaf(Rule::default_of(target, typed_default)));
    Ok(())
}

#[given("a sequence schema cycling {kinds}")]
fn cycling_schema(world: &CoercionWorld, kinds: String) -> Result<()> {
    let rules = unquote(&kinds)
        .split(',')
        .map(|name| parse_kind(name).map(Rule::required_of))
        .collect::<Result<Vec<_>>>()?;
    world.schema.set(Schema::sequence(rules));
    Ok(())
}

#[given("the profile schema")]
fn profile_schema(world: &CoercionWorld) {
    world.schema.set(
        Schema::object()
            .field("role", Rule::required_of(TypeKind::Text))
            .field(
                "info",
                Schema::object().field("school_id", Rule::required_of(TypeKind::Integer)),
            )
            .into(),
    );
}

#[when("I coerce the text {raw}")]
fn coerce_text(world: &CoercionWorld, raw: String) -> Result<()> {
    run(world, &Value::from(unquote(&raw)))
}

#[when("I coerce a missing value")]
fn coerce_missing(world: &CoercionWorld) -> Result<()> {
    run(world, &Value::Null)
}

#[when("I coerce the list {items}")]
fn coerce_list(world: &CoercionWorld, items: String) -> Result<()> {
    run(world, &text_list(&items))
}

#[when("I coerce a profile with school id {school_id}")]
fn coerce_profile(world: &CoercionWorld, school_id: String) -> Result<()> {
    run(world, &profile(&school_id))
}

#[when("I rewrite a profile with school id {school_id} in place")]
fn rewrite_profile(world: &CoercionWorld, school_id: String) -> Result<()> {
    let mut input = profile(&school_id);
    let outcome = world
        .schema
        .with_ref(|schema| coerce_in_place(&mut input, schema))
        .ok_or_else(|| anyhow!("no schema configured"))?;
    world.result.set(outcome.map(|()| input));
    Ok(())
}

#[then("the result renders as {rendered}")]
fn result_renders_as(world: &CoercionWorld, rendered: String) -> Result<()> {
    let value = world
        .result
        .take()
        .ok_or_else(|| anyhow!("no coercion has run"))?
        .map_err(|err| anyhow!("coercion failed: {err}"))?;
    let expected = unquote(&rendered);
    ensure!(
        value.to_string() == expected,
        "unexpected result {value}; expected {expected}"
    );
    Ok(())
}

#[then("coercion fails with {kind}")]
fn coercion_fails_with(world: &CoercionWorld, kind: String) -> Result<()> {
    let outcome = world
        .result
        .with_ref(|result| result.as_ref().map_err(|err| format!("{:?}", err.kind())).err())
        .ok_or_else(|| anyhow!("no coercion has run"))?;
    let actual = outcome.ok_or_else(|| anyhow!("coercion unexpectedly succeeded"))?;
    ensure!(
        actual == kind.trim(),
        "unexpected error kind {actual}; expected {kind}"
    );
    Ok(())
}

#[then("the error path is {path}")]
fn error_path_is(world: &CoercionWorld, path: String) -> Result<()> {
    let actual = world
        .result
        .with_ref(|result| result.as_ref().err().map(|err| err.path().to_string()))
        .flatten()
        .ok_or_else(|| anyhow!("no coercion error recorded"))?;
    let expected = unquote(&path);
    ensure!(
        actual == expected,
        "unexpected error path {actual}; expected {expected}"
    );
    Ok(())
}
