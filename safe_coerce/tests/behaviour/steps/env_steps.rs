//! Steps capturing the process environment and coercing the snapshot.

use anyhow::{Result, anyhow};
use rstest_bdd_macros::{given, when};
use safe_coerce::{EnvSource, KeyCase, Rule, Schema, TypeKind, coerce_in_place};
use test_helpers::env::EnvScope;

use super::value_parsing::unquote;
use crate::fixtures::CoercionWorld;

#[given("the environment variable {name} is {value}")]
fn environment_variable(world: &CoercionWorld, name: String, value: String) {
    let mut vars = world.env_vars.take().unwrap_or_default();
    vars.push((unquote(&name).to_owned(), unquote(&value).to_owned()));
    world.env_vars.set(vars);
}

#[given("a flag schema for {keys}")]
fn flag_schema(world: &CoercionWorld, keys: String) {
    let schema = unquote(&keys)
        .split(',')
        .fold(Schema::object(), |object, key| {
            object.field(key.trim(), Rule::default_of(TypeKind::Boolean, false))
        })
        .with_key_case(KeyCase::Upper);
    world.schema.set(schema.into());
}

#[when("I capture the environment with prefix {prefix}")]
fn capture_environment(world: &CoercionWorld, prefix: String) {
    let wanted = unquote(&prefix);
    let vars = world.env_vars.take().unwrap_or_default();
    let scope = vars
        .into_iter()
        .fold(EnvScope::locked().clear_prefix(wanted), |held, (key, value)| {
            held.set(key, value)
        });
    let snapshot = EnvSource::prefixed(wanted).snapshot();
    drop(scope);
    world.snapshot.set(snapshot);
}

#[when("I coerce the snapshot")]
fn coerce_snapshot(world: &CoercionWorld) -> Result<()> {
    let snapshot = world
        .snapshot
        .get()
        .ok_or_else(|| anyhow!("no environment snapshot captured"))?;
    let outcome = world
        .schema
        .with_ref(|schema| snapshot.coerce(schema))
        .ok_or_else(|| anyhow!("no schema configured"))?;
    world.result.set(outcome);
    Ok(())
}

#[when("I rewrite the snapshot in place")]
fn rewrite_snapshot(world: &CoercionWorld) -> Result<()> {
    let mut snapshot = world
        .snapshot
        .get()
        .ok_or_else(|| anyhow!("no environment snapshot captured"))?;
    let outcome = world
        .schema
        .with_ref(|schema| coerce_in_place(&mut snapshot, schema))
        .ok_or_else(|| anyhow!("no schema configured"))?;
    world.result.set(outcome.map(|()| snapshot.to_value()));
    Ok(())
}
