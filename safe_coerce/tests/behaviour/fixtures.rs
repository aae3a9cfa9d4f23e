//! Shared fixtures for the behavioural scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use safe_coerce::{CoerceResult, EnvSnapshot, Schema, Value};

/// Scenario state threaded through the coercion steps.
#[derive(Debug, Default, ScenarioState)]
pub struct CoercionWorld {
    /// Schema under test.
    pub schema: Slot<Schema>,
    /// Environment variables to expose while capturing a snapshot.
    pub env_vars: Slot<Vec<(String, String)>>,
    /// Snapshot captured from the environment.
    pub snapshot: Slot<EnvSnapshot>,
    /// Outcome of the last coercion.
    pub result: Slot<CoerceResult<Value>>,
}

/// Creates an empty scenario state.
#[fixture]
pub fn world() -> CoercionWorld {
    CoercionWorld::default()
}
