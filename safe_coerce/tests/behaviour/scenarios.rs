//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{CoercionWorld, world};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/coercion.feature",
    fixtures = [world: CoercionWorld]
);
