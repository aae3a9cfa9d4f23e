//! Behavioural step modules registered with `rstest-bdd`.

pub mod coercion_steps;
pub mod env_steps;
pub mod value_parsing;
