//! Test helpers shared across the workspace.
//!
//! The [`env`] module serialises mutations of the process environment so
//! tests that capture an environment snapshot see only the variables they
//! set up themselves.

pub mod env;
