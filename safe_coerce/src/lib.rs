//! Schema-driven coercion of untyped boundary data into typed values.
//!
//! Environment variables, decoded JSON and command-line arguments arrive as
//! loosely typed text. This crate converts such input into strictly typed
//! [`Value`]s according to a [`Schema`]: a single [`Rule`], a mapping of keys
//! to schemas, or a sequence of schemas cycled across a list.
//!
//! ```
//! use safe_coerce::{Rule, Schema, TypeKind, Value, coerce};
//!
//! let schema = Schema::object()
//!     .field("role", Rule::required_of(TypeKind::Text))
//!     .field(
//!         "info",
//!         Schema::object().field("school_id", Rule::required_of(TypeKind::Integer)),
//!     );
//! let input: Value = serde_json::json!({
//!     "role": "teacher",
//!     "info": { "school_id": "1" }
//! })
//! .into();
//!
//! let typed = coerce(&input, &schema.into())?;
//! let info = typed.as_map().and_then(|m| m.get("info")).and_then(Value::as_map);
//! assert_eq!(info.and_then(|m| m.get("school_id")), Some(&Value::Integer(1)));
//! # Ok::<_, safe_coerce::CoerceError>(())
//! ```
//!
//! [`coerce`] never modifies its input. [`coerce_in_place`] rewrites any
//! [`Container`] slot by slot and reports
//! [`CoerceError::UnsupportedMutation`] for read-only sources such as an
//! [`EnvSnapshot`].

mod convert;
mod engine;
mod env;
mod error;
mod infer;
mod kind;
mod rule;
mod schema;
mod value;

pub use convert::{FALSE_LITERALS, TRUE_LITERALS, convert, parse_bool};
pub use engine::{Container, Shape, Slot, coerce, coerce_in_place};
pub use env::{EnvSnapshot, EnvSource};
pub use error::{
    CoerceError, CoerceResult, ConversionError, ConversionErrorKind, ErrorKind, FieldPath, Segment,
};
pub use infer::{infer, is_falsy, is_truthy};
pub use kind::{Coercible, CustomType, TypeKind};
pub use rule::{Constraint, Rule};
pub use schema::{ObjectSchema, Schema};
pub use value::{CustomValue, KeyCase, Map, Symbol, Value};
