//! Placeholder parsing shared by the step definitions.

use anyhow::{Context as _, Result};
use safe_coerce::{TypeKind, Value};

/// Strips one layer of matching double quotes from a placeholder.
pub(crate) fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Parses a type name such as `integer` or `boolean`.
pub(crate) fn parse_kind(name: &str) -> Result<TypeKind> {
    unquote(name)
        .parse()
        .with_context(|| format!("unknown type name {name}"))
}

/// Splits a quoted, comma-separated list into text values.
pub(crate) fn text_list(items: &str) -> Value {
    Value::List(
        unquote(items)
            .split(',')
            .map(|item| Value::from(item.trim()))
            .collect(),
    )
}
