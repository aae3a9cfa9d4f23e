//! Extension trait for user-defined values.

use std::any::Any;
use std::fmt::Debug;

use super::Value;

/// Object-safe view of a user-defined value stored in [`Value::Custom`].
///
/// Implementations must be `Send + Sync` so coerced structures can be shared
/// across threads like any other [`Value`].
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use safe_coerce::{CustomValue, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Port(u16);
///
/// impl CustomValue for Port {
///     fn type_name(&self) -> &'static str {
///         "port"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn eq_value(&self, other: &dyn CustomValue) -> bool {
///         other.as_any().downcast_ref::<Self>() == Some(self)
///     }
///
///     fn coerce_hint(&self) -> Option<Value> {
///         Some(Value::Integer(i64::from(self.0)))
///     }
/// }
///
/// let port = Value::Custom(Arc::new(Port(8080)));
/// assert_eq!(port.type_name(), "port");
/// assert_eq!(port.downcast_ref::<Port>(), Some(&Port(8080)));
/// ```
pub trait CustomValue: Send + Sync + Debug {
    /// Stable type name; values with the same name belong to the same
    /// [`crate::CustomType`].
    fn type_name(&self) -> &'static str;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality with another custom value of the same type name.
    ///
    /// The default treats distinct allocations as unequal.
    fn eq_value(&self, other: &dyn CustomValue) -> bool {
        let _ = other;
        false
    }

    /// Value the converter should use in place of `self`.
    ///
    /// This is the opt-in "coerce to self" capability: when it returns
    /// `Some`, conversion to any target type starts from the emitted value.
    fn coerce_hint(&self) -> Option<Value> {
        None
    }
}
