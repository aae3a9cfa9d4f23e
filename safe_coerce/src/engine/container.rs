//! Structures the in-place engine can rewrite slot by slot.

use crate::error::{CoerceError, CoerceResult, Segment};
use crate::value::Value;

/// Address of one child inside a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot<'a> {
    /// A mapping key.
    Key(&'a str),
    /// A list position.
    Index(usize),
}

impl From<Slot<'_>> for Segment {
    fn from(slot: Slot<'_>) -> Self {
        match slot {
            Slot::Key(key) => Self::Key(key.to_owned()),
            Slot::Index(index) => Self::Index(index),
        }
    }
}

/// Structural shape of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Children are addressed by [`Slot::Key`].
    Mapping,
    /// Children are addressed by [`Slot::Index`].
    Sequence,
    /// Not a container; carries the runtime type name.
    Other(&'static str),
}

/// A mutable structure addressed by keys or positions.
///
/// [`crate::coerce_in_place`] reads each slot, recurses into nested
/// containers through [`Container::descend`] and overwrites leaves with
/// [`Container::write`]. Read-only sources implement `write` by returning
/// [`CoerceError::UnsupportedMutation`].
pub trait Container {
    /// Shape of the container itself.
    fn shape(&self) -> Shape;

    /// Number of children.
    fn len(&self) -> usize;

    /// Returns `true` when there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the child at `slot`.
    fn read(&self, slot: Slot<'_>) -> Option<&Value>;

    /// Replace the child at `slot`, inserting it when a key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::UnsupportedMutation`] when the slot cannot be
    /// written.
    fn write(&mut self, slot: Slot<'_>, value: Value) -> CoerceResult<()>;

    /// Borrow the nested container at `slot` for mutation.
    ///
    /// Returns `None` when the slot is absent or holds a scalar.
    fn descend(&mut self, slot: Slot<'_>) -> Option<&mut dyn Container>;
}

impl Container for Value {
    fn shape(&self) -> Shape {
        match self {
            Self::Map(_) => Shape::Mapping,
            Self::List(_) => Shape::Sequence,
            other => Shape::Other(other.type_name()),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::List(items) => items.len(),
            _ => 0,
        }
    }

    fn read(&self, slot: Slot<'_>) -> Option<&Self> {
        match (self, slot) {
            (Self::Map(map), Slot::Key(key)) => map.get(key),
            (Self::List(items), Slot::Index(index)) => items.get(index),
            _ => None,
        }
    }

    fn write(&mut self, slot: Slot<'_>, value: Self) -> CoerceResult<()> {
        let target = match (self, slot) {
            (Self::Map(map), Slot::Key(key)) => {
                map.insert(key, value);
                return Ok(());
            }
            (Self::List(items), Slot::Index(index)) => items.get_mut(index),
            _ => None,
        };
        match target {
            Some(existing) => {
                *existing = value;
                Ok(())
            }
            None => Err(CoerceError::unsupported_mutation(slot.into())),
        }
    }

    fn descend(&mut self, slot: Slot<'_>) -> Option<&mut dyn Container> {
        let child = match (self, slot) {
            (Self::Map(map), Slot::Key(key)) => map.get_mut(key),
            (Self::List(items), Slot::Index(index)) => items.get_mut(index),
            _ => None,
        }?;
        if matches!(child, Self::Map(_) | Self::List(_)) {
            let nested: &mut dyn Container = child;
            Some(nested)
        } else {
            None
        }
    }
}
