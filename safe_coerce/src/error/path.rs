//! Locations of values inside nested input.

use std::fmt;

/// One step from a container to one of its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A mapping key.
    Key(String),
    /// A list position.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Path from the root of the coerced input to the value that failed.
///
/// The root itself renders as `$`; keys are joined with `.` and indices are
/// bracketed, so a failure inside `{"scores": [..]}` reads `scores[2]`.
///
/// # Examples
///
/// ```
/// use safe_coerce::{FieldPath, Segment};
///
/// let path = FieldPath::root()
///     .child(Segment::Key("info".into()))
///     .child(Segment::Key("school_id".into()));
/// assert_eq!(path.to_string(), "info.school_id");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The empty path addressing the root value.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` when the path addresses the root value.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend the path by one trailing segment.
    #[must_use]
    pub fn child(mut self, segment: Segment) -> Self {
        self.0.push(segment);
        self
    }

    /// Prefix the path with `segment`.
    ///
    /// Errors are built at the leaf and gain their location while they
    /// propagate back up through the containers.
    #[must_use]
    pub fn prefixed(mut self, segment: Segment) -> Self {
        self.0.insert(0, segment);
        self
    }

    /// Iterate over the segments from the root downwards.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 && matches!(segment, Segment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<Segment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
