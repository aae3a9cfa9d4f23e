//! Insertion-ordered string-keyed mapping.

use std::fmt;

use super::Value;

/// Key casing applied when reshaping mappings and schemas.
///
/// Environment variables are conventionally upper case while schemas are
/// usually written in lower case; converting one side lets them meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyCase {
    /// Keep keys untouched.
    #[default]
    Preserve,
    /// ASCII lower case.
    Lower,
    /// ASCII upper case.
    Upper,
}

impl KeyCase {
    /// Apply the casing to `key`.
    #[must_use]
    pub fn apply(self, key: &str) -> String {
        match self {
            Self::Preserve => key.to_owned(),
            Self::Lower => key.to_ascii_lowercase(),
            Self::Upper => key.to_ascii_uppercase(),
        }
    }
}

/// Mapping from text keys to values that remembers insertion order.
///
/// Equality ignores order: two maps are equal when they hold the same keys
/// bound to equal values.
///
/// # Examples
///
/// ```
/// use safe_coerce::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("b", Value::from(2));
/// map.insert("a", Value::from(1));
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Look up `key` for mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Bind `key` to `value`, returning the previous binding.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let name = key.into();
        if let Some(slot) = self.get_mut(&name) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let position = self
            .entries
            .iter()
            .position(|(candidate, _)| candidate == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Rebuild the map with every key recased.
    ///
    /// When two keys collapse onto the same cased key the later entry wins,
    /// keeping the position of the earlier one.
    ///
    /// # Examples
    ///
    /// ```
    /// use safe_coerce::{KeyCase, Map, Value};
    ///
    /// let map: Map = [("FLAG_0", Value::from("true"))].into_iter().collect();
    /// let lowered = map.with_key_case(KeyCase::Lower);
    /// assert!(lowered.contains_key("flag_0"));
    /// ```
    #[must_use]
    pub fn with_key_case(self, case: KeyCase) -> Self {
        self.entries
            .into_iter()
            .map(|(key, value)| (case.apply(&key), value))
            .collect()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| theirs == value))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
