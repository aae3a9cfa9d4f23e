//! Interop with `serde`: decoding JSON payloads and serialising results.

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::{Map, Value};

/// Decode a JSON document into an untyped [`Value`].
///
/// Numbers that fit in `i64` become [`Value::Integer`]; every other number
/// becomes [`Value::Float`]. Object key order follows `serde_json`'s map.
impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(flag) => Self::Bool(flag),
            JsonValue::Number(number) => number.as_i64().map_or_else(
                || number.as_f64().map_or(Self::Null, Self::Float),
                Self::Integer,
            ),
            JsonValue::String(text) => Self::Text(text),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(object) => Self::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect::<Map>(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Integer(number) => serializer.serialize_i64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Symbol(symbol) => serializer.serialize_str(symbol.as_str()),
            Self::Date(_) | Self::DateTime(_) | Self::Time(_) => {
                let text = self.to_text().unwrap_or_default();
                serializer.serialize_str(&text)
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
            Self::Custom(custom) => match custom.coerce_hint() {
                Some(hint) => hint.serialize(serializer),
                None => Err(S::Error::custom(format!(
                    "custom value of type `{}` has no serialisable representation",
                    custom.type_name()
                ))),
            },
        }
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}
