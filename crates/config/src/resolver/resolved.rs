//! The result of a successful resolution.
//!
//! Invariants:
//! - Contains exactly the schema's fields, in declaration order.
//! - Fields with no value from any source are kept but hold `None`; they are
//!   omitted when serialized.

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::environment::Environment;

/// Validated and transformed option values.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    fields: Vec<(String, Option<Value>)>,
    environment: Environment,
}

impl ResolvedConfig {
    pub(crate) fn new(fields: Vec<(String, Option<Value>)>, environment: Environment) -> Self {
        Self {
            fields,
            environment,
        }
    }

    /// The resolved value of `name`, if the field exists and holds a value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_ref())
    }

    /// True if `name` is a field of the schema this config was resolved from.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order, including those without a value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// The runtime environment used for transforms during this resolution.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// A JSON object of every field that holds a value.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|(name, value)| value.clone().map(|value| (name.clone(), value)))
            .collect();
        Value::Object(map)
    }

    /// Deserialize the resolved values into a typed struct.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.fields.iter().filter(|(_, value)| value.is_some());
        let mut map = serializer.serialize_map(Some(present.clone().count()))?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
