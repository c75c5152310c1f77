//! Declarative option schemas.
//!
//! Responsibilities:
//! - Describe each expected option with a `FieldDescriptor`.
//! - Keep fields in declaration order so failures are reported deterministically.
//! - Deserialize data-only schemas (JSON, YAML) while preserving key order.
//!
//! Does NOT handle:
//! - Resolving values (see `resolver`).
//! - Loading schema files from disk (callers hand over an already-parsed value).
//!
//! Invariants:
//! - Field names are unique; inserting an existing name replaces its descriptor
//!   without moving it.
//! - `arg` and `env` default to enabled; `required` defaults to false.
//! - The root receiver only counts when it names a declared field.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::constants::ROOT_KEY;
use crate::kind::Kind;
use crate::transform::Transform;
use crate::validator::Validator;

/// How a field is looked up in the environment mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvLookup {
    /// Look up the upper-cased field name.
    #[default]
    Enabled,
    /// Look up an explicitly named variable.
    Key(String),
    /// Never read from the environment.
    Disabled,
}

/// Rules for a single option.
#[derive(Clone)]
pub struct FieldDescriptor {
    default: Option<Value>,
    kinds: Vec<Kind>,
    arg: bool,
    env: EnvLookup,
    one_of: Option<Vec<Value>>,
    required: bool,
    validator: Option<Arc<dyn Validator>>,
    transform: Option<Arc<dyn Transform>>,
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldDescriptor {
    pub fn new() -> Self {
        Self {
            default: None,
            kinds: Vec::new(),
            arg: true,
            env: EnvLookup::Enabled,
            one_of: None,
            required: false,
            validator: None,
            transform: None,
        }
    }

    /// Set the value used when no other source supplies one.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Accept a single kind.
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kinds = vec![kind];
        self
    }

    /// Accept any of several kinds.
    pub fn kinds(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Allow or forbid values from the explicit options object.
    pub fn arg(mut self, allowed: bool) -> Self {
        self.arg = allowed;
        self
    }

    /// Enable or disable environment lookup under the upper-cased field name.
    pub fn env(mut self, enabled: bool) -> Self {
        self.env = if enabled {
            EnvLookup::Enabled
        } else {
            EnvLookup::Disabled
        };
        self
    }

    /// Look the field up under a specific environment variable.
    pub fn env_key(mut self, key: impl Into<String>) -> Self {
        self.env = EnvLookup::Key(key.into());
        self
    }

    /// Restrict the raw value to a set of permitted values.
    pub fn one_of(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.one_of = Some(values.into_iter().collect());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn get_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_kinds(&self) -> &[Kind] {
        &self.kinds
    }

    pub fn allows_arg(&self) -> bool {
        self.arg
    }

    pub fn env_lookup(&self) -> &EnvLookup {
        &self.env
    }

    pub fn get_one_of(&self) -> Option<&[Value]> {
        self.one_of.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn get_validator(&self) -> Option<&dyn Validator> {
        self.validator.as_deref()
    }

    pub fn get_transform(&self) -> Option<&dyn Transform> {
        self.transform.as_deref()
    }

    /// The environment variable consulted for `name`, if lookup is enabled.
    pub fn env_key_for(&self, name: &str) -> Option<String> {
        match &self.env {
            EnvLookup::Enabled => Some(name.to_uppercase()),
            EnvLookup::Key(key) => Some(key.clone()),
            EnvLookup::Disabled => None,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("default", &self.default)
            .field("kinds", &self.kinds)
            .field("arg", &self.arg)
            .field("env", &self.env)
            .field("one_of", &self.one_of)
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .field("transform", &self.transform)
            .finish()
    }
}

/// An ordered set of named options plus an optional root receiver.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldDescriptor)>,
    root: Option<String>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Name the field that receives a bare (non-object) input value.
    pub fn with_root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: FieldDescriptor) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = descriptor,
            None => self.fields.push((name, descriptor)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// The declared root receiver, if it names a field of this schema.
    pub fn root(&self) -> Option<(&str, &FieldDescriptor)> {
        let name = self.root.as_deref()?;
        self.get(name).map(|descriptor| (name, descriptor))
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KindSpec {
    One(Kind),
    Many(Vec<Kind>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvSpec {
    Flag(bool),
    Key(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    #[serde(default)]
    default: Option<Value>,
    #[serde(default, rename = "type")]
    kind: Option<KindSpec>,
    #[serde(default)]
    arg: Option<bool>,
    #[serde(default)]
    env: Option<EnvSpec>,
    #[serde(default, rename = "enum")]
    one_of: Option<Vec<Value>>,
    #[serde(default)]
    required: bool,
}

impl From<RawField> for FieldDescriptor {
    fn from(raw: RawField) -> Self {
        let mut descriptor = FieldDescriptor::new().required(raw.required);
        descriptor.default = raw.default;
        descriptor.kinds = match raw.kind {
            Some(KindSpec::One(kind)) => vec![kind],
            Some(KindSpec::Many(kinds)) => kinds,
            None => Vec::new(),
        };
        if let Some(arg) = raw.arg {
            descriptor.arg = arg;
        }
        descriptor.env = match raw.env {
            None | Some(EnvSpec::Flag(true)) => EnvLookup::Enabled,
            Some(EnvSpec::Flag(false)) => EnvLookup::Disabled,
            Some(EnvSpec::Key(key)) => EnvLookup::Key(key),
        };
        descriptor.one_of = raw.one_of;
        descriptor
    }
}

impl<'de> Deserialize<'de> for FieldDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawField::deserialize(deserializer).map(FieldDescriptor::from)
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of option names to field descriptors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Schema, A::Error> {
        let mut schema = Schema::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == ROOT_KEY {
                let root: String = map.next_value()?;
                if root.is_empty() {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Str(&root),
                        &"a field name",
                    ));
                }
                schema.root = Some(root);
            } else {
                let descriptor: FieldDescriptor = map.next_value()?;
                schema.insert(key, descriptor);
            }
        }
        Ok(schema)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}
