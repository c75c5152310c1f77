//! Source merging: pick the raw candidate for each option.
//!
//! Responsibilities:
//! - Classify the explicit input as absent, an options object, or a root value.
//! - Choose each field's candidate from environment, explicit input or default.
//! - Coerce environment strings toward the field's declared kinds.
//!
//! Does NOT handle:
//! - Type, enum, required or custom checks (see `checks.rs`).
//!
//! Invariants:
//! - Precedence is environment > explicit input (object key or root value) > default.
//! - A field with `env: false` whose upper-cased key is present in the mapping fails
//!   with `noenv`; the mapping is otherwise ignored for that field.
//! - A value supplied for a field with `arg: false` fails with `noarg`.
//! - Explicit `null` counts as not supplied.

use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::fmt;

use super::error::OptionsError;
use crate::kind::Kind;
use crate::schema::{EnvLookup, FieldDescriptor, Schema};

/// Environment mapping handed to the resolver (variable name to value).
pub type EnvMapping = HashMap<String, String>;

/// Where a field's candidate value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Env,
    Arg,
    Root,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Env => "env",
            Source::Arg => "arg",
            Source::Root => "root",
            Source::Default => "default",
        })
    }
}

/// A field's raw value before checks, tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: Option<Value>,
    pub source: Source,
}

/// Shape of the explicit input.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Input<'a> {
    Empty,
    Object(&'a Map<String, Value>),
    Root(&'a Value),
}

/// Classify the explicit input once per call.
///
/// A bare value is only accepted when the schema declares a root receiver that
/// can hold something other than an object.
pub(crate) fn classify_input<'a>(
    schema: &Schema,
    input: Option<&'a Value>,
) -> Result<Input<'a>, OptionsError> {
    let value = match input {
        None | Some(Value::Null) => return Ok(Input::Empty),
        Some(Value::Object(map)) => return Ok(Input::Object(map)),
        Some(value) => value,
    };

    match schema.root() {
        None => Err(OptionsError::NotObject {
            message: format!(
                "options must be an object; got the bare value {} but no root option is declared",
                value
            ),
        }),
        Some((name, descriptor)) if descriptor.get_kinds() == [Kind::Object] => {
            Err(OptionsError::NotObject {
                message: format!(
                    "root option '{}' expects an object; got the bare value {}",
                    name, value
                ),
            })
        }
        Some(_) => Ok(Input::Root(value)),
    }
}

/// Compute one field's candidate.
pub(crate) fn merge(
    name: &str,
    descriptor: &FieldDescriptor,
    root: Option<&str>,
    input: Input<'_>,
    env: Option<&EnvMapping>,
) -> Result<Candidate, OptionsError> {
    if *descriptor.env_lookup() == EnvLookup::Disabled {
        let key = name.to_uppercase();
        if env.is_some_and(|mapping| mapping.contains_key(&key)) {
            return Err(OptionsError::NoEnv {
                field: name.to_string(),
                key,
            });
        }
    }

    if let (Some(key), Some(mapping)) = (descriptor.env_key_for(name), env) {
        if let Some(raw) = mapping.get(&key) {
            return Ok(Candidate {
                value: Some(coerce_env(raw, descriptor.get_kinds())),
                source: Source::Env,
            });
        }
    }

    let supplied = match input {
        Input::Object(map) => map
            .get(name)
            .filter(|value| !value.is_null())
            .map(|value| (value, Source::Arg)),
        Input::Root(value) if root == Some(name) => Some((value, Source::Root)),
        _ => None,
    };
    if let Some((value, source)) = supplied {
        if !descriptor.allows_arg() {
            return Err(OptionsError::NoArg {
                field: name.to_string(),
            });
        }
        return Ok(Candidate {
            value: Some(value.clone()),
            source,
        });
    }

    // Only the environment could have satisfied this field, and none was given.
    if env.is_none()
        && descriptor.is_required()
        && !descriptor.allows_arg()
        && descriptor.get_default().is_none()
    {
        if let Some(key) = descriptor.env_key_for(name) {
            return Err(OptionsError::NoEnv {
                field: name.to_string(),
                key,
            });
        }
    }

    Ok(Candidate {
        value: descriptor.get_default().filter(|v| !v.is_null()).cloned(),
        source: Source::Default,
    })
}

/// Convert an environment string toward the field's declared kinds.
///
/// Strings are kept when the field accepts strings or declares no kind. When no
/// conversion applies the raw string is returned and the type check rejects it.
pub(crate) fn coerce_env(raw: &str, kinds: &[Kind]) -> Value {
    if kinds.is_empty() || kinds.contains(&Kind::String) {
        return Value::String(raw.to_string());
    }

    kinds
        .iter()
        .find_map(|kind| coerce_as(raw, *kind))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

fn coerce_as(raw: &str, kind: Kind) -> Option<Value> {
    let trimmed = raw.trim();
    match kind {
        Kind::Number => trimmed
            .parse::<i64>()
            .ok()
            .map(Value::from)
            .or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            }),
        Kind::Boolean => match trimmed {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Kind::Object | Kind::Array => serde_json::from_str::<Value>(trimmed)
            .ok()
            .filter(|value| Kind::of(value) == Some(kind)),
        Kind::String => Some(Value::String(raw.to_string())),
    }
}
