//! Runtime value kinds used by the type check.
//!
//! Responsibilities:
//! - Classify a `serde_json::Value` into a closed set of kinds.
//! - Parse and display kind names as they appear in schema documents.
//!
//! Invariants:
//! - `null` has no kind; it is treated as "not supplied" by the resolver.
//! - Kind names are lower-case (`"boolean"`, `"number"`, `"string"`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The primitive type a field value may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    Number,
    String,
    Object,
    Array,
}

impl Kind {
    /// All kinds, in the order used when coercing environment strings.
    pub const ALL: [Kind; 5] = [
        Kind::Boolean,
        Kind::Number,
        Kind::String,
        Kind::Object,
        Kind::Array,
    ];

    /// Returns the kind of a value, or `None` for `null`.
    pub fn of(value: &Value) -> Option<Kind> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Kind::Boolean),
            Value::Number(_) => Some(Kind::Number),
            Value::String(_) => Some(Kind::String),
            Value::Object(_) => Some(Kind::Object),
            Value::Array(_) => Some(Kind::Array),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value kind '{0}' (expected boolean, number, string, object or array)")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Formats a list of kinds as `a|b|c` for error messages.
pub(crate) fn describe(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join("|")
}
