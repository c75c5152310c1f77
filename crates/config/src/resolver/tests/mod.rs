//! Tests for the resolver.
//!
//! Responsibilities:
//! - Test source precedence (environment, explicit input, root value, default).
//! - Test each classification code and the first-violation-wins ordering.
//! - Test the runtime environment and transforms through the server schema.
//!
//! Invariants:
//! - Tests pass explicit environment mappings and never touch the process environment.

use serde_json::Value;

use super::source::EnvMapping;
use crate::presets::server_schema;
use crate::schema::Schema;


/// Base directory baked into the server schema's path transforms.
pub const BASE_DIR: &str = "/srv/app";

pub fn server() -> Schema {
    server_schema(BASE_DIR)
}

pub fn env(pairs: &[(&str, &str)]) -> EnvMapping {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Parse a JSON literal used as explicit input.
pub fn input(text: &str) -> Value {
    serde_json::from_str(text).expect("test input must be valid JSON")
}
