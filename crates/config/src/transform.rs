//! Post-validation value transforms.
//!
//! Responsibilities:
//! - Define the `Transform` trait applied to a field after every field validated.
//! - Provide the built-in `PathJoin` and `EnvSuffix` transforms.
//!
//! Invariants:
//! - Transforms never fail; validation already accepted the raw value.
//! - Non-string values pass through the built-in transforms unchanged.
//! - Enum and validator checks always see the value before transformation.

use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::environment::Environment;

/// Information available to a transform besides the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformContext {
    /// The resolved runtime environment for this call.
    pub environment: Environment,
}

/// A rewrite applied to a validated field value.
pub trait Transform: Send + Sync + fmt::Debug {
    fn apply(&self, value: Value, ctx: &TransformContext) -> Value;
}

/// Joins string values onto a base directory.
///
/// Absolute values replace the base, matching `Path::join`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathJoin {
    base: PathBuf,
}

impl PathJoin {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &std::path::Path {
        &self.base
    }
}

impl Transform for PathJoin {
    fn apply(&self, value: Value, _ctx: &TransformContext) -> Value {
        match value {
            Value::String(relative) => {
                Value::String(self.base.join(relative).to_string_lossy().into_owned())
            }
            other => other,
        }
    }
}

/// Decorates string values with the environment name outside production.
///
/// `"cache"` becomes `"cache-development"` with the default `-` separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSuffix {
    separator: String,
}

impl Default for EnvSuffix {
    fn default() -> Self {
        Self::new("-")
    }
}

impl EnvSuffix {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Transform for EnvSuffix {
    fn apply(&self, value: Value, ctx: &TransformContext) -> Value {
        match value {
            Value::String(s) if !ctx.environment.is_production() => {
                Value::String(format!("{}{}{}", s, self.separator, ctx.environment))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(environment: Environment) -> TransformContext {
        TransformContext { environment }
    }

    #[test]
    fn test_path_join_relative_string() {
        let transform = PathJoin::new("/srv/app");
        let out = transform.apply(json!("abc"), &ctx(Environment::Development));
        assert_eq!(out, json!("/srv/app/abc"));
    }

    #[test]
    fn test_path_join_absolute_string_replaces_base() {
        let transform = PathJoin::new("/srv/app");
        let out = transform.apply(json!("/var/www"), &ctx(Environment::Production));
        assert_eq!(out, json!("/var/www"));
    }

    #[test]
    fn test_path_join_passes_through_non_strings() {
        let transform = PathJoin::new("/srv/app");
        assert_eq!(
            transform.apply(json!(false), &ctx(Environment::Development)),
            json!(false)
        );
        assert_eq!(
            transform.apply(json!(25), &ctx(Environment::Development)),
            json!(25)
        );
    }

    #[test]
    fn test_env_suffix_outside_production() {
        let transform = EnvSuffix::default();
        assert_eq!(
            transform.apply(json!("cache"), &ctx(Environment::Development)),
            json!("cache-development")
        );
        assert_eq!(
            EnvSuffix::new(".").apply(json!("cache"), &ctx(Environment::Test)),
            json!("cache.test")
        );
    }

    #[test]
    fn test_env_suffix_leaves_production_and_non_strings() {
        let transform = EnvSuffix::default();
        assert_eq!(
            transform.apply(json!("cache"), &ctx(Environment::Production)),
            json!("cache")
        );
        assert_eq!(
            transform.apply(json!(true), &ctx(Environment::Development)),
            json!(true)
        );
    }
}
