//! Runtime environment name (development, test, production).
//!
//! Responsibilities:
//! - Parse and display the runtime environment name.
//! - Provide the permitted set used as the enum of the `env` field.
//!
//! Does NOT handle:
//! - Reading `NODE_ENV` from the process (callers pass an explicit mapping).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The environment the configured program runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Test,
        Environment::Production,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// The permitted values as JSON strings, for use with `FieldDescriptor::one_of`.
    pub fn enum_values() -> Vec<Value> {
        Self::ALL
            .into_iter()
            .map(|env| Value::String(env.as_str().to_string()))
            .collect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an environment name is not one of the permitted values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment '{0}' (expected development, test or production)")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| UnknownEnvironment(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_environments() {
        assert_eq!("development".parse(), Ok(Environment::Development));
        assert_eq!("test".parse(), Ok(Environment::Test));
        assert_eq!("production".parse(), Ok(Environment::Production));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("abc".parse::<Environment>().is_err());
        assert!("Production".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn test_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert!(!Environment::default().is_production());
    }

    #[test]
    fn test_enum_values_cover_all() {
        let values = Environment::enum_values();
        assert_eq!(values.len(), 3);
        assert!(values.contains(&Value::String("test".to_string())));
    }
}
