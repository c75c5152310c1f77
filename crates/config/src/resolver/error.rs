//! Error types for option resolution.
//!
//! Responsibilities:
//! - Define one error variant per classification kind.
//! - Expose the stable slash-delimited `code` that callers match on.
//!
//! Does NOT handle:
//! - Exit-code mapping for the command-line front end (see `optschema-cli`).
//!
//! Invariants:
//! - Built-in codes are `/server/options/<kind>`; kinds never change spelling.
//! - A code supplied by a custom validator is returned verbatim.
//! - Message text is informational only and not part of the contract.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::constants::CODE_PREFIX;
use crate::kind::Kind;

/// Classification of a resolution failure (final segment of the code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Type,
    Enum,
    NotObject,
    NoArg,
    NoEnv,
    Required,
    Validate,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Type => "type",
            ErrorKind::Enum => "enum",
            ErrorKind::NotObject => "notobject",
            ErrorKind::NoArg => "noarg",
            ErrorKind::NoEnv => "noenv",
            ErrorKind::Required => "required",
            ErrorKind::Validate => "validate",
        }
    }

    /// The full built-in code, e.g. `/server/options/type`.
    pub fn code(self) -> String {
        format!("{}/{}", CODE_PREFIX, self.as_str())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a resolution call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("option '{field}' must be of type {expected} but got {actual}")]
    Type {
        field: String,
        expected: String,
        actual: Kind,
    },

    #[error("option '{field}' must be one of [{allowed}] but got {value}")]
    Enum {
        field: String,
        value: Value,
        allowed: String,
    },

    #[error("{message}")]
    NotObject { message: String },

    #[error("option '{field}' cannot be passed as an argument")]
    NoArg { field: String },

    #[error("option '{field}' cannot be set through the environment variable {key}")]
    NoEnv { field: String, key: String },

    #[error("option '{field}' is required but no value was supplied")]
    Required { field: String },

    /// Rejected by a custom validator. `code` is set when the validator
    /// supplied its own classification.
    #[error("option '{field}' failed validation: {message}")]
    Validate {
        field: String,
        code: Option<String>,
        message: String,
    },
}

impl OptionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionsError::Type { .. } => ErrorKind::Type,
            OptionsError::Enum { .. } => ErrorKind::Enum,
            OptionsError::NotObject { .. } => ErrorKind::NotObject,
            OptionsError::NoArg { .. } => ErrorKind::NoArg,
            OptionsError::NoEnv { .. } => ErrorKind::NoEnv,
            OptionsError::Required { .. } => ErrorKind::Required,
            OptionsError::Validate { .. } => ErrorKind::Validate,
        }
    }

    /// The machine-matchable classification code.
    pub fn code(&self) -> String {
        match self {
            OptionsError::Validate {
                code: Some(code), ..
            } => code.clone(),
            other => other.kind().code(),
        }
    }

    /// The option that failed, when the failure belongs to a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            OptionsError::Type { field, .. }
            | OptionsError::Enum { field, .. }
            | OptionsError::NoArg { field }
            | OptionsError::NoEnv { field, .. }
            | OptionsError::Required { field }
            | OptionsError::Validate { field, .. } => Some(field),
            OptionsError::NotObject { .. } => None,
        }
    }

    /// A serializable summary for structured output.
    pub fn report(&self) -> ErrorReport<'_> {
        ErrorReport {
            code: self.code(),
            field: self.field(),
            message: self.to_string(),
        }
    }
}

/// Serializable `{code, field, message}` view of an [`OptionsError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport<'a> {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'a str>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_codes_use_prefix() {
        let cases = [
            (ErrorKind::Type, "/server/options/type"),
            (ErrorKind::Enum, "/server/options/enum"),
            (ErrorKind::NotObject, "/server/options/notobject"),
            (ErrorKind::NoArg, "/server/options/noarg"),
            (ErrorKind::NoEnv, "/server/options/noenv"),
            (ErrorKind::Required, "/server/options/required"),
            (ErrorKind::Validate, "/server/options/validate"),
        ];
        for (kind, code) in cases {
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_validate_custom_code_is_verbatim() {
        let err = OptionsError::Validate {
            field: "public".to_string(),
            code: Some("/server/options/fakeerror".to_string()),
            message: "Hello world".to_string(),
        };
        assert_eq!(err.code(), "/server/options/fakeerror");
        assert_eq!(err.kind(), ErrorKind::Validate);
    }

    #[test]
    fn test_validate_without_code_uses_generic() {
        let err = OptionsError::Validate {
            field: "public".to_string(),
            code: None,
            message: "rejected".to_string(),
        };
        assert_eq!(err.code(), "/server/options/validate");
    }

    #[test]
    fn test_field_accessor() {
        let err = OptionsError::NoArg {
            field: "env".to_string(),
        };
        assert_eq!(err.field(), Some("env"));

        let err = OptionsError::NotObject {
            message: "bare value".to_string(),
        };
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_report_serializes_code_and_message() {
        let err = OptionsError::Enum {
            field: "env".to_string(),
            value: json!("abc"),
            allowed: "development, test, production".to_string(),
        };
        let report = serde_json::to_value(err.report()).unwrap();
        assert_eq!(report["code"], "/server/options/enum");
        assert_eq!(report["field"], "env");
        assert!(report["message"].as_str().unwrap().contains("abc"));
    }
}
