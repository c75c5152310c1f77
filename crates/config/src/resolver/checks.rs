//! Per-field checks run on a merged candidate.
//!
//! Responsibilities:
//! - Enforce required-ness, declared kinds and enum membership.
//! - Run the custom validator and map its outcome onto `OptionsError`.
//!
//! Invariants:
//! - Checks run in the order required, type, enum, validator; the first failure wins.
//! - A present default satisfies `required`.
//! - The type check needs a value; the enum check does not, so an enum field
//!   with no value from any source fails with `enum`.
//! - Enum and validator see the raw value; transforms run later.

use serde_json::Value;
use tracing::trace;

use super::error::OptionsError;
use super::source::Candidate;
use crate::kind::{self, Kind};
use crate::schema::FieldDescriptor;
use crate::validator::Validation;

pub(crate) async fn check(
    name: &str,
    descriptor: &FieldDescriptor,
    candidate: &Candidate,
) -> Result<(), OptionsError> {
    let value = candidate.value.as_ref();

    if descriptor.is_required() && value.is_none() {
        return Err(OptionsError::Required {
            field: name.to_string(),
        });
    }

    if let Some(value) = value {
        check_kind(name, descriptor.get_kinds(), value)?;
    }

    if let Some(allowed) = descriptor.get_one_of() {
        check_enum(name, allowed, value)?;
    }

    if let Some(validator) = descriptor.get_validator() {
        trace!(field = name, "running custom validator");
        match validator.validate(value).await {
            Validation::Accept => {}
            Validation::Reject => {
                return Err(OptionsError::Validate {
                    field: name.to_string(),
                    code: None,
                    message: "rejected by validator".to_string(),
                });
            }
            Validation::RejectWith { code, message } => {
                return Err(OptionsError::Validate {
                    field: name.to_string(),
                    code: Some(code),
                    message,
                });
            }
        }
    }

    Ok(())
}

fn check_kind(name: &str, kinds: &[Kind], value: &Value) -> Result<(), OptionsError> {
    let Some(actual) = Kind::of(value) else {
        return Ok(());
    };
    if kinds.is_empty() || kinds.contains(&actual) {
        return Ok(());
    }
    Err(OptionsError::Type {
        field: name.to_string(),
        expected: kind::describe(kinds),
        actual,
    })
}

fn check_enum(name: &str, allowed: &[Value], value: Option<&Value>) -> Result<(), OptionsError> {
    if value.is_some_and(|value| allowed.contains(value)) {
        return Ok(());
    }
    Err(OptionsError::Enum {
        field: name.to_string(),
        value: value.cloned().unwrap_or(Value::Null),
        allowed: allowed
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::source::Source;
    use crate::validator::{validate_async, validate_with};
    use serde_json::json;

    fn supplied(value: Value) -> Candidate {
        Candidate {
            value: Some(value),
            source: Source::Arg,
        }
    }

    fn defaulted(value: Option<Value>) -> Candidate {
        Candidate {
            value,
            source: Source::Default,
        }
    }

    #[tokio::test]
    async fn test_required_without_value() {
        let descriptor = FieldDescriptor::new().required(true);
        let err = check("public", &descriptor, &defaulted(None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "/server/options/required");
    }

    #[tokio::test]
    async fn test_required_satisfied_by_default() {
        let descriptor = FieldDescriptor::new()
            .required(true)
            .default_value("public");
        check("public", &descriptor, &defaulted(Some(json!("public"))))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_type_mismatch_names_kinds() {
        let descriptor = FieldDescriptor::new().kinds([Kind::String, Kind::Boolean]);
        let err = check("public", &descriptor, &supplied(json!(25)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OptionsError::Type {
                field: "public".to_string(),
                expected: "string|boolean".to_string(),
                actual: Kind::Number,
            }
        );
    }

    #[tokio::test]
    async fn test_type_check_skipped_for_undefined() {
        let descriptor = FieldDescriptor::new().kind(Kind::Number);
        check("port", &descriptor, &defaulted(None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_enum_membership() {
        let descriptor = FieldDescriptor::new().one_of([json!("a"), json!("b")]);
        check("mode", &descriptor, &supplied(json!("a")))
            .await
            .unwrap();
        let err = check("mode", &descriptor, &supplied(json!("c")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "/server/options/enum");
    }

    #[tokio::test]
    async fn test_enum_rejects_undefined() {
        let descriptor = FieldDescriptor::new().one_of([json!("a"), json!("b")]);
        let err = check("mode", &descriptor, &defaulted(None))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OptionsError::Enum {
                field: "mode".to_string(),
                value: Value::Null,
                allowed: r#""a", "b""#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_type_checked_before_enum() {
        let descriptor = FieldDescriptor::new()
            .kind(Kind::String)
            .one_of([json!("a")]);
        let err = check("mode", &descriptor, &supplied(json!(1)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "/server/options/type");
    }

    #[tokio::test]
    async fn test_validator_sees_undefined() {
        let descriptor = FieldDescriptor::new().validator(validate_with(|value| value.is_some()));
        let err = check("public", &descriptor, &defaulted(None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "/server/options/validate");
    }

    #[tokio::test]
    async fn test_async_validator_custom_code() {
        let descriptor = FieldDescriptor::new().validator(validate_async(|_| async {
            Validation::reject_with("/server/options/fakeerror", "Hello world")
        }));
        let err = check("public", &descriptor, &supplied(json!("hello")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "/server/options/fakeerror");
        assert!(err.to_string().contains("Hello world"));
    }
}
