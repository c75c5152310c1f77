//! Resolver orchestration.
//!
//! Responsibilities:
//! - Walk the schema in declaration order, merging and checking each field.
//! - Determine the runtime environment and apply field transforms.
//! - Assemble the `ResolvedConfig`.
//!
//! Does NOT handle:
//! - Reading the process environment or the working directory; callers pass
//!   an explicit mapping and bake paths into transforms.
//!
//! Invariants / Assumptions:
//! - Resolution is all-or-nothing: the first failing field aborts the call.
//! - No field's candidate depends on another field's resolved value. The only
//!   cross-field input is the runtime environment, read after all checks pass
//!   and used solely by transforms.
//! - The resolver keeps no state between calls.

use serde_json::Value;
use tracing::debug;

use super::checks::check;
use super::error::OptionsError;
use super::resolved::ResolvedConfig;
use super::source::{EnvMapping, Input, classify_input, merge};
use crate::constants::{ENVIRONMENT_FIELD, RESERVED_ENV_KEY};
use crate::environment::Environment;
use crate::schema::Schema;
use crate::transform::TransformContext;

/// Resolve `schema` against an explicit input and an environment mapping.
///
/// `input` is either an options object or a bare value bound to the schema's
/// root receiver. Passing `None` for `env` means no environment mapping was
/// supplied at all, which differs from an empty mapping for fields that can
/// only be set through the environment.
pub async fn resolve(
    schema: &Schema,
    input: Option<&Value>,
    env: Option<&EnvMapping>,
) -> Result<ResolvedConfig, OptionsError> {
    let mut resolver = Resolver::new(schema);
    resolver.input = input;
    resolver.env = env;
    resolver.resolve().await
}

/// Builder-style front for [`resolve`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    schema: &'a Schema,
    input: Option<&'a Value>,
    env: Option<&'a EnvMapping>,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            input: None,
            env: None,
        }
    }

    /// Set the explicit input (options object or root value).
    pub fn with_input(mut self, input: &'a Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the environment mapping.
    pub fn with_env(mut self, env: &'a EnvMapping) -> Self {
        self.env = Some(env);
        self
    }

    /// Run the resolution.
    pub async fn resolve(self) -> Result<ResolvedConfig, OptionsError> {
        let result = self.run().await;
        if let Err(ref err) = result {
            debug!(code = %err.code(), field = ?err.field(), "option resolution failed");
        }
        result
    }

    async fn run(self) -> Result<ResolvedConfig, OptionsError> {
        let input = classify_input(self.schema, self.input)?;
        if let Input::Object(map) = input {
            for key in map.keys().filter(|key| self.schema.get(key).is_none()) {
                debug!(key = %key, "ignoring undeclared option");
            }
        }
        let root = self.schema.root().map(|(name, _)| name);

        let mut fields = Vec::with_capacity(self.schema.len());
        for (name, descriptor) in self.schema.fields() {
            let candidate = merge(name, descriptor, root, input, self.env)?;
            debug!(field = name, source = %candidate.source, "merged option");
            check(name, descriptor, &candidate).await?;
            fields.push((name.to_string(), candidate.value));
        }

        let environment = self.environment(&fields)?;
        let ctx = TransformContext { environment };
        for ((_, value), (name, descriptor)) in fields.iter_mut().zip(self.schema.fields()) {
            let Some(transform) = descriptor.get_transform() else {
                continue;
            };
            if let Some(raw) = value.take() {
                let transformed = transform.apply(raw, &ctx);
                debug!(field = name, value = %transformed, "transformed option");
                *value = Some(transformed);
            }
        }

        Ok(ResolvedConfig::new(fields, environment))
    }

    /// The runtime environment for this call.
    ///
    /// A declared `env` field is authoritative. Without one, the reserved
    /// variable is read directly. Either way the value must name a known
    /// environment.
    fn environment(&self, fields: &[(String, Option<Value>)]) -> Result<Environment, OptionsError> {
        if self.schema.get(ENVIRONMENT_FIELD).is_some() {
            let declared = fields
                .iter()
                .find(|(name, _)| name == ENVIRONMENT_FIELD)
                .and_then(|(_, value)| value.as_ref());
            return match declared {
                Some(value) => value
                    .as_str()
                    .and_then(|raw| raw.parse().ok())
                    .ok_or_else(|| unknown_environment(value.clone())),
                None => Ok(Environment::default()),
            };
        }

        match self.env.and_then(|mapping| mapping.get(RESERVED_ENV_KEY)) {
            Some(raw) => raw
                .parse()
                .map_err(|_| unknown_environment(Value::String(raw.clone()))),
            None => Ok(Environment::default()),
        }
    }
}

fn unknown_environment(value: Value) -> OptionsError {
    OptionsError::Enum {
        field: ENVIRONMENT_FIELD.to_string(),
        value,
        allowed: Environment::enum_values()
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
