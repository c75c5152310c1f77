//! Schema-driven configuration resolution.
//!
//! This crate resolves a flat option schema against three sources (an
//! environment mapping, an explicit options object or bare root value, and
//! declared defaults) into a validated configuration, failing with stable
//! classification codes such as `/server/options/type`.

pub mod constants;
pub mod environment;
pub mod kind;
pub mod presets;
mod resolver;
pub mod schema;
pub mod transform;
pub mod validator;

pub use environment::Environment;
pub use kind::Kind;
pub use presets::{PublicDir, ServerOptions, server_schema};
pub use resolver::{
    EnvMapping, ErrorKind, ErrorReport, OptionsError, ResolvedConfig, Resolver, resolve,
};
pub use schema::{EnvLookup, FieldDescriptor, Schema};
pub use transform::{EnvSuffix, PathJoin, Transform, TransformContext};
pub use validator::{Validation, Validator, validate_async, validate_with};
