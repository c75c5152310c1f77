//! Schema-driven option resolution.
//!
//! Responsibilities:
//! - Merge a root value or explicit options object, an environment mapping and
//!   schema defaults into one `ResolvedConfig`.
//! - Report the first violation as an `OptionsError` with a stable code.
//!
//! Does NOT handle:
//! - Reading the process environment or parsing command lines (see `optschema-cli`).
//! - Loading schema files (callers deserialize a `Schema` themselves).
//!
//! Invariants / Assumptions:
//! - Environment > explicit input > default, per field.
//! - Fields are walked in declaration order and the first failure wins.

mod builder;
mod checks;
mod error;
mod resolved;
mod source;

#[cfg(test)]
mod tests;

pub use builder::{Resolver, resolve};
pub use error::{ErrorKind, ErrorReport, OptionsError};
pub use resolved::ResolvedConfig;
pub use source::EnvMapping;
