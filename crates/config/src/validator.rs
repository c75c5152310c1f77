//! Custom field validators.
//!
//! Responsibilities:
//! - Define the three-way `Validation` outcome of a custom validator.
//! - Define the `Validator` trait, which may suspend before answering.
//! - Provide closure adapters for synchronous and asynchronous validators.
//!
//! Invariants:
//! - Validators receive the raw candidate before any transform runs.
//! - Validators are called even when no source supplied a value (`None`).
//! - A custom rejection code is surfaced to the caller verbatim.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

/// Outcome of a custom validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The value is accepted unchanged.
    Accept,
    /// The value is rejected with the generic `validate` classification.
    Reject,
    /// The value is rejected with a caller-defined classification code.
    RejectWith { code: String, message: String },
}

impl Validation {
    pub fn reject_with(code: impl Into<String>, message: impl Into<String>) -> Self {
        Validation::RejectWith {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Validation::Accept)
    }
}

impl From<bool> for Validation {
    fn from(accepted: bool) -> Self {
        if accepted {
            Validation::Accept
        } else {
            Validation::Reject
        }
    }
}

impl From<()> for Validation {
    fn from(_: ()) -> Self {
        Validation::Accept
    }
}

/// A custom check run against a field's raw value.
pub trait Validator: Send + Sync {
    fn validate<'a>(&'a self, value: Option<&'a Value>) -> BoxFuture<'a, Validation>;
}

/// Adapter returned by [`validate_with`].
pub struct SyncValidator<F, R> {
    f: F,
    _outcome: PhantomData<fn() -> R>,
}

impl<F, R> Validator for SyncValidator<F, R>
where
    F: Fn(Option<&Value>) -> R + Send + Sync,
    R: Into<Validation>,
{
    fn validate<'a>(&'a self, value: Option<&'a Value>) -> BoxFuture<'a, Validation> {
        let outcome = (self.f)(value).into();
        futures::future::ready(outcome).boxed()
    }
}

impl<F, R> fmt::Debug for SyncValidator<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncValidator")
    }
}

/// Adapter returned by [`validate_async`].
pub struct AsyncValidator<F>(F);

impl<F, Fut, R> Validator for AsyncValidator<F>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: Into<Validation>,
{
    fn validate<'a>(&'a self, value: Option<&'a Value>) -> BoxFuture<'a, Validation> {
        (self.0)(value.cloned())
            .map(|outcome: R| -> Validation { outcome.into() })
            .boxed()
    }
}

impl<F> fmt::Debug for AsyncValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncValidator")
    }
}

/// Wraps a synchronous closure as a validator.
///
/// The closure may return `bool`, `()` or a [`Validation`].
pub fn validate_with<F, R>(f: F) -> SyncValidator<F, R>
where
    F: Fn(Option<&Value>) -> R + Send + Sync,
    R: Into<Validation>,
{
    SyncValidator {
        f,
        _outcome: PhantomData,
    }
}

/// Wraps an asynchronous closure as a validator.
///
/// The closure receives an owned copy of the value so the returned future
/// does not borrow from the resolver.
pub fn validate_async<F, Fut, R>(f: F) -> AsyncValidator<F>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: Into<Validation>,
{
    AsyncValidator(f)
}
