// inflector-core/src/filter.rs
//! Defines the core `Filter` trait and the references used to build filter chains.
//!
//! The `Filter` trait provides a pluggable interface for value transforms
//! (lowercasing, regex replacement, word-case conversion). Rules in a
//! `RuleStack` hold chains of shared filter handles, so every filter must be
//! `Send + Sync` and immutable once configured.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{InflectError, InflectResult};

/// A single transform from one value to another.
pub trait Filter: Send + Sync + fmt::Debug {
    /// The name this filter is known by, used in logs and rule listings.
    fn name(&self) -> &str;

    /// Transforms `value`, or fails if the value has the wrong shape or the
    /// filter is not configured.
    fn filter(&self, value: Value) -> InflectResult<Value>;

    /// Initializes configuration-independent defaults.
    ///
    /// Called by the registry on every freshly constructed instance.
    fn defaults(&mut self) {}
}

/// A live, shareable filter instance.
pub type SharedFilter = Arc<dyn Filter>;

/// One element of a rule chain as supplied by a caller.
///
/// Named references are resolved against a `FilterRegistry` when the chain is
/// added to a rule stack, never at filter time.
#[derive(Debug, Clone)]
pub enum FilterRef {
    Instance(SharedFilter),
    Named(String),
}

impl FilterRef {
    /// Wraps a concrete filter into an instance reference.
    pub fn instance<F: Filter + 'static>(filter: F) -> Self {
        FilterRef::Instance(Arc::new(filter))
    }
}

impl From<&str> for FilterRef {
    fn from(name: &str) -> Self {
        FilterRef::Named(name.to_string())
    }
}

impl From<String> for FilterRef {
    fn from(name: String) -> Self {
        FilterRef::Named(name)
    }
}

impl From<SharedFilter> for FilterRef {
    fn from(filter: SharedFilter) -> Self {
        FilterRef::Instance(filter)
    }
}

/// Returns a short name for the JSON kind of `value`, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Unwraps a string value or reports which filter rejected what.
pub(crate) fn require_string(filter: &str, value: Value) -> InflectResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(InflectError::InputType(format!(
            "filter '{}' expects a string, got {}",
            filter,
            value_kind(&other)
        ))),
    }
}

/// Like `require_string`, but scalars are rendered to their string form first.
pub(crate) fn coerce_scalar(filter: &str, value: Value) -> InflectResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(InflectError::InputType(format!(
            "filter '{}' expects a scalar value, got {}",
            filter,
            value_kind(&other)
        ))),
    }
}

/// Runs `value` through every filter in `chain`, feeding each output into the next.
pub fn apply_chain(chain: &[SharedFilter], value: Value) -> InflectResult<Value> {
    chain.iter().try_fold(value, |current, filter| {
        log::trace!("Applying filter '{}'.", filter.name());
        filter.filter(current)
    })
}
