//! errors.rs - Custom error types for the inflector-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `inflector-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InflectError {
    /// A value of the wrong shape reached a filter or `Inflector::filter`.
    #[error("Invalid input type: {0}")]
    InputType(String),

    /// A filter or rule was used before it was configured correctly.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A placeholder could not be resolved while the exception policy is enabled.
    #[error(
        "A replacement identifier '{identifier}' was found for spec '{spec}' inside the inflected target, \
         perhaps a rule was not satisfied with a target source? Unsatisfied inflected target: {partial}"
    )]
    UnresolvedPlaceholder {
        identifier: String,
        spec: String,
        partial: String,
    },

    /// A filter referenced by name is not present in the registry.
    #[error("Filter '{0}' is not registered")]
    RegistryLookup(String),

    #[error("Failed to compile pattern '{0}': {1}")]
    PatternCompilation(String, regex::Error),
}

/// Convenience alias used across the crate.
pub type InflectResult<T> = Result<T, InflectError>;
