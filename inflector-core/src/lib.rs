// inflector-core/src/lib.rs
//! # Inflector Core Library
//!
//! `inflector-core` turns a target template with named placeholders into a
//! concrete string. Each placeholder is bound to a rule: either a static value
//! or a chain of filters that transform the caller-supplied value before it is
//! substituted.
//!
//! The library is pure and synchronous. It performs no I/O beyond optional
//! config-file loading and keeps no state between calls.
//!
//! ## Modules
//!
//! * `filter`: Defines the `Filter` trait and `FilterRef` chain elements.
//! * `filters`: Concrete filters (case folding, regex replace, word boundaries).
//! * `registry`: The `FilterRegistry` name to constructor table.
//! * `rule_stack`: The insertion-ordered `RuleStack` of spec to rule bindings.
//! * `inflector`: The `Inflector` orchestrating placeholder resolution.
//! * `replacement`: PCRE-style replacement template expansion.
//! * `config`: YAML configuration for building an `Inflector`.
//! * `headless`: One-shot convenience wrapper.
//! * `errors`: The `InflectError` enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use inflector_core::{FilterRef, Inflector, RuleValue};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), inflector_core::InflectError> {
//! let mut inflector = Inflector::new(":module/:controller/:action");
//! inflector.set_rules(vec![
//!     ("module", RuleValue::from("app")),
//!     (":controller", RuleValue::from(vec![FilterRef::from("lowercase")])),
//!     (":action", RuleValue::from("lowercase")),
//! ])?;
//!
//! let path = inflector.filter(&json!({"controller": "UserAccount", "action": "Create"}))?;
//! assert_eq!(path, "app/useraccount/create");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Core operations return `InflectError`. Config loading and the headless
//! helper use `anyhow::Error` with context attached.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod filter;
pub mod filters;
pub mod headless;
pub mod inflector;
pub mod registry;
pub mod replacement;
pub mod rule_stack;

/// Re-exports the configuration types used to build an inflector from YAML.
pub use config::{FilterConfig, InflectorConfig, RegexReplaceConfig, RuleBinding, RuleValueConfig};

/// Re-exports the custom error type for clear error reporting.
pub use errors::{InflectError, InflectResult};

pub use filter::{apply_chain, Filter, FilterRef, SharedFilter};
pub use filters::{CamelCaseToSeparator, Lowercase, RegexReplace, SeparatorToCamelCase, Uppercase};
pub use filters::regex_replace::MAX_PATTERN_LENGTH;

pub use inflector::{Inflector, RuleValue, DEFAULT_IDENTIFIER};
pub use registry::{FilterConstructor, FilterRegistry};
pub use rule_stack::{normalize_spec, Rule, RuleStack};

/// Re-exports the one-shot helper for non-interactive use.
pub use headless::headless_inflect;
