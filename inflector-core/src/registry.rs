//! registry.rs - Name to constructor table for filters.
//!
//! Rules may reference filters by name. A `FilterRegistry` maps those names to
//! zero-argument constructors and produces a fresh, defaulted instance on each
//! lookup. Registries are plain values: build one, register what you need, and
//! hand it to the rule stack behind an `Arc`.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use crate::errors::{InflectError, InflectResult};
use crate::filter::{Filter, SharedFilter};
use crate::filters::{CamelCaseToSeparator, Lowercase, RegexReplace, SeparatorToCamelCase, Uppercase};

/// A zero-argument constructor for a filter variant.
pub type FilterConstructor = Arc<dyn Fn() -> Box<dyn Filter> + Send + Sync>;

static BUILTINS: Lazy<Arc<FilterRegistry>> = Lazy::new(|| Arc::new(FilterRegistry::with_builtins()));

#[derive(Clone, Default)]
pub struct FilterRegistry {
    constructors: HashMap<String, FilterConstructor>,
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every filter shipped with this crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("lowercase", || Box::new(Lowercase));
        registry.register("uppercase", || Box::new(Uppercase));
        registry.register("regex_replace", || Box::new(RegexReplace::new()));
        registry.register("camel_case_to_underscore", || Box::new(CamelCaseToSeparator::underscore()));
        registry.register("camel_case_to_dash", || Box::new(CamelCaseToSeparator::dash()));
        registry.register("underscore_to_camel_case", || Box::new(SeparatorToCamelCase::underscore()));
        registry.register("dash_to_camel_case", || Box::new(SeparatorToCamelCase::dash()));
        registry
    }

    /// A shared, read-only registry of the built-in filters.
    pub fn shared_builtins() -> Arc<FilterRegistry> {
        Arc::clone(&BUILTINS)
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Filter> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.constructors.insert(name.clone(), Arc::new(constructor)).is_some() {
            debug!("Filter '{}' re-registered; previous constructor replaced.", name);
        }
        self
    }

    /// Instantiates the filter registered under `name`.
    pub fn resolve(&self, name: &str) -> InflectResult<SharedFilter> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| InflectError::RegistryLookup(name.to_string()))?;
        let mut filter = constructor();
        filter.defaults();
        debug!("Resolved filter '{}'.", name);
        Ok(Arc::from(filter))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
