// inflector-core/src/inflector.rs
//! The `Inflector`: resolves a target template against caller-supplied values.
//!
//! A target such as `":module/:controller/:action"` contains placeholders made
//! of the replacement identifier followed by a spec. `Inflector::filter` walks
//! the rule stack in insertion order, works out a replacement for every spec
//! it can satisfy, then applies those replacements one after another to a
//! result seeded from the target. Each replacement runs on the output of the
//! previous one, so text introduced by an earlier substitution can be matched
//! by a later placeholder pattern.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

use crate::errors::{InflectError, InflectResult};
use crate::filter::{value_kind, FilterRef, SharedFilter};
use crate::registry::FilterRegistry;
use crate::replacement::{escape_literal, BackrefTemplate};
use crate::rule_stack::{normalize_spec, Rule, RuleStack};

/// The default replacement identifier.
pub const DEFAULT_IDENTIFIER: &str = ":";

/// The value side of a binding handed to `Inflector::set_rules`/`add_rules`.
///
/// Keys starting with the identifier's marker character are dynamic and route
/// to filter chains; a plain string under such a key is a filter name. Any
/// other key is static and must carry a plain string.
#[derive(Debug, Clone)]
pub enum RuleValue {
    Static(String),
    Filters(Vec<FilterRef>),
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Static(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Static(value)
    }
}

impl From<Vec<FilterRef>> for RuleValue {
    fn from(filters: Vec<FilterRef>) -> Self {
        RuleValue::Filters(filters)
    }
}

#[derive(Debug, Clone)]
pub struct Inflector {
    target: String,
    identifier: String,
    throw_on_unresolved: bool,
    rules: RuleStack,
}

impl Inflector {
    /// Creates an inflector with the default identifier, the exception policy
    /// enabled and an empty rule stack backed by the built-in filters.
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_rule_stack(target, RuleStack::new())
    }

    pub fn with_registry(target: impl Into<String>, registry: Arc<FilterRegistry>) -> Self {
        Self::with_rule_stack(target, RuleStack::with_registry(registry))
    }

    pub fn with_rule_stack(target: impl Into<String>, rules: RuleStack) -> Self {
        Self::with_options(target, DEFAULT_IDENTIFIER, true, rules)
    }

    pub fn with_options(
        target: impl Into<String>,
        identifier: impl Into<String>,
        throw_on_unresolved: bool,
        rules: RuleStack,
    ) -> Self {
        Self {
            target: target.into(),
            identifier: identifier.into(),
            throw_on_unresolved,
            rules,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_target(&mut self, target: impl Into<String>) -> &mut Self {
        self.target = target.into();
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Replaces the identifier. An empty identifier is rejected.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> InflectResult<&mut Self> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(InflectError::Configuration("replacement identifier must not be empty".to_string()));
        }
        self.identifier = identifier;
        Ok(self)
    }

    pub fn throw_on_unresolved(&self) -> bool {
        self.throw_on_unresolved
    }

    pub fn set_throw_on_unresolved(&mut self, enabled: bool) -> &mut Self {
        self.throw_on_unresolved = enabled;
        self
    }

    pub fn rules(&self) -> &RuleStack {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleStack {
        &mut self.rules
    }

    pub fn rule(&self, spec: &str) -> Option<&Rule> {
        self.rules.get(spec)
    }

    /// The filter at `index` in the spec's chain, if the spec has one.
    pub fn filter_at(&self, spec: &str, index: usize) -> Option<&SharedFilter> {
        self.rules.get(spec)?.chain()?.get(index)
    }

    /// Replaces all rules with `bindings`, ingested in order. On error the
    /// previous rules are kept.
    pub fn set_rules<I, K>(&mut self, bindings: I) -> InflectResult<&mut Self>
    where
        I: IntoIterator<Item = (K, RuleValue)>,
        K: AsRef<str>,
    {
        let staged = RuleStack::with_registry(Arc::clone(self.rules.registry()));
        self.ingest_all(staged, bindings)?;
        Ok(self)
    }

    /// Ingests `bindings` in order, routing each by its key's leading marker.
    /// On error no binding from this call is kept.
    pub fn add_rules<I, K>(&mut self, bindings: I) -> InflectResult<&mut Self>
    where
        I: IntoIterator<Item = (K, RuleValue)>,
        K: AsRef<str>,
    {
        let staged = self.rules.clone();
        self.ingest_all(staged, bindings)?;
        Ok(self)
    }

    pub fn set_rule(&mut self, spec: &str, chain: Vec<FilterRef>) -> InflectResult<&mut Self> {
        let spec = self.strip_marker(spec);
        self.rules.set_rule(spec, chain)?;
        Ok(self)
    }

    pub fn add_rule(&mut self, spec: &str, chain: Vec<FilterRef>) -> InflectResult<&mut Self> {
        let spec = self.strip_marker(spec);
        self.rules.add_rule(spec, chain)?;
        Ok(self)
    }

    pub fn set_static_rule(&mut self, spec: &str, value: impl Into<String>) -> &mut Self {
        let spec = self.strip_marker(spec);
        self.rules.set_static_rule(spec, value);
        self
    }

    pub fn clear_rules(&mut self) -> &mut Self {
        self.rules.clear_rules();
        self
    }

    fn marker(&self) -> Option<char> {
        self.identifier.chars().next()
    }

    fn is_dynamic_key(&self, key: &str) -> bool {
        self.marker().is_some_and(|marker| key.starts_with(marker))
    }

    /// Drops one leading identifier marker, so custom identifiers such as `%`
    /// normalize the same way `:` does.
    fn strip_marker<'k>(&self, key: &'k str) -> &'k str {
        match self.marker() {
            Some(marker) => key.strip_prefix(marker).unwrap_or(key),
            None => key,
        }
    }

    /// Ingests into `staged` and swaps it in only if every binding succeeds.
    fn ingest_all<I, K>(&mut self, staged: RuleStack, bindings: I) -> InflectResult<()>
    where
        I: IntoIterator<Item = (K, RuleValue)>,
        K: AsRef<str>,
    {
        let previous = std::mem::replace(&mut self.rules, staged);
        for (key, value) in bindings {
            if let Err(e) = self.ingest(key.as_ref(), value) {
                self.rules = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    fn ingest(&mut self, key: &str, value: RuleValue) -> InflectResult<()> {
        if self.is_dynamic_key(key) {
            let spec = self.strip_marker(key);
            let chain = match value {
                RuleValue::Filters(filters) => filters,
                RuleValue::Static(name) => vec![FilterRef::Named(name)],
            };
            debug!("Ingesting dynamic rule '{}' with {} filter(s).", spec, chain.len());
            self.rules.add_rule(spec, chain)?;
        } else {
            match value {
                RuleValue::Static(literal) => {
                    debug!("Ingesting static rule '{}'.", key);
                    self.rules.set_static_rule(key, literal);
                }
                RuleValue::Filters(_) => {
                    return Err(InflectError::Configuration(format!(
                        "rule '{}' is static but was given a filter chain; prefix it with '{}' to make it dynamic",
                        key, self.identifier
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolves the target against `source`, which must be a JSON object whose
    /// values are all strings.
    pub fn filter(&self, source: &Value) -> InflectResult<String> {
        if self.identifier.is_empty() {
            return Err(InflectError::Configuration("replacement identifier must not be empty".to_string()));
        }
        let source = normalize_source(source)?;
        let quoted_identifier = regex::escape(&self.identifier);

        let mut queued: Vec<(&str, String)> = Vec::with_capacity(self.rules.len());
        for (spec, rule) in self.rules.stack_order() {
            let replacement = match (source.get(spec), rule) {
                (Some(value), Rule::Static(_)) => value.to_string(),
                (Some(value), Rule::Chain(_)) => {
                    let output = rule.apply(Value::String(value.to_string()))?;
                    into_replacement(spec, output)?
                }
                (None, Rule::Static(literal)) => literal.clone(),
                (None, Rule::Chain(_)) => {
                    debug!("No source value for dynamic spec '{}'; nothing queued.", spec);
                    continue;
                }
            };
            queued.push((spec, escape_literal(&replacement)));
        }

        let mut inflected = self.target.clone();
        for (spec, replacement) in &queued {
            let pattern = format!("{}{}", quoted_identifier, spec);
            match RegexBuilder::new(&pattern).size_limit(10 * (1 << 20)).build() {
                Ok(re) => {
                    inflected = re
                        .replace_all(&inflected, BackrefTemplate(replacement))
                        .into_owned();
                }
                Err(e) if self.throw_on_unresolved => {
                    debug!("Placeholder pattern '{}' failed to compile: {}", pattern, e);
                    return Err(self.unresolved(spec, inflected));
                }
                Err(e) => {
                    warn!("Leaving placeholder for spec '{}' unresolved: {}", spec, e);
                }
            }
        }

        if self.throw_on_unresolved {
            if let Some(spec) = self.find_unresolved(&inflected, &quoted_identifier)? {
                return Err(self.unresolved(&spec, inflected));
            }
        }

        debug!("Inflected '{}' into '{}'.", self.target, inflected);
        Ok(inflected)
    }

    /// Convenience wrapper over `filter` for string key/value pairs.
    pub fn filter_pairs<I, K, V>(&self, pairs: I) -> InflectResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Value::String(value.into())))
            .collect();
        self.filter(&Value::Object(source))
    }

    /// Finds the first identifier still followed by a letter, returning the
    /// spec-like word after it.
    fn find_unresolved(&self, inflected: &str, quoted_identifier: &str) -> InflectResult<Option<String>> {
        let pattern = format!("{}([A-Za-z][A-Za-z0-9_]*)", quoted_identifier);
        let re = Regex::new(&pattern).map_err(|e| InflectError::PatternCompilation(pattern.clone(), e))?;
        Ok(re.captures(inflected).map(|caps| caps[1].to_string()))
    }

    fn unresolved(&self, spec: &str, partial: String) -> InflectError {
        InflectError::UnresolvedPlaceholder {
            identifier: self.identifier.clone(),
            spec: spec.to_string(),
            partial,
        }
    }
}

/// Checks the source shape and normalizes its keys. Later keys win when two
/// keys normalize to the same spec.
fn normalize_source(source: &Value) -> InflectResult<HashMap<&str, &String>> {
    let Value::Object(map) = source else {
        return Err(InflectError::InputType(format!(
            "source must be an object of strings, got {}",
            value_kind(source)
        )));
    };
    map.iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((normalize_spec(key), s)),
            other => Err(InflectError::InputType(format!(
                "source value for '{}' must be a string, got {}",
                key,
                value_kind(other)
            ))),
        })
        .collect()
}

fn into_replacement(spec: &str, output: Value) -> InflectResult<String> {
    match output {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(InflectError::InputType(format!(
            "filter chain for spec '{}' produced {}, expected a string",
            spec,
            value_kind(&other)
        ))),
    }
}
