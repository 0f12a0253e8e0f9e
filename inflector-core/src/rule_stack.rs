// inflector-core/src/rule_stack.rs
//! Ordered storage of placeholder rules.
//!
//! A `RuleStack` binds specs (normalized placeholder names) to rules and keeps
//! them in insertion order. That order is observable: the inflector walks the
//! stack front to back and applies substitutions in exactly that sequence.
//!
//! Positions are stable. Replacing or clearing a spec's rule content keeps the
//! spec at the position it was first inserted at; only `clear_rules` and
//! `set_rules` reset positions.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::errors::{InflectError, InflectResult};
use crate::filter::{apply_chain, FilterRef, SharedFilter};
use crate::registry::FilterRegistry;

/// Strips any leading `:` or `&` marker characters from a spec.
pub fn normalize_spec(spec: &str) -> &str {
    spec.trim_start_matches([':', '&'])
}

/// The rule bound to a single spec.
#[derive(Debug, Clone)]
pub enum Rule {
    /// A fixed replacement, used when the source carries no value for the spec.
    Static(String),
    /// Filters applied in order to the source value.
    Chain(Vec<SharedFilter>),
}

impl Rule {
    pub fn is_static(&self) -> bool {
        matches!(self, Rule::Static(_))
    }

    pub fn as_static(&self) -> Option<&str> {
        match self {
            Rule::Static(value) => Some(value),
            Rule::Chain(_) => None,
        }
    }

    pub fn chain(&self) -> Option<&[SharedFilter]> {
        match self {
            Rule::Static(_) => None,
            Rule::Chain(chain) => Some(chain),
        }
    }

    /// Runs `value` through the chain. Static rules return `value` untouched.
    pub fn apply(&self, value: Value) -> InflectResult<Value> {
        match self {
            Rule::Static(_) => Ok(value),
            Rule::Chain(chain) => apply_chain(chain, value),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    spec: String,
    rule: Rule,
}

/// An insertion-ordered collection of `(spec, rule)` bindings.
///
/// `positions` maps a spec to its index in `entries`; `entries[i].spec` is the
/// inverse. Both are updated together by every mutation.
#[derive(Debug, Clone)]
pub struct RuleStack {
    registry: Arc<FilterRegistry>,
    entries: Vec<Entry>,
    positions: HashMap<String, usize>,
}

impl Default for RuleStack {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStack {
    /// Creates an empty stack that resolves filter names against the built-ins.
    pub fn new() -> Self {
        Self::with_registry(FilterRegistry::shared_builtins())
    }

    pub fn with_registry(registry: Arc<FilterRegistry>) -> Self {
        Self {
            registry,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &Arc<FilterRegistry> {
        &self.registry
    }

    /// Replaces every entry with `bindings` in the order given. On error the
    /// stack is left as it was.
    pub fn set_rules<I, S>(&mut self, bindings: I) -> InflectResult<&mut Self>
    where
        I: IntoIterator<Item = (S, Vec<FilterRef>)>,
        S: AsRef<str>,
    {
        let mut staged = Self::with_registry(Arc::clone(&self.registry));
        staged.extend_from(bindings)?;
        *self = staged;
        Ok(self)
    }

    /// Adds each binding: new specs are appended, existing chains are extended.
    /// On error the stack is left as it was.
    pub fn add_rules<I, S>(&mut self, bindings: I) -> InflectResult<&mut Self>
    where
        I: IntoIterator<Item = (S, Vec<FilterRef>)>,
        S: AsRef<str>,
    {
        let mut staged = self.clone();
        staged.extend_from(bindings)?;
        *self = staged;
        Ok(self)
    }

    fn extend_from<I, S>(&mut self, bindings: I) -> InflectResult<()>
    where
        I: IntoIterator<Item = (S, Vec<FilterRef>)>,
        S: AsRef<str>,
    {
        for (spec, chain) in bindings {
            self.add_rule(spec.as_ref(), chain)?;
        }
        Ok(())
    }

    /// Replaces the spec's rule content with `chain`, keeping its position.
    pub fn set_rule(&mut self, spec: &str, chain: Vec<FilterRef>) -> InflectResult<&mut Self> {
        let resolved = self.resolve_chain(spec, chain)?;
        let spec = normalize_spec(spec);
        if let Some(position) = self.positions.get(spec).copied() {
            debug!("Clearing rule content for spec '{}' before replacement.", spec);
            self.entries[position].rule = Rule::Chain(Vec::new());
        }
        self.append_chain(spec, resolved);
        Ok(self)
    }

    /// Appends `chain` to the spec's existing chain, creating the spec if absent.
    pub fn add_rule(&mut self, spec: &str, chain: Vec<FilterRef>) -> InflectResult<&mut Self> {
        let resolved = self.resolve_chain(spec, chain)?;
        self.append_chain(normalize_spec(spec), resolved);
        Ok(self)
    }

    /// Binds the spec to a fixed string, overwriting any previous rule.
    pub fn set_static_rule(&mut self, spec: &str, value: impl Into<String>) -> &mut Self {
        let spec = normalize_spec(spec);
        let rule = Rule::Static(value.into());
        match self.positions.get(spec).copied() {
            Some(position) => self.entries[position].rule = rule,
            None => self.push(spec, rule),
        }
        self
    }

    /// Empties the stack and both indices.
    pub fn clear_rules(&mut self) -> &mut Self {
        self.entries.clear();
        self.positions.clear();
        self
    }

    /// Iterates `(spec, rule)` pairs in insertion order.
    pub fn stack_order(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|entry| (entry.spec.as_str(), &entry.rule))
    }

    pub fn get(&self, spec: &str) -> Option<&Rule> {
        self.position(spec).map(|position| &self.entries[position].rule)
    }

    pub fn position(&self, spec: &str) -> Option<usize> {
        self.positions.get(normalize_spec(spec)).copied()
    }

    pub fn spec_at(&self, position: usize) -> Option<&str> {
        self.entries.get(position).map(|entry| entry.spec.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve_chain(&self, spec: &str, chain: Vec<FilterRef>) -> InflectResult<Vec<SharedFilter>> {
        if chain.is_empty() {
            return Err(InflectError::Configuration(format!(
                "rule chain for spec '{}' is empty",
                normalize_spec(spec)
            )));
        }
        chain
            .into_iter()
            .map(|reference| match reference {
                FilterRef::Instance(filter) => Ok(filter),
                FilterRef::Named(name) => self.registry.resolve(&name),
            })
            .collect()
    }

    fn append_chain(&mut self, spec: &str, resolved: Vec<SharedFilter>) {
        let Some(position) = self.positions.get(spec).copied() else {
            self.push(spec, Rule::Chain(resolved));
            return;
        };
        match &mut self.entries[position].rule {
            Rule::Chain(chain) => chain.extend(resolved),
            rule @ Rule::Static(_) => {
                warn!("Spec '{}' had a static rule; replacing it with a filter chain.", spec);
                *rule = Rule::Chain(resolved);
            }
        }
    }

    fn push(&mut self, spec: &str, rule: Rule) {
        self.positions.insert(spec.to_string(), self.entries.len());
        self.entries.push(Entry {
            spec: spec.to_string(),
            rule,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Lowercase, Uppercase};

    fn chain_len(stack: &RuleStack, spec: &str) -> usize {
        stack.get(spec).and_then(Rule::chain).map_or(0, <[_]>::len)
    }

    fn assert_indices_consistent(stack: &RuleStack) {
        assert_eq!(stack.positions.len(), stack.entries.len());
        for (spec, &position) in &stack.positions {
            assert_eq!(stack.spec_at(position), Some(spec.as_str()));
        }
    }

    #[test]
    fn test_normalize_spec() {
        assert_eq!(normalize_spec(":module"), "module");
        assert_eq!(normalize_spec("&:&action"), "action");
        assert_eq!(normalize_spec("plain:name"), "plain:name");
    }

    #[test]
    fn test_stack_order_is_insertion_order() {
        let mut stack = RuleStack::new();
        stack.set_static_rule("zeta", "z");
        stack.add_rule(":alpha", vec!["lowercase".into()]).unwrap();
        stack.set_static_rule("mid", "m");
        let specs: Vec<&str> = stack.stack_order().map(|(spec, _)| spec).collect();
        assert_eq!(specs, vec!["zeta", "alpha", "mid"]);
        assert_indices_consistent(&stack);
    }

    #[test]
    fn test_add_rule_extends_existing_chain() {
        let mut stack = RuleStack::new();
        stack.add_rule("module", vec!["lowercase".into()]).unwrap();
        stack
            .add_rule(":module", vec![FilterRef::instance(Uppercase), "lowercase".into()])
            .unwrap();
        assert_eq!(chain_len(&stack, "module"), 3);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_set_rule_replaces_chain_and_keeps_position() {
        let mut stack = RuleStack::new();
        stack.add_rule("first", vec!["lowercase".into(), "uppercase".into()]).unwrap();
        stack.add_rule("second", vec!["lowercase".into()]).unwrap();
        stack.set_rule("first", vec![FilterRef::instance(Lowercase)]).unwrap();
        assert_eq!(chain_len(&stack, "first"), 1);
        assert_eq!(stack.position("first"), Some(0));
        assert_eq!(stack.spec_at(1), Some("second"));
        assert_indices_consistent(&stack);
    }

    #[test]
    fn test_set_static_rule_overwrites_chain_in_place() {
        let mut stack = RuleStack::new();
        stack.add_rule("a", vec!["lowercase".into()]).unwrap();
        stack.add_rule("b", vec!["lowercase".into()]).unwrap();
        stack.set_static_rule(":a", "fixed");
        assert_eq!(stack.get("a").and_then(Rule::as_static), Some("fixed"));
        assert_eq!(stack.position("a"), Some(0));
    }

    #[test]
    fn test_chain_added_to_static_rule_replaces_it() {
        let mut stack = RuleStack::new();
        stack.set_static_rule("a", "fixed");
        stack.add_rule("a", vec!["lowercase".into()]).unwrap();
        assert_eq!(chain_len(&stack, "a"), 1);
        assert!(!stack.get("a").unwrap().is_static());
    }

    #[test]
    fn test_set_rules_discards_previous_entries() {
        let mut stack = RuleStack::new();
        stack.set_static_rule("old", "x");
        stack
            .set_rules(vec![
                ("b", vec![FilterRef::from("lowercase")]),
                ("a", vec![FilterRef::from("uppercase")]),
            ])
            .unwrap();
        let specs: Vec<&str> = stack.stack_order().map(|(spec, _)| spec).collect();
        assert_eq!(specs, vec!["b", "a"]);
        assert!(stack.get("old").is_none());
        assert_indices_consistent(&stack);
    }

    #[test]
    fn test_clear_rules() {
        let mut stack = RuleStack::new();
        stack.set_static_rule("a", "x");
        stack.clear_rules();
        assert!(stack.is_empty());
        assert_eq!(stack.position("a"), None);
    }

    #[test]
    fn test_unknown_filter_leaves_stack_untouched() {
        let mut stack = RuleStack::new();
        stack.add_rule("a", vec!["lowercase".into()]).unwrap();
        let err = stack.set_rule("a", vec!["no_such_filter".into()]).unwrap_err();
        assert!(matches!(err, InflectError::RegistryLookup(_)));
        assert_eq!(chain_len(&stack, "a"), 1);
    }

    #[test]
    fn test_failed_bulk_updates_keep_previous_entries() {
        let mut stack = RuleStack::new();
        stack.set_static_rule("old", "x");
        let err = stack
            .set_rules(vec![
                ("a", vec![FilterRef::from("lowercase")]),
                ("b", vec![FilterRef::from("nope")]),
            ])
            .unwrap_err();
        assert!(matches!(err, InflectError::RegistryLookup(_)));
        assert!(stack
            .add_rules(vec![
                ("c", vec![FilterRef::from("uppercase")]),
                ("d", Vec::new()),
            ])
            .is_err());
        let specs: Vec<&str> = stack.stack_order().map(|(spec, _)| spec).collect();
        assert_eq!(specs, vec!["old"]);
        assert_indices_consistent(&stack);
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let mut stack = RuleStack::new();
        let err = stack.add_rule("a", Vec::new()).unwrap_err();
        assert!(matches!(err, InflectError::Configuration(_)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_custom_registry_is_used_for_names() {
        let mut registry = FilterRegistry::new();
        registry.register("shout", || Box::new(Uppercase));
        let mut stack = RuleStack::with_registry(Arc::new(registry));
        stack.add_rule("a", vec!["shout".into()]).unwrap();
        assert!(stack.add_rule("a", vec!["lowercase".into()]).is_err());
    }
}
