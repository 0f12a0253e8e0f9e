//! Configuration management for `inflector-core`.
//!
//! This module defines the serializable description of an inflector: its
//! target template, replacement identifier, exception policy and ordered rule
//! bindings. It handles YAML deserialization, validation and construction of a
//! live `Inflector`.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::errors::InflectResult;
use crate::filter::FilterRef;
use crate::filters::regex_replace::{compile_pattern, RegexReplace};
use crate::inflector::{Inflector, RuleValue, DEFAULT_IDENTIFIER};
use crate::registry::FilterRegistry;
use crate::rule_stack::{normalize_spec, RuleStack};

/// Inline options for a `regex_replace` filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegexReplaceConfig {
    pub patterns: Vec<String>,
    #[serde(default)]
    pub replacements: Vec<String>,
}

/// A filter reference as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FilterConfig {
    /// A registry name, e.g. `lowercase`.
    Named(String),
    /// An inline, configured regex-replace filter.
    RegexReplace { regex_replace: RegexReplaceConfig },
}

/// The value side of a rule binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RuleValueConfig {
    /// A literal (static key) or a single filter name (dynamic key).
    Literal(String),
    /// A filter chain; only valid under a dynamic key.
    Filters(Vec<FilterConfig>),
}

/// A single `key: value` rule binding. Order in the file is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleBinding {
    pub key: String,
    pub value: RuleValueConfig,
}

/// Represents the top-level configuration structure for an inflector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InflectorConfig {
    /// The target template, e.g. `":module/:controller/:action.phtml"`.
    pub target: String,
    #[serde(default = "default_identifier")]
    pub identifier: String,
    /// When true, an unresolved placeholder is an error instead of literal output.
    #[serde(default = "default_true")]
    pub throw_on_unresolved: bool,
    #[serde(default)]
    pub rules: Vec<RuleBinding>,
}

fn default_identifier() -> String {
    DEFAULT_IDENTIFIER.to_string()
}

fn default_true() -> bool {
    true
}

impl InflectorConfig {
    /// Loads an inflector configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading inflector config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!("Loaded {} rule binding(s) from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: InflectorConfig = serde_yml::from_str(text).context("Failed to parse inflector config")?;
        config.validate()?;
        debug!("Parsed config with target '{}'.", config.target);
        Ok(config)
    }

    /// Checks the config for problems, reporting all of them at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let mut static_keys = HashSet::new();

        if self.target.is_empty() {
            errors.push("The `target` field is empty.".to_string());
        }
        if self.identifier.is_empty() {
            errors.push("The `identifier` field is empty.".to_string());
        }

        let marker = self.identifier.chars().next();
        for binding in &self.rules {
            let is_dynamic = marker.is_some_and(|m| binding.key.starts_with(m));
            let bare = match marker {
                Some(m) if is_dynamic => binding.key.strip_prefix(m).unwrap_or(&binding.key),
                _ => binding.key.as_str(),
            };
            let spec = normalize_spec(bare);
            if spec.is_empty() {
                errors.push(format!("Rule key '{}' is empty after normalization.", binding.key));
                continue;
            }

            match &binding.value {
                RuleValueConfig::Literal(_) if !is_dynamic => {
                    if !static_keys.insert(spec.to_string()) {
                        errors.push(format!("Static rule '{}' is defined more than once.", spec));
                    }
                }
                RuleValueConfig::Literal(_) => {}
                RuleValueConfig::Filters(_) if !is_dynamic => {
                    errors.push(format!(
                        "Rule '{}' has a filter list but is not dynamic; prefix it with '{}'.",
                        binding.key, self.identifier
                    ));
                }
                RuleValueConfig::Filters(filters) => {
                    if filters.is_empty() {
                        errors.push(format!("Rule '{}' has an empty filter list.", binding.key));
                    }
                    for filter in filters {
                        if let FilterConfig::RegexReplace { regex_replace } = filter {
                            validate_regex_replace(&binding.key, regex_replace, &mut errors);
                        }
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Config validation failed:\n{}", errors.join("\n")))
        }
    }

    /// Builds an `Inflector`, ingesting every binding in file order.
    pub fn build(&self, registry: Arc<FilterRegistry>) -> InflectResult<Inflector> {
        let mut inflector = Inflector::with_options(
            self.target.clone(),
            self.identifier.clone(),
            self.throw_on_unresolved,
            RuleStack::with_registry(registry),
        );
        let bindings = self
            .rules
            .iter()
            .map(|binding| Ok((binding.key.as_str(), binding.value.to_rule_value()?)))
            .collect::<InflectResult<Vec<_>>>()?;
        inflector.set_rules(bindings)?;
        debug!("Built inflector with {} rule(s).", inflector.rules().len());
        Ok(inflector)
    }
}

impl RuleValueConfig {
    fn to_rule_value(&self) -> InflectResult<RuleValue> {
        match self {
            RuleValueConfig::Literal(value) => Ok(RuleValue::Static(value.clone())),
            RuleValueConfig::Filters(filters) => filters
                .iter()
                .map(FilterConfig::to_filter_ref)
                .collect::<InflectResult<Vec<_>>>()
                .map(RuleValue::Filters),
        }
    }
}

impl FilterConfig {
    fn to_filter_ref(&self) -> InflectResult<FilterRef> {
        match self {
            FilterConfig::Named(name) => Ok(FilterRef::Named(name.clone())),
            FilterConfig::RegexReplace { regex_replace } => {
                let filter = RegexReplace::with_rules(&regex_replace.patterns, regex_replace.replacements.clone())?;
                Ok(FilterRef::instance(filter))
            }
        }
    }
}

fn validate_regex_replace(key: &str, config: &RegexReplaceConfig, errors: &mut Vec<String>) {
    if config.patterns.is_empty() {
        errors.push(format!("Rule '{}': regex_replace has no patterns.", key));
    }
    for pattern in &config.patterns {
        if let Err(e) = compile_pattern(pattern) {
            errors.push(format!("Rule '{}': {}", key, e));
        }
    }
}
