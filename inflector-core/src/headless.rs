// inflector-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the inflector in one-shot mode.
//! Builds an `Inflector` from a config with the built-in filters and resolves
//! its target in a single call.

use anyhow::{Context, Result};

use crate::config::InflectorConfig;
use crate::registry::FilterRegistry;

/// Resolves `config.target` against the given key/value pairs.
///
/// # Arguments
///
/// * `config` - The inflector configuration (target, identifier, policy, rules).
/// * `source` - Values for the dynamic and overridable specs.
pub fn headless_inflect<I, K, V>(config: &InflectorConfig, source: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let inflector = config
        .build(FilterRegistry::shared_builtins())
        .context("Failed to build inflector from config")?;
    let inflected = inflector
        .filter_pairs(source)
        .with_context(|| format!("Failed to inflect target '{}'", config.target))?;
    Ok(inflected)
}
