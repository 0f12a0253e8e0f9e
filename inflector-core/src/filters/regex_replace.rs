// inflector-core/src/filters/regex_replace.rs
//! A `Filter` that applies an ordered list of regex replacements.
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::errors::{InflectError, InflectResult};
use crate::filter::{coerce_scalar, Filter};
use crate::replacement::BackrefTemplate;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Compiles a user-supplied pattern with the crate-wide length and size limits.
pub fn compile_pattern(pattern: &str) -> InflectResult<Regex> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(InflectError::Configuration(format!(
            "pattern length ({}) exceeds maximum allowed ({})",
            pattern.len(),
            MAX_PATTERN_LENGTH
        )));
    }
    RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| InflectError::PatternCompilation(pattern.to_string(), e))
}

/// Applies every registered pattern, in order, to the running value.
///
/// Each pattern replaces all of its occurrences. When there are fewer
/// replacement templates than patterns, the last template is reused for the
/// remaining patterns.
#[derive(Debug, Clone, Default)]
pub struct RegexReplace {
    patterns: Vec<Regex>,
    replacements: Vec<String>,
}

impl RegexReplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from parallel lists of patterns and replacement templates.
    pub fn with_rules<P, R>(patterns: P, replacements: R) -> InflectResult<Self>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let mut filter = Self::new();
        for pattern in patterns {
            filter.add_pattern(pattern.as_ref())?;
        }
        for replacement in replacements {
            filter.add_replacement(replacement);
        }
        Ok(filter)
    }

    pub(crate) fn from_compiled(patterns: Vec<Regex>, replacements: Vec<String>) -> Self {
        Self { patterns, replacements }
    }

    pub fn add_pattern(&mut self, pattern: &str) -> InflectResult<&mut Self> {
        self.patterns.push(compile_pattern(pattern)?);
        Ok(self)
    }

    pub fn add_replacement(&mut self, replacement: impl Into<String>) -> &mut Self {
        self.replacements.push(replacement.into());
        self
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }

    fn replacement_for(&self, index: usize) -> &str {
        self.replacements
            .get(index)
            .or_else(|| self.replacements.last())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Runs all patterns over `input` without any type checks.
    pub(crate) fn replace_all(&self, input: String) -> String {
        self.patterns
            .iter()
            .enumerate()
            .fold(input, |current, (index, pattern)| {
                let template = self.replacement_for(index);
                pattern
                    .replace_all(&current, BackrefTemplate(template))
                    .into_owned()
            })
    }
}

impl Filter for RegexReplace {
    fn name(&self) -> &str {
        "regex_replace"
    }

    fn filter(&self, value: Value) -> InflectResult<Value> {
        if self.patterns.is_empty() {
            return Err(InflectError::Configuration(
                "regex_replace filter has no match pattern registered".to_string(),
            ));
        }
        let input = coerce_scalar(self.name(), value)?;
        debug!(
            "Applying {} pattern(s) with {} replacement template(s).",
            self.patterns.len(),
            self.replacements.len()
        );
        Ok(Value::String(self.replace_all(input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replaces_every_occurrence() {
        let filter = RegexReplace::with_rules(["-"], ["_"]).unwrap();
        assert_eq!(filter.filter(json!("a-b-c")).unwrap(), json!("a_b_c"));
    }

    #[test]
    fn test_patterns_feed_into_each_other() {
        let filter = RegexReplace::with_rules(["a", "b"], ["b", "c"]).unwrap();
        assert_eq!(filter.filter(json!("ab")).unwrap(), json!("cc"));
    }

    #[test]
    fn test_last_replacement_is_reused() {
        let filter = RegexReplace::with_rules(["x", "y"], ["-"]).unwrap();
        assert_eq!(filter.filter(json!("xay")).unwrap(), json!("-a-"));
    }

    #[test]
    fn test_no_replacements_deletes_matches() {
        let filter = RegexReplace::with_rules(["o"], Vec::<String>::new()).unwrap();
        assert_eq!(filter.filter(json!("foo")).unwrap(), json!("f"));
    }

    #[test]
    fn test_unconfigured_filter_fails() {
        let err = RegexReplace::new().filter(json!("abc")).unwrap_err();
        assert!(matches!(err, InflectError::Configuration(_)));
    }

    #[test]
    fn test_numbers_are_coerced_and_arrays_rejected() {
        let filter = RegexReplace::with_rules(["0"], ["o"]).unwrap();
        assert_eq!(filter.filter(json!(100)).unwrap(), json!("1oo"));
        assert!(matches!(
            filter.filter(json!(["a"])).unwrap_err(),
            InflectError::InputType(_)
        ));
    }

    #[test]
    fn test_backreferences_in_templates() {
        let filter = RegexReplace::with_rules([r"(\w+)\.(\w+)"], [r"\2/$1"]).unwrap();
        assert_eq!(filter.filter(json!("index.phtml")).unwrap(), json!("phtml/index"));
    }

    #[test]
    fn test_invalid_and_oversized_patterns_are_rejected() {
        assert!(matches!(
            RegexReplace::new().add_pattern("(").unwrap_err(),
            InflectError::PatternCompilation(_, _)
        ));
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        assert!(matches!(
            RegexReplace::new().add_pattern(&long).unwrap_err(),
            InflectError::Configuration(_)
        ));
    }
}
