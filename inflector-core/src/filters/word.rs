// inflector-core/src/filters/word.rs
//! Word-boundary filters: CamelCase to separated words and back.
//!
//! These are the usual companions of an inflector when turning class-like
//! names into paths (`UserAccount` -> `user-account`) or the reverse.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::errors::{InflectError, InflectResult};
use crate::filter::{require_string, Filter};
use crate::filters::regex_replace::RegexReplace;
use crate::replacement::escape_literal;

// Boundaries: an uppercase run followed by a capitalised word, and a lowercase
// letter or digit followed by an uppercase letter.
static CAMEL_BOUNDARIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(\p{Lu})(\p{Lu}\p{Ll})", r"(\p{Ll}|\p{Nd})(\p{Lu})"]
        .iter()
        .map(|p| Regex::new(p).expect("word boundary pattern is valid"))
        .collect()
});

/// Inserts a separator at every CamelCase word boundary.
#[derive(Debug, Clone)]
pub struct CamelCaseToSeparator {
    name: String,
    separator: String,
    inner: RegexReplace,
}

impl CamelCaseToSeparator {
    pub fn new(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        let template = format!("${{1}}{}${{2}}", escape_literal(&separator));
        Self {
            name: format!("camel_case_to_separator({})", separator),
            inner: RegexReplace::from_compiled(CAMEL_BOUNDARIES.clone(), vec![template]),
            separator,
        }
    }

    pub fn underscore() -> Self {
        Self::new("_").named("camel_case_to_underscore")
    }

    pub fn dash() -> Self {
        Self::new("-").named("camel_case_to_dash")
    }

    fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Filter for CamelCaseToSeparator {
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, value: Value) -> InflectResult<Value> {
        let input = require_string(&self.name, value)?;
        Ok(Value::String(self.inner.replace_all(input)))
    }
}

/// Drops a separator and upper-cases the lowercase letter that follows it,
/// as well as a lowercase letter at the start of the value.
#[derive(Debug, Clone)]
pub struct SeparatorToCamelCase {
    name: String,
    separator: String,
}

impl SeparatorToCamelCase {
    pub fn new(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        Self {
            name: format!("separator_to_camel_case({})", separator),
            separator,
        }
    }

    pub fn underscore() -> Self {
        Self {
            name: "underscore_to_camel_case".to_string(),
            separator: "_".to_string(),
        }
    }

    pub fn dash() -> Self {
        Self {
            name: "dash_to_camel_case".to_string(),
            separator: "-".to_string(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Filter for SeparatorToCamelCase {
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, value: Value) -> InflectResult<Value> {
        let input = require_string(&self.name, value)?;
        let pattern = format!(r"(?:^|{})(\p{{Ll}})", regex::escape(&self.separator));
        let re = Regex::new(&pattern)
            .map_err(|e| InflectError::PatternCompilation(pattern.clone(), e))?;
        let output = re.replace_all(&input, |caps: &Captures<'_>| caps[1].to_uppercase());
        Ok(Value::String(output.into_owned()))
    }
}
