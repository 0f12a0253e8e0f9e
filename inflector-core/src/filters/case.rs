// inflector-core/src/filters/case.rs
//! Case-folding filters.
//! License: MIT OR APACHE 2.0

use serde_json::Value;

use crate::errors::InflectResult;
use crate::filter::{require_string, Filter};

/// Lowercases a string value. Non-strings are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl Filter for Lowercase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn filter(&self, value: Value) -> InflectResult<Value> {
        let input = require_string(self.name(), value)?;
        Ok(Value::String(input.to_lowercase()))
    }
}

/// Uppercases a string value. Non-strings are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uppercase;

impl Filter for Uppercase {
    fn name(&self) -> &str {
        "uppercase"
    }

    fn filter(&self, value: Value) -> InflectResult<Value> {
        let input = require_string(self.name(), value)?;
        Ok(Value::String(input.to_uppercase()))
    }
}
