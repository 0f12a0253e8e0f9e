//! Terminal output helpers for the inflector CLI.

pub mod output_format;
