// inflector-core/src/filters/mod.rs
//! This module contains the concrete `Filter` implementations.
//!
//! Each filter family lives in its own file and implements the `Filter`
//! trait. New filters become available to rules by name once they are
//! registered with a `FilterRegistry`.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod case;
pub mod regex_replace;
pub mod word;

pub use case::{Lowercase, Uppercase};
pub use regex_replace::RegexReplace;
pub use word::{CamelCaseToSeparator, SeparatorToCamelCase};
