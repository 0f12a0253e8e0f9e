//! Implementations of the `inflector` subcommands.

pub mod filters;
pub mod render;
pub mod rules;
