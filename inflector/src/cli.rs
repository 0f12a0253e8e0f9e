//! This file defines the command-line interface (CLI) for the inflector application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "inflector",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve placeholder templates through ordered rules and filters",
    long_about = "Inflector resolves a target template such as ':module/:controller/:action' into a concrete string. Each placeholder is bound to a rule in a YAML config: either a static value or a chain of filters applied to the value supplied on the command line.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the inflector crates)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `inflector` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolves the configured target against the supplied values.
    #[command(about = "Resolves the configured target against the supplied values.")]
    Render(RenderCommand),

    /// Prints the rule stack of a config in substitution order.
    #[command(about = "Prints the rule stack of a config in substitution order.")]
    Rules(RulesCommand),

    /// Lists the filters that rules can reference by name.
    #[command(about = "Lists the filters that rules can reference by name.")]
    Filters,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderCommand {
    /// Path to the inflector configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "INFLECTOR_CONFIG", help = "Path to the inflector configuration file (YAML).")]
    pub config: PathBuf,

    /// Overrides the target template from the config.
    #[arg(long = "target", short = 't', value_name = "TEMPLATE", help = "Override the target template from the config.")]
    pub target: Option<String>,

    /// Source values as KEY=VALUE pairs.
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE", value_parser = parse_key_value, help = "Supply a source value as KEY=VALUE (repeatable).")]
    pub set: Vec<(String, String)>,

    /// A JSON object of source values; `--set` pairs take precedence.
    #[arg(long = "source-json", value_name = "FILE", help = "Read source values from a JSON object file ('-' for stdin).")]
    pub source_json: Option<PathBuf>,

    /// Leave unresolved placeholders in the output instead of failing.
    #[arg(long = "no-throw", help = "Leave unresolved placeholders in the output instead of failing.")]
    pub no_throw: bool,

    /// Write the result to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    /// Path to the inflector configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "INFLECTOR_CONFIG", help = "Path to the inflector configuration file (YAML).")]
    pub config: PathBuf,
}

/// Parses a `KEY=VALUE` argument. The value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert_eq!(parse_key_value("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_key_value("=x").is_err());
        assert!(parse_key_value("novalue").is_err());
    }
}
