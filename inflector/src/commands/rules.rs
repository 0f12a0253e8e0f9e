//! `rules` command: prints a config's rule stack in substitution order.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use inflector_core::{FilterRegistry, Inflector, InflectorConfig, Rule};

/// Loads the config at `config_path` and writes its rule stack to stdout.
pub fn run_rules(config_path: &Path) -> Result<()> {
    let config = InflectorConfig::load_from_file(config_path)?;
    let inflector = config
        .build(FilterRegistry::shared_builtins())
        .context("Failed to build inflector from config")?;
    let stdout = io::stdout();
    write_rules(&mut stdout.lock(), &inflector)?;
    Ok(())
}

/// Writes one `spec<TAB>kind<TAB>detail` line per rule.
pub fn write_rules<W: Write>(writer: &mut W, inflector: &Inflector) -> io::Result<()> {
    for (spec, rule) in inflector.rules().stack_order() {
        match rule {
            Rule::Static(value) => writeln!(writer, "{}\tstatic\t{}", spec, value)?,
            Rule::Chain(chain) => {
                let names: Vec<&str> = chain.iter().map(|filter| filter.name()).collect();
                writeln!(writer, "{}\tchain\t{}", spec, names.join(" -> "))?;
            }
        }
    }
    Ok(())
}
