//! `filters` command: lists the built-in filter names.

use std::io::{self, Write};

use inflector_core::FilterRegistry;

/// Writes every registered filter name, one per line, in sorted order.
pub fn write_filters<W: Write>(writer: &mut W, registry: &FilterRegistry) -> io::Result<()> {
    for name in registry.names() {
        writeln!(writer, "{}", name)?;
    }
    Ok(())
}

pub fn run_filters() -> io::Result<()> {
    let registry = FilterRegistry::shared_builtins();
    write_filters(&mut io::stdout().lock(), &registry)
}
