//! `render` command: resolves a configured target into a concrete string.

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use inflector_core::{normalize_spec, FilterRegistry, Inflector, InflectorConfig};

use crate::ui::output_format::{info_msg, warn_msg};

/// Options for the ergonomic `run_render` API.
pub struct RenderOptions {
    pub config_path: PathBuf,
    pub target: Option<String>,
    pub pairs: Vec<(String, String)>,
    pub source_json: Option<PathBuf>,
    pub no_throw: bool,
    pub output_path: Option<PathBuf>,
    pub quiet: bool,
}

/// Builds the inflector, resolves the target and writes the result.
pub fn run_render(opts: RenderOptions) -> Result<()> {
    info!("Starting render operation.");

    let mut config = InflectorConfig::load_from_file(&opts.config_path)?;
    if let Some(target) = &opts.target {
        debug!("Overriding target '{}' with '{}'.", config.target, target);
        config.target = target.clone();
    }
    if opts.no_throw {
        config.throw_on_unresolved = false;
    }

    let inflector = config
        .build(FilterRegistry::shared_builtins())
        .context("Failed to build inflector from config")?;

    let source = collect_source(opts.source_json.as_deref(), &opts.pairs)?;
    debug!("Resolving target with {} source value(s).", source.len());
    if !opts.quiet {
        for key in unbound_keys(&inflector, &source) {
            warn_msg(format!("Source value '{}' does not match any rule and is ignored.", key));
        }
    }

    let inflected = inflector
        .filter(&Value::Object(source))
        .with_context(|| format!("Failed to inflect target '{}'", inflector.target()))?;

    write_output(opts.output_path.as_deref(), &inflected, opts.quiet)?;
    info!("Render operation completed.");
    Ok(())
}

/// Merges values from an optional JSON object file with `KEY=VALUE` pairs.
/// Pairs are applied last, so they override the file.
pub fn collect_source(json_path: Option<&Path>, pairs: &[(String, String)]) -> Result<Map<String, Value>> {
    let mut source = match json_path {
        Some(path) => read_source_json(path)?,
        None => Map::new(),
    };
    for (key, value) in pairs {
        source.insert(key.clone(), Value::String(value.clone()));
    }
    Ok(source)
}

/// Source keys whose normalized spec has no rule in the stack.
pub fn unbound_keys<'a>(inflector: &Inflector, source: &'a Map<String, Value>) -> Vec<&'a str> {
    source
        .keys()
        .map(String::as_str)
        .filter(|key| inflector.rule(normalize_spec(key)).is_none())
        .collect()
}

fn read_source_json(path: &Path) -> Result<Map<String, Value>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read source JSON from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read source JSON file {}", path.display()))?
    };
    match serde_json::from_str::<Value>(&text).context("Failed to parse source JSON")? {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!("Source JSON must be an object of strings")),
    }
}

fn write_output(output_path: Option<&Path>, inflected: &str, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            if !quiet {
                info_msg(format!("Writing inflected target to file: {}", path.display()));
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", inflected)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", inflected)?;
        }
    }
    Ok(())
}
