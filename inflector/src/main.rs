// inflector/src/main.rs
//! Inflector entry point.
//!
//! Parses the command line, initialises logging and dispatches to the
//! selected subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use inflector::cli::{Cli, Commands};
use inflector::commands::{filters, render, rules};
use inflector::logger;
use inflector::ui::output_format::error_msg;

fn run(args: Cli) -> Result<()> {
    match args.command {
        Commands::Render(cmd) => render::run_render(render::RenderOptions {
            config_path: cmd.config,
            target: cmd.target,
            pairs: cmd.set,
            source_json: cmd.source_json,
            no_throw: cmd.no_throw,
            output_path: cmd.output,
            quiet: args.quiet,
        }),
        Commands::Rules(cmd) => rules::run_rules(&cmd.config),
        Commands::Filters => filters::run_filters().context("Failed to list filters"),
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
