//! romcull CLI
//!
//! Command-line interface for curating ROM collections.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Plan { collections, json } => {
            commands::plan::run_plan(cli.config, &collections.collections, json)
        }
        Commands::Sync {
            collections,
            dry_run,
        } => commands::sync::run_sync(cli.config, &collections.collections, dry_run, cli.quiet),
        Commands::Inspect { filenames } => commands::inspect::run_inspect(&filenames, cli.config),
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e.if_supports_color(Stdout, |t| t.red()));
        std::process::exit(1);
    }
}

/// Route `log` output through env_logger. Normal messages print bare so they
/// read as command output; `RUST_LOG` overrides the flag-derived level.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(
                buf,
                "{}: {}",
                level.as_str().to_lowercase(),
                record.args()
            ),
        });
    }
    builder.parse_default_env();
    builder.init();
}
