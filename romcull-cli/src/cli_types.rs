//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "romcull")]
#[command(about = "Curate ROM collections down to one best version per game", long_about = None)]
pub(crate) struct Cli {
    /// Collections file (defaults to ~/.config/romcull/collections.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which configured collections to process.
#[derive(Args, Clone)]
pub(crate) struct CollectionArgs {
    /// Platform names of the collections to process (default: all)
    #[arg(short, long = "collection", value_delimiter = ',')]
    pub collections: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the best version of every game without copying anything
    Plan {
        #[command(flatten)]
        collections: CollectionArgs,

        /// Print best-version records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy best versions into the output collections and write best.json
    Sync {
        #[command(flatten)]
        collections: CollectionArgs,

        /// Show planned copies without executing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show how filenames are parsed
    Inspect {
        /// Filenames to parse (paths are reduced to their file name)
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the default collections file path
    Path,
}
