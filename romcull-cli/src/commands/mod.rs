pub(crate) mod config;
pub(crate) mod inspect;
pub(crate) mod plan;
pub(crate) mod sync;

use std::collections::BTreeSet;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romcull_lib::{CollectionRun, Config, default_config_path};

use crate::error::CliError;

/// Load the collections file from `--config` or the default location.
pub(crate) fn load_config(path: Option<PathBuf>) -> Result<Config, CliError> {
    let path = path.unwrap_or_else(default_config_path);
    log::debug!("Using collections file {}", path.display());
    Ok(Config::load(&path)?)
}

/// Run every requested collection, stopping at the first failure.
pub(crate) fn run_collections(
    config: &Config,
    platforms: &[String],
) -> Result<Vec<CollectionRun>, CliError> {
    let selected = config.select_collections(platforms)?;
    if selected.is_empty() {
        log::warn!("No collections configured in {}", config.source.display());
    }
    selected
        .into_iter()
        .map(|collection| romcull_lib::run_collection(config, collection).map_err(CliError::from))
        .collect()
}

pub(crate) fn format_languages(languages: &BTreeSet<String>) -> String {
    if languages.is_empty() {
        "??".to_string()
    } else {
        languages.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

/// Bold platform header followed by the run's counts.
pub(crate) fn print_run_header(run: &CollectionRun) {
    log::info!(
        "{} {}",
        run.platform.if_supports_color(Stdout, |t| t.bold()),
        format!(
            "({} files, {} skipped, {} games)",
            run.files_scanned,
            run.files_skipped(),
            run.group_count()
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
}
