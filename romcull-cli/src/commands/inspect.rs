use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romcull_core::{ClassifyOptions, FileDescriptor, FileInfo, titlefy};
use romcull_lib::default_config_path;

use crate::commands::{format_languages, load_config};
use crate::error::CliError;

/// Print how each filename is tokenized and classified.
///
/// Uses the collections file for the unknown-region language when one is
/// given or present at the default location.
pub(crate) fn run_inspect(filenames: &[String], config_path: Option<PathBuf>) -> Result<(), CliError> {
    let options = classify_options(config_path)?;

    for raw in filenames {
        let name = Path::new(raw)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| raw.clone());
        let file = FileInfo::new(FileDescriptor::from_file_name(name), &options);
        print_file(&file);
    }
    Ok(())
}

fn classify_options(config_path: Option<PathBuf>) -> Result<ClassifyOptions, CliError> {
    if config_path.is_none() && !default_config_path().is_file() {
        return Ok(ClassifyOptions::default());
    }
    Ok(load_config(config_path)?.curate.classify)
}

fn print_file(file: &FileInfo) {
    let region = &file.region;
    let regions: Vec<&str> = region.regions.iter().map(|r| r.name()).collect();
    let tags: Vec<&str> = file.tags.iter().collect();

    log::info!("{}", file.file_name().if_supports_color(Stdout, |t| t.bold()));
    log::info!("  title:      {}", file.game_title);
    log::info!(
        "  key:        {}",
        titlefy(&file.game_title).if_supports_color(Stdout, |t| t.dimmed())
    );
    log::info!(
        "  tags:       {}",
        tags.join(" | ").if_supports_color(Stdout, |t| t.cyan())
    );
    match file.tags.title_boundary() {
        Some(offset) => log::info!("  boundary:   {offset}"),
        None => log::info!("  boundary:   -"),
    }
    log::info!("  regions:    {}", regions.join(", "));
    log::info!("  languages:  {}", format_languages(&region.languages));
    if region.is_translated {
        log::info!(
            "  {}",
            "translated".if_supports_color(Stdout, |t| t.yellow())
        );
    }
    log::info!("");
}
