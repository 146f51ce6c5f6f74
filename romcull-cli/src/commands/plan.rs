use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romcull_core::BestVersionRecord;

use crate::commands::{format_languages, load_config, print_run_header, run_collections};
use crate::error::CliError;

/// Print the best version of every game in the selected collections.
pub(crate) fn run_plan(
    config_path: Option<PathBuf>,
    platforms: &[String],
    json: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let runs = run_collections(&config, platforms)?;

    if json {
        let records: Vec<&BestVersionRecord> = runs.iter().flat_map(|r| &r.records).collect();
        // Raw print (machine-readable)
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for run in &runs {
        print_run_header(run);
        for record in &run.records {
            print_record(record);
        }
        log::info!("");
    }
    Ok(())
}

fn print_record(record: &BestVersionRecord) {
    log::info!(
        "  {} {}",
        record.title.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", format_languages(&record.languages))
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    if let Some(aliases) = &record.aliases {
        log::info!(
            "    {} {}",
            "aka".if_supports_color(Stdout, |t| t.dimmed()),
            aliases.join(", "),
        );
    }
    for path in &record.source_paths {
        log::info!(
            "    {}",
            path.display().if_supports_color(Stdout, |t| t.cyan())
        );
    }
}
