use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romcull_lib::{CopyPlan, CopyProgress, execute_copies, plan_copies, write_best_json};

use crate::commands::{load_config, print_run_header, run_collections};
use crate::error::CliError;

/// Copy best versions into each collection's output directory.
pub(crate) fn run_sync(
    config_path: Option<PathBuf>,
    platforms: &[String],
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    if dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be copied".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("");
    }

    let runs = run_collections(&config, platforms)?;
    let mut total_copied = 0usize;
    let mut total_present = 0usize;
    let mut total_errors: Vec<String> = Vec::new();

    for run in &runs {
        print_run_header(run);
        let plan = plan_copies(&run.records, &run.output_dir, &run.placement);

        if dry_run {
            print_copy_plan(&plan);
            log::info!("");
            continue;
        }

        // Set up progress bar (hidden in quiet mode)
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(plan.actions().count() as u64);
            pb.set_style(
                ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
                    .expect("static pattern")
                    .progress_chars("=> "),
            );
            pb
        };

        let progress_callback = |progress: CopyProgress| match progress {
            CopyProgress::Copying {
                file_name,
                file_index,
                ..
            } => {
                pb.set_position(file_index as u64);
                pb.set_message(file_name);
            }
            CopyProgress::Done => pb.finish_and_clear(),
        };

        let summary = execute_copies(&plan, &progress_callback);
        let best = write_best_json(&run.output_dir, &summary.entries)?;

        log::info!(
            "  {} {} copied, {} already present",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary.copied,
            summary.already_present,
        );
        if summary.xml_written > 0 {
            log::info!(
                "  {} {} BizHawk XML file(s)",
                "Wrote".if_supports_color(Stdout, |t| t.dimmed()),
                summary.xml_written,
            );
        }
        log::info!(
            "  {} {}",
            "Wrote".if_supports_color(Stdout, |t| t.dimmed()),
            best.display(),
        );
        log::info!("");

        total_copied += summary.copied;
        total_present += summary.already_present;
        total_errors.extend(summary.errors);
    }

    if !dry_run && runs.len() > 1 {
        log::info!(
            "{} {} copied, {} already present",
            "Total:".if_supports_color(Stdout, |t| t.bold()),
            total_copied,
            total_present,
        );
    }

    if total_errors.is_empty() {
        return Ok(());
    }
    for error in &total_errors {
        log::warn!("  {}", error.if_supports_color(Stdout, |t| t.red()));
    }
    Err(CliError::other(format!(
        "{} file(s) could not be copied",
        total_errors.len()
    )))
}

fn print_copy_plan(plan: &CopyPlan) {
    let present = plan.actions().count() - plan.pending().count();
    for copy in plan.pending() {
        let source = match &copy.entry {
            Some(entry) => format!("{}:{}", copy.source.display(), entry),
            None => copy.source.display().to_string(),
        };
        log::info!(
            "  {} {}",
            source,
            format!("-> {}", copy.target.display()).if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    for error in &plan.errors {
        log::warn!("  {}", error.if_supports_color(Stdout, |t| t.red()));
    }
    log::info!(
        "  {} to copy, {} already present in {}",
        plan.pending().count(),
        present,
        plan.output_dir.display(),
    );
}
