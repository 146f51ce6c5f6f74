use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Print the default collections file path and whether it exists.
pub(crate) fn run_config_path() {
    let path = romcull_lib::default_config_path();
    if path.exists() {
        log::info!("{}", path.display());
    } else {
        log::info!(
            "{} {}",
            path.display(),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
