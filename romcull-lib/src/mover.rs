//! Copy best versions into an output collection.
//!
//! Planning and execution are split so a dry run can show exactly what would
//! be placed. Files are either copied as-is or, for collections that unzip,
//! extracted from their archives. Existing files in the output are never
//! overwritten.

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zip::ZipArchive;

use romcull_core::BestVersionRecord;

use crate::bizhawk::{self, BizhawkSystem};
use crate::error::MoveError;

/// File name of the per-collection summary written next to the copied games.
pub const BEST_JSON: &str = "best.json";

/// Where extracted archive entries go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnzipMode {
    /// Into a folder named after the archive.
    SubFolder,
    /// Next to where the archive itself would have been copied.
    SameFolder,
}

/// How a collection's best versions are laid out in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Extract `.zip` sources instead of copying them.
    pub unzip: Option<UnzipMode>,
    /// Write a BizHawk XML file for every multi-disc game.
    pub bizhawk_system: Option<BizhawkSystem>,
}

/// A planned copy or extraction of one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAction {
    pub source: PathBuf,
    /// Archive entry to extract from `source`; the whole file is copied when
    /// absent.
    pub entry: Option<String>,
    pub target: PathBuf,
    /// The target existed when the plan was made.
    pub already_present: bool,
}

/// One entry of `best.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    pub languages: BTreeSet<String>,
    /// File paths relative to the output directory, in load order.
    pub files: Vec<String>,
}

/// Placement of one game's best version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGame {
    pub title: String,
    pub aliases: Option<Vec<String>>,
    pub languages: BTreeSet<String>,
    /// The best version spans several source files.
    pub multi_disc: bool,
    pub actions: Vec<CopyAction>,
    /// Output files relative to the output directory, in load order.
    pub files: Vec<String>,
}

/// Everything needed to populate one output directory.
#[derive(Debug, Clone, Default)]
pub struct CopyPlan {
    pub output_dir: PathBuf,
    pub placement: PlacementOptions,
    pub games: Vec<PlannedGame>,
    /// Sources that could not be planned, such as unreadable archives.
    pub errors: Vec<String>,
}

impl CopyPlan {
    pub fn actions(&self) -> impl Iterator<Item = &CopyAction> {
        self.games.iter().flat_map(|g| g.actions.iter())
    }

    /// Actions whose target is still missing.
    pub fn pending(&self) -> impl Iterator<Item = &CopyAction> {
        self.actions().filter(|c| !c.already_present)
    }
}

/// Progress reported while executing a plan.
#[derive(Debug, Clone)]
pub enum CopyProgress {
    Copying {
        file_name: String,
        file_index: usize,
        total: usize,
    },
    Done,
}

/// Summary of an executed plan.
#[derive(Debug, Clone, Default)]
pub struct CopySummary {
    pub copied: usize,
    pub already_present: usize,
    pub xml_written: usize,
    pub errors: Vec<String>,
    /// `best.json` entries for every planned game.
    pub entries: Vec<BestEntry>,
}

/// Plan the output files of every record under
/// `output_dir/<target_relative_dir>`.
///
/// Copies keep the source file name. Extracted archives contribute one file
/// per entry, inside a folder named after the archive in
/// [`UnzipMode::SubFolder`]. Sources that are not `.zip` files are copied
/// even when unzipping.
pub fn plan_copies(
    records: &[BestVersionRecord],
    output_dir: &Path,
    placement: &PlacementOptions,
) -> CopyPlan {
    let mut plan = CopyPlan {
        output_dir: output_dir.to_path_buf(),
        placement: *placement,
        ..Default::default()
    };

    for record in records {
        let mut game = PlannedGame {
            title: record.title.clone(),
            aliases: record.aliases.clone(),
            languages: record.languages.clone(),
            multi_disc: record.source_paths.len() > 1,
            actions: Vec::with_capacity(record.source_paths.len()),
            files: Vec::with_capacity(record.source_paths.len()),
        };

        for source in &record.source_paths {
            let Some(file_name) = source.file_name() else {
                log::warn!("Skipping source without a file name: {}", source.display());
                continue;
            };

            let Some(mode) = placement.unzip.filter(|_| is_zip(source)) else {
                let relative = record.target_relative_dir.join(file_name);
                game.push(output_dir, relative, source, None);
                continue;
            };

            let base = match (mode, source.file_stem()) {
                (UnzipMode::SubFolder, Some(stem)) => record.target_relative_dir.join(stem),
                _ => record.target_relative_dir.clone(),
            };
            match zip_entries(source) {
                Ok(entries) => {
                    for (entry, name) in entries {
                        game.push(output_dir, base.join(name), source, Some(entry));
                    }
                }
                Err(e) => plan
                    .errors
                    .push(format!("Failed to read archive {}: {}", source.display(), e)),
            }
        }

        plan.games.push(game);
    }

    plan
}

impl PlannedGame {
    fn push(&mut self, output_dir: &Path, relative: PathBuf, source: &Path, entry: Option<String>) {
        let target = output_dir.join(&relative);
        self.actions.push(CopyAction {
            source: source.to_path_buf(),
            entry,
            already_present: target.exists(),
            target,
        });
        self.files.push(relative.to_string_lossy().replace('\\', "/"));
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// File entries of an archive: raw entry name and its safe relative path.
fn zip_entries(path: &Path) -> zip::result::ZipResult<Vec<(String, PathBuf)>> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        match file.enclosed_name() {
            Some(name) => entries.push((file.name().to_string(), name)),
            None => log::warn!(
                "Skipping unsafe entry {} in {}",
                file.name(),
                path.display()
            ),
        }
    }
    Ok(entries)
}

/// Copy or extract every missing file of a plan, then write the BizHawk XML
/// of each multi-disc game when enabled. Failures are collected, not fatal.
pub fn execute_copies(plan: &CopyPlan, progress: &dyn Fn(CopyProgress)) -> CopySummary {
    let mut summary = CopySummary {
        errors: plan.errors.clone(),
        ..Default::default()
    };
    let total = plan.actions().count();
    let mut file_index = 0;
    let mut archive: Option<(PathBuf, ZipArchive<File>)> = None;

    for game in &plan.games {
        let mut placed = false;
        for action in &game.actions {
            progress(CopyProgress::Copying {
                file_name: action
                    .target
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                file_index,
                total,
            });
            file_index += 1;

            match place(action, &mut archive) {
                Ok(true) => {
                    summary.copied += 1;
                    placed = true;
                }
                Ok(false) => summary.already_present += 1,
                Err(e) => summary.errors.push(e),
            }
        }

        let files = match plan.placement.bizhawk_system {
            Some(system) if game.multi_disc => {
                xml_files(plan, game, system, placed, &mut summary)
            }
            _ => game.files.clone(),
        };
        summary.entries.push(BestEntry {
            title: game.title.clone(),
            aliases: game.aliases.clone(),
            languages: game.languages.clone(),
            files,
        });
    }

    progress(CopyProgress::Done);
    summary
}

/// Place one file. `Ok(true)` when it was newly written.
fn place(
    action: &CopyAction,
    archive: &mut Option<(PathBuf, ZipArchive<File>)>,
) -> Result<bool, String> {
    if action.target.exists() {
        return Ok(false);
    }
    if let Some(parent) = action.target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }

    let result = match &action.entry {
        Some(entry) => extract_new(archive, &action.source, entry, &action.target),
        None => copy_new(&action.source, &action.target),
    };
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(match &action.entry {
            Some(entry) => format!(
                "Failed to extract {}:{} -> {}: {}",
                action.source.display(),
                entry,
                action.target.display(),
                e
            ),
            None => format!(
                "Failed to copy {} -> {}: {}",
                action.source.display(),
                action.target.display(),
                e
            ),
        }),
    }
}

/// Copy `source` to a `target` that must not exist yet.
fn copy_new(source: &Path, target: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;
    io::copy(&mut reader, &mut writer)
}

/// Extract `entry` of the archive at `source` to a `target` that must not
/// exist yet. The last opened archive is kept for the next entry.
fn extract_new(
    open: &mut Option<(PathBuf, ZipArchive<File>)>,
    source: &Path,
    entry: &str,
    target: &Path,
) -> io::Result<u64> {
    if !open.as_ref().is_some_and(|(path, _)| path == source) {
        let archive = ZipArchive::new(File::open(source)?).map_err(io::Error::other)?;
        *open = Some((source.to_path_buf(), archive));
    }
    let Some((_, archive)) = open.as_mut() else {
        return Err(io::Error::other("archive not open"));
    };

    let mut reader = archive.by_name(entry).map_err(io::Error::other)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;
    io::copy(&mut reader, &mut writer)
}

/// `best.json` files of a multi-disc game in BizHawk mode: the XML file, or
/// the placed files when there is nothing to list.
///
/// An existing XML file is only rewritten when the game's files changed.
fn xml_files(
    plan: &CopyPlan,
    game: &PlannedGame,
    system: BizhawkSystem,
    placed: bool,
    summary: &mut CopySummary,
) -> Vec<String> {
    let name = bizhawk::xml_file_name(&game.title);
    if !placed && plan.output_dir.join(&name).exists() {
        return vec![name];
    }

    match bizhawk::write_bizhawk_xml(&plan.output_dir, &game.title, system, &game.files) {
        Ok(Some(name)) => {
            summary.xml_written += 1;
            vec![name]
        }
        Ok(None) => {
            log::warn!(
                "\"{}\": no .cue/.mds/.ccd file to list in a BizHawk XML",
                game.title
            );
            game.files.clone()
        }
        Err(e) => {
            summary.errors.push(e.to_string());
            game.files.clone()
        }
    }
}

/// Write `best.json` into `dir`, replacing any previous one.
pub fn write_best_json(dir: &Path, entries: &[BestEntry]) -> Result<PathBuf, MoveError> {
    let io_err = |path: &Path, source| MoveError::Io {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let path = dir.join(BEST_JSON);
    let serialized = serde_json::to_string_pretty(entries)?;

    // Write atomically
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serialized).map_err(|e| io_err(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;

    Ok(path)
}

#[cfg(test)]
#[path = "tests/mover_tests.rs"]
mod tests;
