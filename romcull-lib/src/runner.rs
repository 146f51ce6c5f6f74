//! Run one configured collection end to end, short of copying.

use std::path::PathBuf;

use romcull_core::{
    BestVersionRecord, FileDescriptor, ProcessedGame, SkipReason, best_version_records, curate,
};

use crate::clonelist::load_clonelists;
use crate::config::{Collection, Config};
use crate::error::ConfigError;
use crate::mover::PlacementOptions;
use crate::scanner::{ScanFilter, list_files_flat};

/// Result of curating one collection.
#[derive(Debug, Clone)]
pub struct CollectionRun {
    pub platform: String,
    pub input_dirs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub placement: PlacementOptions,
    pub files_scanned: usize,
    pub skipped: Vec<(FileDescriptor, SkipReason)>,
    pub games: Vec<ProcessedGame>,
    pub records: Vec<BestVersionRecord>,
}

impl CollectionRun {
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn group_count(&self) -> usize {
        self.games.len()
    }
}

/// Scan a collection's inputs, curate them and build best-version records.
pub fn run_collection(config: &Config, collection: &Collection) -> Result<CollectionRun, ConfigError> {
    let mut rules = config.rules.clone();
    rules.merge(collection.rules.clone());
    rules.merge(load_clonelists(&config.clonelist_dir, &collection.clonelists)?);

    let input_dirs = collection.input_dirs(config);
    let filter = ScanFilter::new(&config.skip_file_extensions);
    let files = list_files_flat(&input_dirs, &filter).map_err(|e| ConfigError::Io {
        path: input_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        source: e,
    })?;
    let files_scanned = files.len();

    let curation = curate(files, &rules, &config.curate);
    let records = best_version_records(&curation.games, &rules);

    log::info!(
        "{}: {} file(s) scanned, {} skipped, {} game(s)",
        collection.platform,
        files_scanned,
        curation.skipped.len(),
        curation.games.len(),
    );

    Ok(CollectionRun {
        platform: collection.platform.clone(),
        input_dirs,
        output_dir: collection.output_dir(config),
        placement: collection.placement,
        files_scanned,
        skipped: curation.skipped,
        games: curation.games,
        records,
    })
}
