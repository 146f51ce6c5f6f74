//! ROM collection curation core.
//!
//! Parses No-Intro style filenames, groups files of the same game, resolves
//! multi-disc releases and picks one best version per game. Everything here
//! is pure and synchronous: callers supply file descriptors and rules, and
//! get processed games back.

pub mod disc;
pub mod record;
pub mod region;
pub mod rules;
pub mod select;
pub mod tags;
pub mod title;
pub mod types;

pub use disc::resolve_discs;
pub use record::{BestVersionRecord, best_version_records};
pub use region::{ClassifyOptions, Region, RegionInfo, UnknownRegion, classify};
pub use rules::{CollectionRules, SkipReason};
pub use select::{SelectionPolicy, select_best_version};
pub use tags::{TagSet, UNKNOWN_TAG, extract_tags};
pub use title::{extract_title, group_by_title, titlefy};
pub use types::{
    DiscFile, FileDescriptor, FileInfo, Game, GameVersion, MultiFileVersion, ProcessedGame,
    TitleGroup,
};

/// Options for [`curate`].
#[derive(Debug, Clone, Default)]
pub struct CurateOptions {
    pub classify: ClassifyOptions,
    pub selection: SelectionPolicy,
}

/// Output of [`curate`].
#[derive(Debug, Clone, Default)]
pub struct Curation {
    /// Processed games in group emission order.
    pub games: Vec<ProcessedGame>,
    /// Files dropped by the collection rules.
    pub skipped: Vec<(FileDescriptor, SkipReason)>,
}

/// Run the whole pipeline over a collection's files.
///
/// # Examples
///
/// ```
/// use romcull_core::{CollectionRules, CurateOptions, FileDescriptor, curate};
///
/// let files = [
///     "Ghostbusters (Japan) (Beta).zip",
///     "Ghostbusters (USA).zip",
///     "Final Fantasy VII (USA) (Disc 2).zip",
///     "Final Fantasy VII (USA) (Disc 1).zip",
/// ]
/// .into_iter()
/// .map(FileDescriptor::from_file_name);
///
/// let curation = curate(files, &CollectionRules::new(), &CurateOptions::default());
/// assert_eq!(curation.games.len(), 2);
///
/// let ghostbusters = &curation.games[0];
/// assert_eq!(ghostbusters.best_version().files()[0].file_name(), "Ghostbusters (USA).zip");
///
/// let ff7 = curation.games[1].best_version();
/// assert!(ff7.is_multi_file());
/// assert_eq!(ff7.files()[0].file_name(), "Final Fantasy VII (USA) (Disc 1).zip");
/// ```
pub fn curate(
    descriptors: impl IntoIterator<Item = FileDescriptor>,
    rules: &CollectionRules,
    options: &CurateOptions,
) -> Curation {
    let mut skipped = Vec::new();
    let mut files = Vec::new();

    for descriptor in descriptors {
        let file = FileInfo::new(descriptor, &options.classify);
        match rules.skip_reason(&file) {
            Some(reason) => {
                log::debug!("Skipping {}: {}", file.file_name(), reason);
                skipped.push((file.descriptor, reason));
            }
            None => files.push(file),
        }
    }

    let games = group_by_title(files, Some(rules.aliases()))
        .iter()
        .map(resolve_discs)
        .map(|game| select_best_version(game, &options.selection))
        .collect();

    Curation { games, skipped }
}
