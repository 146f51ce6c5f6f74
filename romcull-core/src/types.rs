//! Data model flowing through the curation pipeline.
//!
//! Every value here is built once in a forward pass and treated as read-only
//! afterwards: descriptors become [`FileInfo`], files are grouped into
//! [`TitleGroup`]s, groups resolve into [`Game`]s of [`GameVersion`]s, and the
//! selector turns each game into a [`ProcessedGame`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::region::{ClassifyOptions, RegionInfo, classify};
use crate::tags::{TagSet, extract_tags};
use crate::title::extract_title;

// ── Files ───────────────────────────────────────────────────────────────────

/// A file discovered by a scanner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileDescriptor {
    /// Absolute directory containing the file.
    pub absolute_dir: PathBuf,
    /// Directory relative to the scanned input root (empty for top level).
    pub relative_dir: PathBuf,
    pub file_name: String,
}

impl FileDescriptor {
    pub fn new(
        absolute_dir: impl Into<PathBuf>,
        relative_dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            absolute_dir: absolute_dir.into(),
            relative_dir: relative_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Descriptor for a bare filename with no directories, handy in tests.
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        Self::new(PathBuf::new(), PathBuf::new(), file_name)
    }

    pub fn absolute_path(&self) -> PathBuf {
        self.absolute_dir.join(&self.file_name)
    }
}

/// A file with its tags, region info and raw game title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub descriptor: FileDescriptor,
    pub tags: TagSet,
    pub region: RegionInfo,
    /// Title text before the tags, before any alias substitution.
    pub game_title: String,
}

impl FileInfo {
    /// Extract, classify and title a file in one pass.
    pub fn new(descriptor: FileDescriptor, options: &ClassifyOptions) -> Self {
        let tags = extract_tags(&descriptor.file_name);
        let region = classify(&tags, options);
        let game_title = extract_title(&descriptor.file_name, &tags);
        Self {
            descriptor,
            tags,
            region,
            game_title,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.descriptor.file_name
    }

    pub fn relative_dir(&self) -> &Path {
        &self.descriptor.relative_dir
    }
}

// ── Groups and games ────────────────────────────────────────────────────────

/// Files sharing one canonical title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleGroup {
    /// Display title: the first-seen title after alias substitution.
    pub title: String,
    /// Canonical grouping key (see [`crate::title::titlefy`]).
    pub key: String,
    pub files: Vec<FileInfo>,
}

/// One disc of a multi-file release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscFile {
    pub file: FileInfo,
    /// Text after "Disc" in the disc tag, e.g. `"1"`.
    pub index: String,
}

/// A release spanning several files, ordered by disc index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiFileVersion {
    /// Tags shared by every disc, minus the disc tags.
    pub tags: TagSet,
    pub region: RegionInfo,
    pub files: Vec<DiscFile>,
}

/// One playable release variant of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameVersion {
    SingleFile(FileInfo),
    MultiFile(MultiFileVersion),
}

impl GameVersion {
    pub fn tags(&self) -> &TagSet {
        match self {
            Self::SingleFile(file) => &file.tags,
            Self::MultiFile(multi) => &multi.tags,
        }
    }

    pub fn region(&self) -> &RegionInfo {
        match self {
            Self::SingleFile(file) => &file.region,
            Self::MultiFile(multi) => &multi.region,
        }
    }

    pub fn is_multi_file(&self) -> bool {
        matches!(self, Self::MultiFile(_))
    }

    /// Constituent files in load order.
    pub fn files(&self) -> Vec<&FileInfo> {
        match self {
            Self::SingleFile(file) => vec![file],
            Self::MultiFile(multi) => multi.files.iter().map(|d| &d.file).collect(),
        }
    }

    /// Absolute source paths in load order.
    pub fn absolute_paths(&self) -> Vec<PathBuf> {
        self.files()
            .into_iter()
            .map(|f| f.descriptor.absolute_path())
            .collect()
    }

    /// The shortest relative directory among the constituent files.
    /// The first one wins on ties.
    pub fn shortest_relative_dir(&self) -> &Path {
        let mut shortest: Option<&Path> = None;
        for file in self.files() {
            let dir = file.relative_dir();
            match shortest {
                Some(s) if s.as_os_str().len() <= dir.as_os_str().len() => {}
                _ => shortest = Some(dir),
            }
        }
        shortest.unwrap_or(Path::new(""))
    }
}

/// A game and every release variant found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub title: String,
    pub versions: Vec<GameVersion>,
}

/// A game with its chosen best version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedGame {
    pub title: String,
    pub versions: Vec<GameVersion>,
    /// Index of the best version in `versions`.
    pub best_index: usize,
}

impl ProcessedGame {
    pub fn best_version(&self) -> &GameVersion {
        &self.versions[self.best_index]
    }
}
