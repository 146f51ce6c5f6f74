//! Records handed to movers and writers for each best version.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::rules::CollectionRules;
use crate::types::ProcessedGame;

/// What a mover needs to place one game's best version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestVersionRecord {
    pub title: String,
    /// Known foreign titles of `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    pub languages: BTreeSet<String>,
    /// Absolute source paths, in load order.
    pub source_paths: Vec<PathBuf>,
    /// Shortest relative directory among the source files.
    pub target_relative_dir: PathBuf,
}

impl BestVersionRecord {
    pub fn from_processed(game: &ProcessedGame, rules: &CollectionRules) -> Self {
        let best = game.best_version();
        Self {
            title: game.title.clone(),
            aliases: rules.foreign_titles(&game.title).map(<[String]>::to_vec),
            languages: best.region().languages.clone(),
            source_paths: best.absolute_paths(),
            target_relative_dir: best.shortest_relative_dir().to_path_buf(),
        }
    }
}

/// Build records for every processed game, preserving order.
pub fn best_version_records(
    games: &[ProcessedGame],
    rules: &CollectionRules,
) -> Vec<BestVersionRecord> {
    games
        .iter()
        .map(|g| BestVersionRecord::from_processed(g, rules))
        .collect()
}
