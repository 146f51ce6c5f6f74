//! Best-version selection.
//!
//! Candidates are narrowed by an ordered pipeline:
//! 1. keep the best language score
//! 2. drop versions with denylisted tags
//! 3. keep the best region score
//! 4. drop translations
//! 5. prefer the fewest tags
//!
//! No stage ever empties the candidate list; a stage that would remove every
//! candidate is skipped.

use crate::region::Region;
use crate::types::{Game, GameVersion, ProcessedGame};

/// Score given to languages and regions missing from the priority lists.
pub const UNRANKED: usize = usize::MAX;

/// Priority lists and denylist used by [`select_best_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Lowercased language codes, best first.
    languages: Vec<String>,
    /// Regions, best first.
    regions: Vec<Region>,
    /// Lowercased tags that demote a version.
    bad_tags: Vec<String>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::new(
            ["en", "ja", "sv", "de", "zh"],
            [Region::World, Region::Usa, Region::Japan, Region::Europe],
            [
                "i", "undub", "hack", "alpha", "beta", "proto", "b", "demo", "sample",
            ],
        )
    }
}

impl SelectionPolicy {
    /// Build a policy; language codes and bad tags are lowercased here.
    pub fn new<L, R, B>(languages: L, regions: R, bad_tags: B) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        R: IntoIterator<Item = Region>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            languages: languages
                .into_iter()
                .map(|l| l.as_ref().to_lowercase())
                .collect(),
            regions: regions.into_iter().collect(),
            bad_tags: bad_tags
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn bad_tags(&self) -> &[String] {
        &self.bad_tags
    }

    /// Best (lowest) position of any of `languages` in the priority list.
    pub fn language_score<'a>(&self, languages: impl IntoIterator<Item = &'a String>) -> usize {
        languages
            .into_iter()
            .filter_map(|lang| {
                let lang = lang.to_lowercase();
                self.languages.iter().position(|l| *l == lang)
            })
            .min()
            .unwrap_or(UNRANKED)
    }

    /// Best (lowest) position of any of `regions` in the priority list.
    pub fn region_score<'a>(&self, regions: impl IntoIterator<Item = &'a Region>) -> usize {
        regions
            .into_iter()
            .filter_map(|region| self.regions.iter().position(|r| r == region))
            .min()
            .unwrap_or(UNRANKED)
    }

    /// True if the version carries any denylisted tag (case-insensitive).
    pub fn has_bad_tag(&self, version: &GameVersion) -> bool {
        version
            .tags()
            .iter()
            .any(|t| self.bad_tags.contains(&t.to_lowercase()))
    }
}

/// Pick the best version of a game. The full version list is kept.
pub fn select_best_version(game: Game, policy: &SelectionPolicy) -> ProcessedGame {
    let best_index = best_version_index(&game.versions, policy);
    ProcessedGame {
        title: game.title,
        versions: game.versions,
        best_index,
    }
}

fn best_version_index(versions: &[GameVersion], policy: &SelectionPolicy) -> usize {
    if versions.len() <= 1 {
        return 0;
    }

    let candidates: Vec<usize> = (0..versions.len()).collect();
    let candidates = keep_lowest(candidates, |i| {
        policy.language_score(&versions[i].region().languages)
    });
    let candidates = drop_unless_all(candidates, |i| policy.has_bad_tag(&versions[i]));
    let candidates = keep_lowest(candidates, |i| {
        policy.region_score(&versions[i].region().regions)
    });
    let candidates = drop_unless_all(candidates, |i| versions[i].region().is_translated);

    candidates
        .into_iter()
        .min_by_key(|&i| versions[i].tags().len())
        .unwrap_or(0)
}

/// Keep the candidates tied for the lowest score, in their current order.
fn keep_lowest(candidates: Vec<usize>, score: impl Fn(usize) -> usize) -> Vec<usize> {
    let scores: Vec<usize> = candidates.iter().map(|&i| score(i)).collect();
    let Some(&best) = scores.iter().min() else {
        return candidates;
    };
    candidates
        .into_iter()
        .zip(scores)
        .filter(|&(_, s)| s == best)
        .map(|(i, _)| i)
        .collect()
}

/// Remove candidates matching `reject`, unless that would remove all of them.
fn drop_unless_all(candidates: Vec<usize>, reject: impl Fn(usize) -> bool) -> Vec<usize> {
    let kept: Vec<usize> = candidates.iter().copied().filter(|&i| !reject(i)).collect();
    if kept.is_empty() { candidates } else { kept }
}

#[cfg(test)]
#[path = "tests/select_tests.rs"]
mod tests;
