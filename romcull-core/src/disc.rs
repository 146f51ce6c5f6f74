//! Multi-disc resolution.
//!
//! Turns a [`TitleGroup`] into a [`Game`]: files are partitioned by region,
//! and within each region disc-tagged files are assembled into ordered disc
//! sets. Discs are matched by their non-disc tags; when no tag bucket holds a
//! complete set, a bounded search picks the one-file-per-disc combination
//! sharing the most tags.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::region::{Region, RegionInfo};
use crate::tags::TagSet;
use crate::types::{DiscFile, FileInfo, Game, GameVersion, MultiFileVersion, TitleGroup};

const DISC_MARKER: &str = "Disc";

/// Find the disc tag of a tag set.
///
/// Prefers a tag starting with "Disc" (e.g. `"Disc 2"`) over one merely
/// containing it (e.g. `"Game Disc"`).
pub fn find_disc_tag(tags: &TagSet) -> Option<&str> {
    tags.iter()
        .find(|t| t.starts_with(DISC_MARKER))
        .or_else(|| tags.iter().find(|t| t.contains(DISC_MARKER)))
}

/// Disc index of a disc tag: the text after "Disc", trimmed.
///
/// - `"Disc 2"` → `"2"`
/// - `"Disc 1 - Leon"` → `"1 - Leon"`
pub fn disc_index(disc_tag: &str) -> &str {
    match disc_tag.find(DISC_MARKER) {
        Some(pos) => disc_tag[pos + DISC_MARKER.len()..].trim(),
        None => "",
    }
}

/// Order disc indices numerically when they start with a number, otherwise
/// lexically after all numbered discs.
pub fn compare_disc_index(a: &str, b: &str) -> Ordering {
    fn leading_number(s: &str) -> Option<u64> {
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        s[..end].parse().ok()
    }
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// A disc-tagged file with its index and its tags minus the disc tag.
#[derive(Debug)]
struct DiscEntry<'a> {
    file: &'a FileInfo,
    index: String,
    tags: TagSet,
}

/// Resolve a title group into a game with all its release variants.
///
/// Deterministic: identical input yields identical versions in identical
/// order.
pub fn resolve_discs(group: &TitleGroup) -> Game {
    let mut versions = Vec::new();
    for (region, files) in partition_by_region(&group.files) {
        log::trace!(
            "Resolving {} file(s) of \"{}\" for region {}",
            files.len(),
            group.title,
            region,
        );
        versions.extend(resolve_region(&group.title, &files));
    }
    Game {
        title: group.title.clone(),
        versions,
    }
}

/// Split files by every region they carry; a file naming two regions lands in
/// both partitions. Partitions come out in first-seen order.
fn partition_by_region(files: &[FileInfo]) -> Vec<(Region, Vec<&FileInfo>)> {
    let mut partitions: Vec<(Region, Vec<&FileInfo>)> = Vec::new();
    for file in files {
        let regions: Vec<Region> = if file.region.regions.is_empty() {
            vec![Region::Unknown]
        } else {
            file.region.regions.iter().copied().collect()
        };
        for region in regions {
            match partitions.iter_mut().find(|(r, _)| *r == region) {
                Some((_, members)) => members.push(file),
                None => partitions.push((region, vec![file])),
            }
        }
    }
    partitions
}

fn resolve_region(title: &str, files: &[&FileInfo]) -> Vec<GameVersion> {
    let has_discs = files
        .iter()
        .any(|f| f.tags.iter().any(|t| t.contains(DISC_MARKER)));
    if !has_discs {
        return files
            .iter()
            .map(|f| GameVersion::SingleFile((*f).clone()))
            .collect();
    }

    let mut versions = Vec::new();
    let mut entries = Vec::new();
    for &file in files {
        match find_disc_tag(&file.tags) {
            Some(disc_tag) => entries.push(DiscEntry {
                file,
                index: disc_index(disc_tag).to_string(),
                tags: file.tags.without(disc_tag),
            }),
            None => versions.push(GameVersion::SingleFile(file.clone())),
        }
    }

    let disc_count = entries
        .iter()
        .map(|e| e.index.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let buckets = bucket_by_tags(&entries);

    if buckets.iter().any(|bucket| bucket.len() == disc_count) {
        for bucket in buckets {
            let bucket_len = bucket.len();
            let discs = first_per_index(bucket);
            if discs.len() < bucket_len {
                log::debug!(
                    "\"{}\": dropped {} duplicate disc(s) with tags [{}]",
                    title,
                    bucket_len - discs.len(),
                    discs[0].tags.joined(),
                );
            }
            if discs.len() == 1 {
                versions.push(GameVersion::SingleFile(discs[0].file.clone()));
                continue;
            }
            if discs.len() != disc_count {
                log::warn!(
                    "\"{}\": disc set with tags [{}] has {} of {} discs",
                    title,
                    discs[0].tags.joined(),
                    discs.len(),
                    disc_count,
                );
            }
            let common = discs[0].tags.clone();
            versions.push(multi_file(discs, common));
        }
    } else {
        let by_index = bucket_by_index(&entries);
        if let Some((combination, common)) = best_combination(&by_index) {
            log::debug!(
                "\"{}\": no complete disc set by tags, matched {} discs sharing [{}] ({} file(s) unused)",
                title,
                combination.len(),
                common.joined(),
                entries.len() - combination.len(),
            );
            versions.push(multi_file(combination, common));
        }
    }

    versions
}

/// Group entries by their joined non-disc tags, in first-seen order.
fn bucket_by_tags<'e, 'a>(entries: &'e [DiscEntry<'a>]) -> Vec<Vec<&'e DiscEntry<'a>>> {
    let mut buckets: Vec<Vec<&DiscEntry>> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        let key = entry.tags.joined();
        match by_key.get(&key) {
            Some(&i) => buckets[i].push(entry),
            None => {
                by_key.insert(key, buckets.len());
                buckets.push(vec![entry]);
            }
        }
    }
    buckets
}

/// Keep the first entry of each disc index, so copies of one dump found in
/// several input directories count once.
fn first_per_index<'e, 'a>(bucket: Vec<&'e DiscEntry<'a>>) -> Vec<&'e DiscEntry<'a>> {
    let mut discs: Vec<&DiscEntry> = Vec::with_capacity(bucket.len());
    for entry in bucket {
        if !discs.iter().any(|d| d.index == entry.index) {
            discs.push(entry);
        }
    }
    discs
}

/// Group entries by disc index, buckets ordered by disc index.
fn bucket_by_index<'e, 'a>(entries: &'e [DiscEntry<'a>]) -> Vec<Vec<&'e DiscEntry<'a>>> {
    let mut buckets: Vec<Vec<&DiscEntry>> = Vec::new();
    for entry in entries {
        match buckets.iter_mut().find(|b| b[0].index == entry.index) {
            Some(bucket) => bucket.push(entry),
            None => buckets.push(vec![entry]),
        }
    }
    buckets.sort_by(|a, b| compare_disc_index(&a[0].index, &b[0].index));
    buckets
}

/// Depth-first search over one entry per disc bucket for the combination
/// whose tag intersection is largest. The first maximum found wins.
struct CombinationSearch<'s, 'e, 'a> {
    buckets: &'s [Vec<&'e DiscEntry<'a>>],
    current: Vec<&'e DiscEntry<'a>>,
    best: Option<(Vec<&'e DiscEntry<'a>>, TagSet)>,
}

impl<'e, 'a> CombinationSearch<'_, 'e, 'a> {
    fn descend(&mut self, depth: usize, common: Option<&TagSet>) {
        if let (Some(common), Some((_, best))) = (common, &self.best) {
            // Intersections only shrink, so this branch cannot beat the best.
            if common.len() <= best.len() {
                return;
            }
        }
        if depth == self.buckets.len() {
            let common = common.cloned().unwrap_or_default();
            self.best = Some((self.current.clone(), common));
            return;
        }
        let buckets = self.buckets;
        for &entry in &buckets[depth] {
            let next = match common {
                Some(common) => common.intersection(&entry.tags),
                None => entry.tags.clone(),
            };
            self.current.push(entry);
            self.descend(depth + 1, Some(&next));
            self.current.pop();
        }
    }
}

fn best_combination<'e, 'a>(
    buckets: &[Vec<&'e DiscEntry<'a>>],
) -> Option<(Vec<&'e DiscEntry<'a>>, TagSet)> {
    if buckets.is_empty() {
        return None;
    }
    let mut search = CombinationSearch {
        buckets,
        current: Vec::with_capacity(buckets.len()),
        best: None,
    };
    search.descend(0, None);
    search.best
}

/// Build a multi-file version with files ordered by disc index.
fn multi_file(mut entries: Vec<&DiscEntry>, tags: TagSet) -> GameVersion {
    entries.sort_by(|a, b| compare_disc_index(&a.index, &b.index));

    let mut region = RegionInfo::default();
    for entry in &entries {
        region.regions.extend(entry.file.region.regions.iter().copied());
        region
            .languages
            .extend(entry.file.region.languages.iter().cloned());
        region.is_translated |= entry.file.region.is_translated;
    }

    GameVersion::MultiFile(MultiFileVersion {
        tags,
        region,
        files: entries
            .into_iter()
            .map(|e| DiscFile {
                file: e.file.clone(),
                index: e.index.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
#[path = "tests/disc_tests.rs"]
mod tests;
