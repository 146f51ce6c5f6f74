//! Tokenizer for bracketed filename tags.
//!
//! Filenames follow the No-Intro/GoodTools convention:
//! ```text
//! Game Name (Subtitle) (Region1, Region2) (Rev A) (En,Fr) [T-En by Someone]
//! ```
//!
//! A single forward scan splits every `(...)`/`[...]` group into tokens. Tokens
//! are only trusted as metadata once a region token has been seen; bracketed
//! text before the first region (e.g. `(Micro Genius)`) belongs to the title.

use serde::Serialize;

use crate::region::Region;

/// Tag added when a filename has no recognisable region.
pub const UNKNOWN_TAG: &str = "Unknown";

/// Ordered, duplicate-free collection of tag tokens.
///
/// `title_boundary` is the byte offset of the bracket group that ends the
/// title, when one is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSet {
    tags: Vec<String>,
    title_boundary: Option<usize>,
}

impl TagSet {
    /// Build a tag set from tokens, dropping duplicates. No title boundary.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for tag in tags {
            set.insert(tag.into());
        }
        set
    }

    /// Append a tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: String) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn title_boundary(&self) -> Option<usize> {
        self.title_boundary
    }

    /// Tags present in both sets, in `self`'s order.
    pub fn intersection(&self, other: &TagSet) -> TagSet {
        TagSet {
            tags: self
                .tags
                .iter()
                .filter(|t| other.contains(t))
                .cloned()
                .collect(),
            title_boundary: None,
        }
    }

    /// A copy of this set without `tag`.
    pub fn without(&self, tag: &str) -> TagSet {
        TagSet {
            tags: self.tags.iter().filter(|t| *t != tag).cloned().collect(),
            title_boundary: None,
        }
    }

    /// Tags joined with `,`, usable as a map key. Tokens never contain commas.
    pub fn joined(&self) -> String {
        self.tags.join(",")
    }
}

// ── Scanner ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between groups; only an opening bracket matters.
    Outside,
    /// Inside a group, accumulating a token.
    Building,
    /// Just past a `,`; leading spaces of the next token are skipped.
    Inside,
}

/// The two builders fed by the scan: `primary` only accepts tokens once a
/// region has been seen, `backup` holds everything seen before that.
#[derive(Default)]
struct TagBuilders {
    primary: TagSet,
    backup: TagSet,
    region_seen: bool,
}

impl TagBuilders {
    fn commit(&mut self, token: &mut String, group_start: usize) {
        let tag = token.trim_end();
        if !tag.is_empty() {
            if self.region_seen {
                self.primary.insert(tag.to_string());
            } else if Region::from_tag(tag).is_some() {
                self.region_seen = true;
                self.primary.title_boundary = Some(group_start);
                self.primary.insert(tag.to_string());
            } else {
                self.backup.title_boundary.get_or_insert(group_start);
                self.backup.insert(tag.to_string());
            }
        }
        token.clear();
    }

    fn finish(self) -> TagSet {
        if self.region_seen {
            self.primary
        } else {
            let mut tags = self.backup;
            tags.insert(UNKNOWN_TAG.to_string());
            tags
        }
    }
}

/// Tokenize the bracketed tags of a filename.
///
/// Never returns an empty set: when no region tag exists, the pre-region
/// tokens are kept and [`UNKNOWN_TAG`] is added.
///
/// # Examples
///
/// ```
/// use romcull_core::tags::extract_tags;
///
/// let tags = extract_tags("Asteroids (USA, Europe).zip");
/// assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["USA", "Europe"]);
/// assert_eq!(tags.title_boundary(), Some(10));
///
/// let tags = extract_tags("Batman.zip");
/// assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Unknown"]);
/// assert_eq!(tags.title_boundary(), None);
/// ```
pub fn extract_tags(file_name: &str) -> TagSet {
    let mut builders = TagBuilders::default();
    let mut state = ScanState::Outside;
    let mut token = String::new();
    let mut group_start = 0;

    for (i, ch) in file_name.char_indices() {
        match state {
            ScanState::Outside => {
                if ch == '(' || ch == '[' {
                    group_start = i;
                    token.clear();
                    state = ScanState::Building;
                }
            }
            ScanState::Inside if ch == ' ' => {}
            ScanState::Building | ScanState::Inside => match ch {
                ')' | ']' => {
                    builders.commit(&mut token, group_start);
                    state = ScanState::Outside;
                }
                ',' => {
                    builders.commit(&mut token, group_start);
                    state = ScanState::Inside;
                }
                _ => {
                    token.push(ch);
                    state = ScanState::Building;
                }
            },
        }
    }

    builders.finish()
}

#[cfg(test)]
#[path = "tests/tags_tests.rs"]
mod tests;
