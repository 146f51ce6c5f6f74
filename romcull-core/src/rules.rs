//! Per-collection title rules: aliases, removed titles and skip lists.
//!
//! All keys are stored in canonical (titlefied) or lowercased form so lookups
//! never need to normalize configuration values again.

use std::collections::{HashMap, HashSet};

use crate::title::titlefy;
use crate::types::FileInfo;

/// Why a file was left out of grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file carries a skipped tag (lowercased).
    Tag(String),
    /// The title starts with a skipped prefix (titlefied).
    TitlePrefix(String),
    /// The title is on a clone list's remove list.
    Removed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "skipped tag \"{tag}\""),
            Self::TitlePrefix(prefix) => write!(f, "skipped title prefix \"{prefix}\""),
            Self::Removed => write!(f, "removed by clone list"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRules {
    /// Titlefied foreign title → canonical title.
    aliases: HashMap<String, String>,
    /// Titlefied canonical title → its spelling and foreign titles, in
    /// insertion order.
    foreign_titles: HashMap<String, (String, Vec<String>)>,
    removed_titles: HashSet<String>,
    skip_tags: HashSet<String>,
    skip_title_prefixes: Vec<String>,
}

impl CollectionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `foreign` as another name of `canonical`.
    pub fn add_alias(&mut self, canonical: &str, foreign: &str) {
        self.aliases
            .insert(titlefy(foreign), canonical.to_string());
        let (_, known) = self
            .foreign_titles
            .entry(titlefy(canonical))
            .or_insert_with(|| (canonical.to_string(), Vec::new()));
        if !known.iter().any(|t| t == foreign) {
            known.push(foreign.to_string());
        }
    }

    pub fn add_removed_title(&mut self, title: &str) {
        self.removed_titles.insert(titlefy(title));
    }

    pub fn add_skip_tag(&mut self, tag: &str) {
        self.skip_tags.insert(tag.to_lowercase());
    }

    pub fn add_skip_title_prefix(&mut self, prefix: &str) {
        let prefix = titlefy(prefix);
        if !prefix.is_empty() && !self.skip_title_prefixes.contains(&prefix) {
            self.skip_title_prefixes.push(prefix);
        }
    }

    /// Fold another rule set into this one; its aliases win on conflicts.
    pub fn merge(&mut self, other: CollectionRules) {
        for (canonical, foreign) in other.foreign_titles.into_values() {
            for title in foreign {
                self.add_alias(&canonical, &title);
            }
        }
        self.removed_titles.extend(other.removed_titles);
        self.skip_tags.extend(other.skip_tags);
        for prefix in other.skip_title_prefixes {
            if !self.skip_title_prefixes.contains(&prefix) {
                self.skip_title_prefixes.push(prefix);
            }
        }
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Canonical title for `title`, if it is a known foreign title.
    pub fn canonical_title(&self, title: &str) -> Option<&str> {
        self.aliases.get(&titlefy(title)).map(String::as_str)
    }

    /// Known foreign titles of a canonical title, matched on its titlefied
    /// form so spelling variants such as `7` and `VII` agree.
    pub fn foreign_titles(&self, canonical: &str) -> Option<&[String]> {
        self.foreign_titles
            .get(&titlefy(canonical))
            .map(|(_, foreign)| foreign.as_slice())
    }

    /// Check a file against the skip tags, skip prefixes and removed titles,
    /// in that order.
    pub fn skip_reason(&self, file: &FileInfo) -> Option<SkipReason> {
        if let Some(tag) = file
            .tags
            .iter()
            .map(str::to_lowercase)
            .find(|t| self.skip_tags.contains(t))
        {
            return Some(SkipReason::Tag(tag));
        }

        let key = titlefy(&file.game_title);
        if let Some(prefix) = self
            .skip_title_prefixes
            .iter()
            .find(|p| key.starts_with(p.as_str()))
        {
            return Some(SkipReason::TitlePrefix(prefix.clone()));
        }

        if self.removed_titles.contains(&key) {
            return Some(SkipReason::Removed);
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod tests;
