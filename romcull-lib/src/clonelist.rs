//! Clone-list loading.
//!
//! A clone list is a JSON file mapping English titles to the foreign titles
//! the same game was released under, plus titles to drop entirely:
//!
//! ```json
//! {
//!   "renames": { "Mega Man": ["Rockman", ["Rock Man", 2]] },
//!   "removes": { "Kiosk Demo Disc": {} }
//! }
//! ```
//!
//! Each foreign title entry is either a plain string or a `[title, n]` pair;
//! the number is ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use romcull_core::CollectionRules;

use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize)]
struct CloneList {
    #[serde(default)]
    renames: BTreeMap<String, Vec<ForeignTitle>>,
    #[serde(default)]
    removes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ForeignTitle {
    Plain(String),
    Numbered(String, serde_json::Value),
}

impl ForeignTitle {
    fn title(&self) -> &str {
        match self {
            Self::Plain(title) | Self::Numbered(title, _) => title,
        }
    }
}

/// Parse clone-list JSON into collection rules. `source` is only used in
/// error messages.
pub fn parse_clonelist(contents: &str, source: &Path) -> Result<CollectionRules, ConfigError> {
    let list: CloneList = serde_json::from_str(contents).map_err(|e| ConfigError::Json {
        path: source.display().to_string(),
        source: e,
    })?;

    let mut rules = CollectionRules::new();
    for (english, foreign) in &list.renames {
        for entry in foreign {
            let title = entry.title().trim();
            if !title.is_empty() {
                rules.add_alias(english, title);
            }
        }
    }
    for title in list.removes.keys() {
        rules.add_removed_title(title);
    }
    Ok(rules)
}

/// Load one clone-list file.
pub fn load_clonelist(path: &Path) -> Result<CollectionRules, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let rules = parse_clonelist(&contents, path)?;
    log::debug!("Loaded clone list {}", path.display());
    Ok(rules)
}

/// Load and merge clone lists from `dir` in the given order; later lists win
/// when they rename the same foreign title.
pub fn load_clonelists(dir: &Path, names: &[String]) -> Result<CollectionRules, ConfigError> {
    let mut rules = CollectionRules::new();
    for name in names {
        rules.merge(load_clonelist(&dir.join(name))?);
    }
    Ok(rules)
}

#[cfg(test)]
#[path = "tests/clonelist_tests.rs"]
mod tests;
