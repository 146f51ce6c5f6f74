//! Title extraction, canonicalization and grouping.

use std::collections::HashMap;

use crate::tags::TagSet;
use crate::types::{FileInfo, TitleGroup};

const ROMAN_NUMERALS: [&str; 25] = [
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi", "xvii", "xviii", "xix", "xx", "xxi", "xxii", "xxiii", "xxiv", "xxv",
];

/// Title text of a filename: everything before the title boundary, or before
/// the extension when no boundary is known.
pub fn extract_title(file_name: &str, tags: &TagSet) -> String {
    let end = match tags.title_boundary() {
        Some(boundary) => boundary,
        None => file_name.rfind('.').unwrap_or(file_name.len()),
    };
    file_name[..end].trim().to_string()
}

/// Canonical grouping key for a title.
///
/// Numbers 1–25 become lowercase Roman numerals, larger numbers are kept as
/// digits, every other non-letter is dropped and letters are lowercased.
///
/// ```
/// use romcull_core::title::titlefy;
///
/// assert_eq!(titlefy("Final Fantasy 7"), titlefy("Final Fantasy VII"));
/// assert_eq!(titlefy("Street Fighter II: The World Warrior"), "streetfighteriitheworldwarrior");
/// assert_eq!(titlefy("FIFA 98"), "fifa98");
/// ```
pub fn titlefy(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut chars = title.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut digits = String::from(c);
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            match digits.parse::<usize>() {
                Ok(n) if (1..=ROMAN_NUMERALS.len()).contains(&n) => {
                    out.push_str(ROMAN_NUMERALS[n - 1]);
                }
                _ => out.push_str(&digits),
            }
        } else if c.is_alphabetic() {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Partition files into per-game groups keyed by canonical title.
///
/// `aliases` maps titlefied foreign titles to the canonical title that
/// replaces them before canonicalization. Groups come out in first-seen
/// order, and every input file lands in exactly one group.
pub fn group_by_title(
    files: Vec<FileInfo>,
    aliases: Option<&HashMap<String, String>>,
) -> Vec<TitleGroup> {
    let mut groups: Vec<TitleGroup> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for file in files {
        let title = aliases
            .and_then(|a| a.get(&titlefy(&file.game_title)))
            .cloned()
            .unwrap_or_else(|| file.game_title.clone());
        let key = titlefy(&title);

        match by_key.get(&key) {
            Some(&index) => groups[index].files.push(file),
            None => {
                by_key.insert(key.clone(), groups.len());
                groups.push(TitleGroup {
                    title,
                    key,
                    files: vec![file],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
#[path = "tests/title_tests.rs"]
mod tests;
