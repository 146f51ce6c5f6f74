//! Region vocabulary and region/language classification of tag sets.
//!
//! Classification is a pure function of a [`TagSet`]: the region set is the
//! intersection of the tags with the region vocabulary, the translation flag
//! comes from translation-credit tags, and the language set follows a fixed
//! priority chain (translation codes, explicit language tags, then region
//! based gap-filling).

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tags::TagSet;

/// Geographic/market regions recognised in filename tags.
///
/// Variant order is the order used for region sets and region partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    World,
    #[serde(rename = "USA")]
    Usa,
    Japan,
    Europe,
    Asia,
    Australia,
    Austria,
    Belgium,
    Brazil,
    Canada,
    China,
    Denmark,
    Finland,
    France,
    Germany,
    Greece,
    #[serde(rename = "Hong Kong")]
    HongKong,
    Ireland,
    Israel,
    Italy,
    Korea,
    #[serde(rename = "Latin America")]
    LatinAmerica,
    Mexico,
    Netherlands,
    #[serde(rename = "New Zealand")]
    NewZealand,
    Norway,
    Poland,
    Portugal,
    Russia,
    Scandinavia,
    Spain,
    Sweden,
    Switzerland,
    Taiwan,
    #[serde(rename = "UK")]
    Uk,
    /// No region tag was found in the filename.
    Unknown,
}

/// Error returned when a configured region name is not in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl Region {
    /// Every region, in set order.
    pub const ALL: &'static [Region] = &[
        Self::World,
        Self::Usa,
        Self::Japan,
        Self::Europe,
        Self::Asia,
        Self::Australia,
        Self::Austria,
        Self::Belgium,
        Self::Brazil,
        Self::Canada,
        Self::China,
        Self::Denmark,
        Self::Finland,
        Self::France,
        Self::Germany,
        Self::Greece,
        Self::HongKong,
        Self::Ireland,
        Self::Israel,
        Self::Italy,
        Self::Korea,
        Self::LatinAmerica,
        Self::Mexico,
        Self::Netherlands,
        Self::NewZealand,
        Self::Norway,
        Self::Poland,
        Self::Portugal,
        Self::Russia,
        Self::Scandinavia,
        Self::Spain,
        Self::Sweden,
        Self::Switzerland,
        Self::Taiwan,
        Self::Uk,
        Self::Unknown,
    ];

    /// Returns the canonical name of this region as it appears in tags.
    pub fn name(&self) -> &'static str {
        match self {
            Self::World => "World",
            Self::Usa => "USA",
            Self::Japan => "Japan",
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::Australia => "Australia",
            Self::Austria => "Austria",
            Self::Belgium => "Belgium",
            Self::Brazil => "Brazil",
            Self::Canada => "Canada",
            Self::China => "China",
            Self::Denmark => "Denmark",
            Self::Finland => "Finland",
            Self::France => "France",
            Self::Germany => "Germany",
            Self::Greece => "Greece",
            Self::HongKong => "Hong Kong",
            Self::Ireland => "Ireland",
            Self::Israel => "Israel",
            Self::Italy => "Italy",
            Self::Korea => "Korea",
            Self::LatinAmerica => "Latin America",
            Self::Mexico => "Mexico",
            Self::Netherlands => "Netherlands",
            Self::NewZealand => "New Zealand",
            Self::Norway => "Norway",
            Self::Poland => "Poland",
            Self::Portugal => "Portugal",
            Self::Russia => "Russia",
            Self::Scandinavia => "Scandinavia",
            Self::Spain => "Spain",
            Self::Sweden => "Sweden",
            Self::Switzerland => "Switzerland",
            Self::Taiwan => "Taiwan",
            Self::Uk => "UK",
            Self::Unknown => "Unknown",
        }
    }

    /// Match a tag exactly against the region vocabulary.
    ///
    /// Accepts the canonical names, `"United Kingdom"`, and the one-letter
    /// GoodTools codes `J`, `U` and `E`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "J" => return Some(Self::Japan),
            "U" => return Some(Self::Usa),
            "E" => return Some(Self::Europe),
            "United Kingdom" => return Some(Self::Uk),
            _ => {}
        }
        Self::ALL.iter().copied().find(|r| r.name() == tag)
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    /// Case-insensitive parse used for configuration values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("united kingdom") {
            return Ok(Self::Uk);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRegion(trimmed.to_string()))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ── Classification ──────────────────────────────────────────────────────────

/// Regions, languages and translation status derived from a tag set.
///
/// An empty language set is a valid outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionInfo {
    pub regions: BTreeSet<Region>,
    pub languages: BTreeSet<String>,
    pub is_translated: bool,
}

/// Knobs for [`classify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Language assumed for files whose only region is [`Region::Unknown`]
    /// and that carry no other language signal. `None` leaves the language
    /// set empty.
    pub unknown_region_language: Option<String>,
}

/// `T-En`, `T+Ja`, `Translated Fr`: captures the two-letter language code.
static RE_TRANSLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:T[-+]|Translated )(\w{2})\b").expect("Invalid translation regex")
});

/// Explicit language tag such as `En` or `Fr`.
static RE_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]$").expect("Invalid language regex"));

/// Regions whose releases are assumed to contain English.
const ENGLISH_REGIONS: &[Region] = &[
    Region::Usa,
    Region::World,
    Region::Australia,
    Region::Uk,
    Region::Canada,
    Region::Ireland,
];

/// Region → language fallback chain. First matching row wins.
const REGION_LANGUAGES: &[(&[Region], &str)] = &[
    (&[Region::Japan], "Ja"),
    (&[Region::Brazil, Region::Portugal], "Pt"),
    (&[Region::Spain, Region::LatinAmerica], "Es"),
    (
        &[Region::Asia, Region::China, Region::HongKong, Region::Taiwan],
        "Zh",
    ),
    (&[Region::Austria, Region::Germany], "De"),
    (&[Region::Belgium, Region::Netherlands], "Nl"),
    (&[Region::Denmark], "Dk"),
    (&[Region::Finland], "Fi"),
    (&[Region::France], "Fr"),
    (&[Region::Greece], "El"),
    (&[Region::Italy], "It"),
    (&[Region::Israel], "He"),
    (&[Region::Korea], "Ko"),
    (&[Region::Norway], "No"),
    (&[Region::Poland], "Pl"),
    (&[Region::Russia], "Ru"),
    (&[Region::Sweden], "Sv"),
];

/// Returns true if any tag carries a translation credit (`T-En ...`).
pub fn is_translated(tags: &TagSet) -> bool {
    tags.iter().any(|t| RE_TRANSLATION.is_match(t))
}

/// Derive [`RegionInfo`] from a tag set.
///
/// # Examples
///
/// ```
/// use romcull_core::region::{classify, ClassifyOptions, Region};
/// use romcull_core::tags::TagSet;
///
/// let info = classify(&TagSet::from_tags(["Japan", "T-En by X v1.0"]), &ClassifyOptions::default());
/// assert!(info.regions.contains(&Region::Japan));
/// assert_eq!(info.languages.iter().collect::<Vec<_>>(), vec!["En"]);
/// assert!(info.is_translated);
/// ```
pub fn classify(tags: &TagSet, options: &ClassifyOptions) -> RegionInfo {
    let regions: BTreeSet<Region> = tags.iter().filter_map(Region::from_tag).collect();

    let translated: BTreeSet<String> = tags
        .iter()
        .flat_map(|t| RE_TRANSLATION.captures_iter(t))
        .map(|cap| cap[1].to_string())
        .collect();
    let is_translated = !translated.is_empty();

    let languages = if is_translated {
        translated
    } else {
        let mut languages: BTreeSet<String> = tags
            .iter()
            .filter(|t| RE_LANGUAGE.is_match(t))
            .map(str::to_string)
            .collect();
        fill_languages_from_regions(&regions, &mut languages);

        if languages.is_empty() && regions.len() == 1 && regions.contains(&Region::Unknown) {
            if let Some(lang) = &options.unknown_region_language {
                languages.insert(lang.clone());
            }
        }
        languages
    };

    RegionInfo {
        regions,
        languages,
        is_translated,
    }
}

/// Add the language implied by the region set.
fn fill_languages_from_regions(regions: &BTreeSet<Region>, languages: &mut BTreeSet<String>) {
    if ENGLISH_REGIONS.iter().any(|r| regions.contains(r)) {
        languages.insert("En".to_string());
        return;
    }
    if regions.contains(&Region::Europe) && languages.is_empty() {
        languages.insert("En".to_string());
        return;
    }
    if let Some((_, lang)) = REGION_LANGUAGES
        .iter()
        .find(|(row, _)| row.iter().any(|r| regions.contains(r)))
    {
        languages.insert(lang.to_string());
    }
}

#[cfg(test)]
#[path = "tests/region_tests.rs"]
mod tests;
