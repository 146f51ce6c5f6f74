//! BizHawk multi-disc XML files.
//!
//! BizHawk opens a multi-disc game through an XML file that lists the disc
//! descriptors of every disc. One file per game is written at the top of the
//! output directory, and `best.json` then points at it instead of the discs.

use std::fs;
use std::path::Path;

use quick_xml::escape::escape;

use crate::error::MoveError;

/// Descriptor extensions BizHawk loads as disc assets.
const DISC_EXTENSIONS: [&str; 3] = ["cue", "mds", "ccd"];

/// BizHawk disc system of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BizhawkSystem {
    Playstation,
    Saturn,
    PcFx,
    SegaCd,
    Tg16Cd,
}

impl BizhawkSystem {
    /// The `System` attribute BizHawk expects.
    pub fn key(self) -> &'static str {
        match self {
            Self::Playstation => "PSX",
            Self::Saturn => "SAT",
            Self::PcFx => "PCFX",
            Self::SegaCd => "SEGACD",
            Self::Tg16Cd => "TG16CD",
        }
    }

    /// Guess the disc system from a collection's platform name.
    ///
    /// - `"Sony - PlayStation"` → `Playstation`
    /// - `"NEC - PC Engine CD"` → `Tg16Cd`
    pub fn from_platform(platform: &str) -> Option<Self> {
        let sys: String = platform
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        let has = |s: &str| sys.contains(s);

        if has("playstation") || has("psx") || has("ps1") {
            Some(Self::Playstation)
        } else if has("saturn") || (has("sat") && has("sega")) {
            Some(Self::Saturn)
        } else if has("pc") && has("fx") {
            Some(Self::PcFx)
        } else if has("sega") && has("cd") {
            Some(Self::SegaCd)
        } else if has("cd") && (has("16") || has("turbo") || has("tg") || has("engine")) {
            Some(Self::Tg16Cd)
        } else {
            None
        }
    }
}

/// XML file name for a game title. Path separators become `-`.
pub fn xml_file_name(title: &str) -> String {
    format!("{}.xml", title.replace(['/', '\\'], "-"))
}

/// Files of `files` that BizHawk can load as discs, in order.
pub fn disc_assets(files: &[String]) -> Vec<&str> {
    files
        .iter()
        .map(String::as_str)
        .filter(|f| {
            Path::new(f)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| DISC_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        })
        .collect()
}

/// Render the XML document for a game.
pub fn bizhawk_xml(title: &str, system: BizhawkSystem, assets: &[&str]) -> String {
    let mut xml = String::new();
    xml.push_str("<BizHawk-XMLGame System=\"");
    xml.push_str(&escape(system.key()));
    xml.push_str("\" Name=\"");
    xml.push_str(&escape(title));
    xml.push_str("\">\n  <LoadAssets>\n");
    for asset in assets {
        xml.push_str("    <Asset FileName=\"");
        xml.push_str(&escape(*asset));
        xml.push_str("\" />\n");
    }
    xml.push_str("  </LoadAssets>\n</BizHawk-XMLGame>\n");
    xml
}

/// Write the XML file of a game into `dir`.
///
/// `files` are the game's placed files relative to `dir`. Returns the XML
/// file name, or `None` when no file is a disc descriptor.
pub fn write_bizhawk_xml(
    dir: &Path,
    title: &str,
    system: BizhawkSystem,
    files: &[String],
) -> Result<Option<String>, MoveError> {
    let assets = disc_assets(files);
    if assets.is_empty() {
        return Ok(None);
    }

    let name = xml_file_name(title);
    let path = dir.join(&name);
    fs::write(&path, bizhawk_xml(title, system, &assets)).map_err(|e| MoveError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Wrote {}", path.display());
    Ok(Some(name))
}

#[cfg(test)]
#[path = "tests/bizhawk_tests.rs"]
mod tests;
