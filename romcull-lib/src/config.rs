//! Collection configuration.
//!
//! The collections file lives at `~/.config/romcull/collections.toml` unless
//! a path is given explicitly. Every value is normalized once here (lower-cased
//! tags and extensions, titlefied prefixes, parsed regions) so the pipeline
//! never re-normalizes configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use romcull_core::{ClassifyOptions, CollectionRules, CurateOptions, Region, SelectionPolicy};

use crate::bizhawk::BizhawkSystem;
use crate::error::ConfigError;
use crate::mover::{PlacementOptions, UnzipMode};

/// Canonical path to the collections file: `~/.config/romcull/collections.toml`.
pub fn default_config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romcull").join("collections.toml")
}

// ── On-disk shape ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    input_root: PathBuf,
    output_root: PathBuf,
    clonelist_dir: Option<PathBuf>,
    #[serde(default)]
    skip_file_extensions: Vec<String>,
    #[serde(default)]
    skip_file_tags: Vec<String>,
    #[serde(default)]
    skip_title_prefixes: Vec<String>,
    unknown_region_language: Option<String>,
    priorities: Option<RawPriorities>,
    #[serde(default, rename = "collection")]
    collections: Vec<RawCollection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPriorities {
    languages: Option<Vec<String>>,
    regions: Option<Vec<String>>,
    bad_tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCollection {
    platform: String,
    output: PathBuf,
    input: Vec<PathBuf>,
    input_root_override: Option<PathBuf>,
    #[serde(default)]
    clonelists: Vec<String>,
    #[serde(default)]
    skip_title_prefixes: Vec<String>,
    unzip: Option<UnzipMode>,
    generate_multi_disc_file: Option<RawMultiDiscFile>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum RawMultiDiscFile {
    #[serde(rename = "BizhawkXML")]
    BizhawkXml,
}

// ── Normalized configuration ────────────────────────────────────────────────

/// Loaded and normalized collections file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where this configuration was read from.
    pub source: PathBuf,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Directory holding clone-list JSON files.
    pub clonelist_dir: PathBuf,
    /// Lower-cased extensions (without the dot) the scanner ignores.
    pub skip_file_extensions: BTreeSet<String>,
    /// Global skip tags and title prefixes shared by every collection.
    pub rules: CollectionRules,
    pub curate: CurateOptions,
    pub collections: Vec<Collection>,
}

/// One `[[collection]]` entry.
#[derive(Debug, Clone)]
pub struct Collection {
    pub platform: String,
    /// Output directory, relative to the output root.
    pub output: PathBuf,
    /// Input directories, relative to the input root.
    pub input: Vec<PathBuf>,
    pub input_root_override: Option<PathBuf>,
    /// Clone-list file names inside the clone-list directory.
    pub clonelists: Vec<String>,
    /// Collection-specific skip prefixes.
    pub rules: CollectionRules,
    /// Extraction and multi-disc file options for the output.
    pub placement: PlacementOptions,
}

impl Collection {
    /// Absolute input directories, honoring the root override.
    pub fn input_dirs(&self, config: &Config) -> Vec<PathBuf> {
        let root = self
            .input_root_override
            .as_ref()
            .unwrap_or(&config.input_root);
        self.input.iter().map(|dir| root.join(dir)).collect()
    }

    pub fn output_dir(&self, config: &Config) -> PathBuf {
        config.output_root.join(&self.output)
    }
}

impl Config {
    /// Read and normalize a collections file. Relative paths inside it are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let config = Self::parse(&contents, path, base_dir)?;
        log::debug!(
            "Loaded {} collection(s) from {}",
            config.collections.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse collections TOML. `source` is only used in error messages.
    pub fn parse(contents: &str, source: &Path, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: source.display().to_string(),
            source: e,
        })?;
        raw.normalize(source, base_dir)
    }

    /// Find a collection by platform name (case-insensitive).
    pub fn collection(&self, platform: &str) -> Option<&Collection> {
        self.collections
            .iter()
            .find(|c| c.platform.eq_ignore_ascii_case(platform.trim()))
    }

    /// Resolve requested platform names, or every collection when none are
    /// given. An unknown name is an error.
    pub fn select_collections(&self, platforms: &[String]) -> Result<Vec<&Collection>, ConfigError> {
        if platforms.is_empty() {
            return Ok(self.collections.iter().collect());
        }
        platforms
            .iter()
            .map(|name| {
                self.collection(name).ok_or_else(|| {
                    ConfigError::invalid(format!(
                        "no collection for platform \"{}\" in {}",
                        name,
                        self.source.display()
                    ))
                })
            })
            .collect()
    }
}

impl RawConfig {
    fn normalize(self, source: &Path, base_dir: &Path) -> Result<Config, ConfigError> {
        let mut rules = CollectionRules::new();
        for tag in &self.skip_file_tags {
            rules.add_skip_tag(tag.trim());
        }
        for prefix in &self.skip_title_prefixes {
            rules.add_skip_title_prefix(prefix);
        }

        let skip_file_extensions = self
            .skip_file_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        let classify = ClassifyOptions {
            unknown_region_language: self
                .unknown_region_language
                .as_deref()
                .map(normalize_language)
                .transpose()?,
        };
        let selection = self.priorities.unwrap_or_default().into_policy()?;

        let mut collections: Vec<Collection> = Vec::with_capacity(self.collections.len());
        for raw in self.collections {
            let collection = raw.normalize(base_dir)?;
            if collections
                .iter()
                .any(|c| c.platform.eq_ignore_ascii_case(&collection.platform))
            {
                return Err(ConfigError::invalid(format!(
                    "duplicate collection for platform \"{}\"",
                    collection.platform
                )));
            }
            collections.push(collection);
        }

        Ok(Config {
            source: source.to_path_buf(),
            input_root: base_dir.join(self.input_root),
            output_root: base_dir.join(self.output_root),
            clonelist_dir: base_dir.join(self.clonelist_dir.unwrap_or_else(|| "clonelists".into())),
            skip_file_extensions,
            rules,
            curate: CurateOptions {
                classify,
                selection,
            },
            collections,
        })
    }
}

impl RawPriorities {
    /// Build a selection policy, keeping the default list for any key left out.
    fn into_policy(self) -> Result<SelectionPolicy, ConfigError> {
        let defaults = SelectionPolicy::default();

        let languages = match self.languages {
            Some(codes) => codes
                .iter()
                .map(|c| normalize_language(c))
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.languages().to_vec(),
        };
        let regions = match self.regions {
            Some(names) => names
                .iter()
                .map(|n| n.parse::<Region>())
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.regions().to_vec(),
        };
        let bad_tags = match self.bad_tags {
            Some(tags) => tags,
            None => defaults.bad_tags().to_vec(),
        };

        Ok(SelectionPolicy::new(languages, regions, bad_tags))
    }
}

impl RawCollection {
    fn normalize(self, base_dir: &Path) -> Result<Collection, ConfigError> {
        let platform = self.platform.trim().to_string();
        if platform.is_empty() {
            return Err(ConfigError::invalid("collection with an empty platform name"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::invalid(format!(
                "collection \"{platform}\" has no output directory"
            )));
        }
        if self.input.is_empty() {
            return Err(ConfigError::invalid(format!(
                "collection \"{platform}\" has no input directories"
            )));
        }

        let mut rules = CollectionRules::new();
        for prefix in &self.skip_title_prefixes {
            rules.add_skip_title_prefix(prefix);
        }

        let bizhawk_system = match self.generate_multi_disc_file {
            Some(RawMultiDiscFile::BizhawkXml) => {
                Some(BizhawkSystem::from_platform(&platform).ok_or_else(|| {
                    ConfigError::invalid(format!(
                        "collection \"{platform}\": no BizHawk disc system matches this \
                         platform name; use one such as \"PlayStation\" or \"TurboGrafx-16 CD\""
                    ))
                })?)
            }
            None => None,
        };

        Ok(Collection {
            platform,
            output: self.output,
            input: self.input,
            input_root_override: self.input_root_override.map(|root| base_dir.join(root)),
            clonelists: self.clonelists,
            rules,
            placement: PlacementOptions {
                unzip: self.unzip,
                bizhawk_system,
            },
        })
    }
}

/// Normalize a two-letter language code to `"En"` form.
fn normalize_language(code: &str) -> Result<String, ConfigError> {
    let trimmed = code.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => Ok(
            format!("{}{}", a.to_ascii_uppercase(), b.to_ascii_lowercase()),
        ),
        _ => Err(ConfigError::invalid(format!(
            "language code must be two letters, got \"{trimmed}\""
        ))),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
