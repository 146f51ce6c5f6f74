//! Directory scanner for ROM collections.
//!
//! Walks each input root recursively and returns one [`FileDescriptor`] per
//! file, with its directory relative to the root it was found under.

use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use romcull_core::FileDescriptor;

/// Which files the scanner keeps.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Lower-cased extensions, without the dot, to leave out.
    skip_extensions: BTreeSet<String>,
}

impl ScanFilter {
    pub fn new<I, S>(skip_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skip_extensions: skip_extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Hidden entries (leading `.`) are never kept.
    fn keeps_entry(&self, name: &str) -> bool {
        !name.starts_with('.')
    }

    fn keeps_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| !self.skip_extensions.contains(&e.to_lowercase()))
            .unwrap_or(true)
    }
}

/// List every file under `roots`, in sorted path order per root.
///
/// A root that does not exist is skipped with a warning. Symlinked
/// directories are followed, but each real directory is walked once.
pub fn list_files_flat(roots: &[PathBuf], filter: &ScanFilter) -> io::Result<Vec<FileDescriptor>> {
    let mut files = Vec::new();
    let mut visited = HashSet::new();
    for root in roots {
        if !root.is_dir() {
            log::warn!("Input directory not found, skipping: {}", root.display());
            continue;
        }
        let root = std::path::absolute(root)?;
        let before = files.len();
        walk(&root, &root, filter, &mut visited, &mut files)?;
        log::debug!("Found {} file(s) in {}", files.len() - before, root.display());
    }
    Ok(files)
}

fn walk(
    root: &Path,
    dir: &Path,
    filter: &ScanFilter,
    visited: &mut HashSet<PathBuf>,
    out: &mut Vec<FileDescriptor>,
) -> io::Result<()> {
    if !visited.insert(dir.canonicalize()?) {
        log::warn!("Skipping already scanned directory: {}", dir.display());
        return Ok(());
    }

    let mut entries: Vec<std::fs::DirEntry> = std::fs::read_dir(dir)?.flatten().collect();
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non-UTF-8 path: {}", path.display());
            continue;
        };
        if !filter.keeps_entry(name) {
            continue;
        }

        if path.is_dir() {
            walk(root, &path, filter, visited, out)?;
        } else if path.is_file() && filter.keeps_file(&path) {
            let relative_dir = pathdiff::diff_paths(dir, root).unwrap_or_default();
            out.push(FileDescriptor::new(dir, relative_dir, name));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
