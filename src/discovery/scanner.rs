//! File system scanner for discovering scheme files.
//!
//! Recursively scans directories for `*.colours.yaml` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// File suffix that marks a scheme file.
pub const SCHEME_FILE_SUFFIX: &str = ".colours.yaml";

/// Result of scanning for scheme files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered scheme files, in path order.
    pub files: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Merge another scan result into this one, keeping each file once.
    pub fn merge(&mut self, other: ScanResult) {
        for file in other.files {
            if !self.files.contains(&file) {
                self.files.push(file);
            }
        }
    }
}

/// Scan a directory for scheme files.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        // Excludes match against the project-relative path.
        let relative = path.strip_prefix(root).unwrap_or(path);
        if manifest.is_excluded(relative) {
            continue;
        }

        if is_scheme_file(path) {
            result.files.push(path.to_path_buf());
        }
    }

    result
}

/// Scan multiple source paths.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

/// Check if a path names a scheme file.
pub fn is_scheme_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SCHEME_FILE_SUFFIX) && name != SCHEME_FILE_SUFFIX)
}
