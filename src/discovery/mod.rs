//! Scheme file discovery and loading for chroma projects.
//!
//! Finds every `*.colours.yaml` file under a project directory, either by
//! scanning the whole directory or by following a `chroma.yaml` manifest,
//! and loads them into a [`Chroma`] engine.
//!
//! # Example
//!
//! ```ignore
//! use chroma::discovery::discover;
//!
//! let result = discover("./styles")?;
//! println!("Found {} scheme files", result.scan.total());
//!
//! let chroma = result.into_chroma()?;
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::host::Chroma;

pub use loader::{
    load_project, parse_scheme_file, yaml_value, ColourDecl, FunctionDecl, LoadOptions,
    SchemeDecl, SchemeFile,
};
pub use manifest::{DefaultScheme, Manifest};
pub use scanner::{is_scheme_file, scan_directory, scan_sources, ScanResult, SCHEME_FILE_SUFFIX};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "chroma.yaml";

/// Result of discovering scheme files in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (may be default if no chroma.yaml found).
    pub manifest: Manifest,

    /// Whether a chroma.yaml manifest was found.
    pub has_manifest: bool,

    /// Scan results with discovered files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Load all discovered files with the builtin functions.
    pub fn into_chroma(self) -> Result<Chroma> {
        self.into_chroma_with_options(LoadOptions::with_builtins())
    }

    /// Load all discovered files with custom options.
    pub fn into_chroma_with_options(self, options: LoadOptions) -> Result<Chroma> {
        load_project(&self.scan, &self.manifest, &options)
    }
}

/// Discover scheme files in a project directory.
///
/// Looks for a `chroma.yaml` manifest in the root directory. If found,
/// uses the manifest's source paths. Otherwise, scans the entire
/// directory.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let scan = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover scheme files from specific paths (no manifest lookup).
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest));
        } else if path.is_file() && is_scheme_file(path) {
            scan.merge(ScanResult {
                files: vec![path.clone()],
            });
        }
    }

    let root = paths
        .first()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}
