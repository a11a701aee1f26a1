//! Directory walker: enumerate candidate files under the scan root,
//! skipping excluded directory names, loading each file's content once.
//!
//! Traversal is depth-first and name-sorted, so downstream claim
//! resolution sees a deterministic order regardless of filesystem state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::classify::{SCRIPT_EXTENSIONS, STYLE_EXTENSIONS, TEMPLATE_EXTENSIONS};
use crate::error::{PorterError, Result};

/// A candidate file with its content loaded. Immutable after creation.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
    /// Lowercased extension.
    pub extension: String,
    pub content: String,
}

#[derive(Debug)]
pub struct ScanOutput {
    pub files: Vec<ScannedFile>,
    /// Per-entry failures that were skipped rather than propagated.
    pub warnings: Vec<String>,
}

/// Walk the root and load every candidate file. Only the root itself being
/// unreadable is fatal; unreadable entries become warnings.
pub fn scan_root(root: &Path, excluded_dirs: &[String]) -> Result<ScanOutput> {
    fs::read_dir(root).map_err(|source| PorterError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    let mut warnings = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, excluded_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable directory entry");
                warnings.push(format!("skipped unreadable entry: {err}"));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let extension = entry
            .path()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !is_candidate_extension(&extension) {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(content) => {
                let relative_path = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                debug!(path = %entry.path().display(), "Scanned candidate file");
                files.push(ScannedFile {
                    path: entry.path().to_path_buf(),
                    relative_path,
                    extension,
                    content,
                });
            }
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Skipping unreadable file");
                warnings.push(format!(
                    "skipped unreadable file {}: {err}",
                    entry.path().display()
                ));
            }
        }
    }

    Ok(ScanOutput { files, warnings })
}

fn is_excluded_dir(entry: &DirEntry, excluded_dirs: &[String]) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| excluded_dirs.iter().any(|excluded| excluded == name))
        .unwrap_or(false)
}

fn is_candidate_extension(extension: &str) -> bool {
    SCRIPT_EXTENSIONS.contains(&extension)
        || STYLE_EXTENSIONS.contains(&extension)
        || TEMPLATE_EXTENSIONS.contains(&extension)
}
