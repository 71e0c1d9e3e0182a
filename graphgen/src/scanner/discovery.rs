//! File discovery for finding Rust sources to scan.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::ScanSettings;
use crate::errors::{GraphgenError, Result};

/// Discovered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to project root
    pub relative_path: PathBuf,
}

/// Discover all Rust files below the configured source directories.
///
/// Hidden entries and excluded directory names are pruned. Missing source
/// directories are skipped; any other filesystem error aborts the scan.
pub fn discover_sources(project_root: &Path, settings: &ScanSettings) -> Result<Vec<DiscoveredFile>> {
    let mut discovered = Vec::new();

    for dir in &settings.dirs {
        let search_path = project_root.join(dir);
        if !search_path.exists() {
            continue;
        }

        let walker = WalkDir::new(&search_path)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry, &settings.exclude));

        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| search_path.clone());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                GraphgenError::Io { path, source }
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }

            let relative_path = path.strip_prefix(project_root).unwrap_or(path).to_path_buf();
            discovered.push(DiscoveredFile {
                path: path.to_path_buf(),
                relative_path,
            });
        }
    }

    // Sort by relative path for consistent ordering
    discovered.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    discovered.dedup_by(|a, b| a.relative_path == b.relative_path);

    Ok(discovered)
}

fn is_pruned(entry: &DirEntry, exclude: &[String]) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && exclude.iter().any(|excluded| excluded.as_str() == name.as_ref())
}
