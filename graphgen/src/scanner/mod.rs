//! Rust source front-end.
//!
//! This module provides functionality to:
//! - Discover Rust files below the configured source directories
//! - Parse struct definitions into [`TypeDecl`](crate::source::TypeDecl)s
//! - Resolve the package name from the project manifest

mod discovery;
mod parser;

use std::path::Path;

use log::debug;

use crate::config::GraphgenConfig;
use crate::errors::{GraphgenError, Result};
use crate::source::SourcePackage;

pub use discovery::{DiscoveredFile, discover_sources};
pub use parser::{parse_source, parse_source_file};

/// Scan every source file of the project at `project_root`.
///
/// Any unreadable or unparsable file aborts the scan.
pub fn scan_package(project_root: &Path, config: &GraphgenConfig) -> Result<SourcePackage> {
    let files = discover_sources(project_root, &config.scan)?;
    if files.is_empty() {
        return Err(GraphgenError::NoSources {
            path: project_root.to_path_buf(),
        });
    }

    let mut types = Vec::new();
    for file in &files {
        let declared = parse_source_file(&file.path, &file.relative_path, &config.conventions)?;
        debug!("{}: {} struct(s)", file.relative_path.display(), declared.len());
        types.extend(declared);
    }

    Ok(SourcePackage {
        name: package_name(project_root)?,
        types,
    })
}

/// Package name from `Cargo.toml`, falling back to the directory name.
pub fn package_name(project_root: &Path) -> Result<String> {
    let manifest = project_root.join("Cargo.toml");
    if manifest.exists() {
        let content = std::fs::read_to_string(&manifest).map_err(|source| GraphgenError::Io {
            path: manifest.clone(),
            source,
        })?;
        let table: toml::Table =
            toml::from_str(&content).map_err(|source| GraphgenError::Manifest { path: manifest, source })?;

        if let Some(name) = table
            .get("package")
            .and_then(|package| package.get("name"))
            .and_then(|name| name.as_str())
        {
            return Ok(name.to_string());
        }
    }

    let directory = project_root
        .canonicalize()
        .unwrap_or_else(|_| project_root.to_path_buf());
    Ok(directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}
