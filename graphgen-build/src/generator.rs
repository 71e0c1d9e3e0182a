//! Model generator for build scripts.

use anyhow::{Context, Result};
use graphgen::{Diagnostic, EntityBuilder, GraphgenConfig, Package, scanner};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for configuring and running the model generator.
pub struct ModelGenerator {
    project_root: Option<PathBuf>,
    output_file: PathBuf,
    package_name: Option<String>,
    config: Option<GraphgenConfig>,
}

/// Outcome of a generator run.
#[derive(Debug)]
pub struct GenerationReport {
    pub package: Package,
    pub diagnostics: Vec<Diagnostic>,
    /// Path of the JSON model, resolved against the project root
    pub output_file: PathBuf,
    /// False when the existing file already held the same model
    pub written: bool,
}

impl ModelGenerator {
    /// Create a new generator with default settings.
    pub fn new() -> Self {
        Self {
            project_root: None,
            output_file: PathBuf::from("src/generated/graph_model.json"),
            package_name: None,
            config: None,
        }
    }

    /// Set the project root.
    ///
    /// Default: `CARGO_MANIFEST_DIR`, or the current directory outside cargo
    pub fn project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Set the output file, relative paths resolve against the project root.
    ///
    /// Default: `src/generated/graph_model.json`
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Override the package name read from `Cargo.toml`.
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Use this configuration instead of the project's `graphgen.toml`.
    pub fn config(mut self, config: GraphgenConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Run the generator.
    pub fn run(self) -> Result<GenerationReport> {
        let project_root = match self.project_root {
            Some(root) => root,
            None => match std::env::var_os("CARGO_MANIFEST_DIR") {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir().context("Failed to get current directory")?,
            },
        };

        let config = match self.config {
            Some(config) => config,
            None => GraphgenConfig::load(&project_root)
                .with_context(|| format!("Failed to load configuration for {}", project_root.display()))?,
        };

        let source = scanner::scan_package(&project_root, &config)
            .with_context(|| format!("Failed to scan {}", project_root.display()))?;
        let package_name = self.package_name.unwrap_or(source.name);

        let builder = EntityBuilder::with_conventions(config.conventions.clone());
        let (package, diagnostics) = builder.build_with_report(package_name, &source.types);

        if config.diagnostics.warn {
            for diagnostic in &diagnostics {
                println!("cargo:warning=graphgen: {diagnostic}");
            }
        }

        let json = serde_json::to_string_pretty(&package).context("Failed to serialize package model")?;
        let output_file = resolve(&project_root, &self.output_file);
        let written = write_if_changed(&output_file, &format!("{json}\n"))?;

        if written {
            eprintln!(
                "graphgen-build: Generated {} with {} entities",
                output_file.display(),
                package.entities.len()
            );
        }

        Ok(GenerationReport {
            package,
            diagnostics,
            output_file,
            written,
        })
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { root.join(path) }
}

/// Only write if content has changed, which avoids needless recompilation.
fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILM: &str = r#"
use serde::Serialize;

#[derive(Serialize)]
#[allow(non_snake_case)]
pub struct Film {
    #[serde(rename = "uid")]
    pub UID: String,
    #[serde(rename = "dgraph.type")]
    pub DType: Vec<String>,
    #[serde(rename = "name")]
    #[dgraph("index=term,fulltext")]
    pub Name: String,
}

#[derive(Serialize)]
pub struct Scratch {
    pub note: String,
}
"#;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"cinema\"\nversion = \"0.1.0\"\n").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), FILM).unwrap();
        dir
    }

    #[test]
    fn test_writes_model_json() {
        let dir = project();
        let report = generate_model_for(dir.path()).run().unwrap();

        assert!(report.written);
        assert_eq!(report.package.name, "cinema");
        assert_eq!(report.package.entity_names(), vec!["Film"]);
        assert_eq!(report.diagnostics.len(), 1);

        let written = fs::read_to_string(dir.path().join("src/generated/graph_model.json")).unwrap();
        let package: Package = serde_json::from_str(&written).unwrap();
        assert_eq!(package, report.package);
        assert!(package.entities[0].searchable);
    }

    #[test]
    fn test_second_run_leaves_file_untouched() {
        let dir = project();
        assert!(generate_model_for(dir.path()).run().unwrap().written);
        assert!(!generate_model_for(dir.path()).run().unwrap().written);
    }

    #[test]
    fn test_package_name_and_output_overrides() {
        let dir = project();
        let report = generate_model_for(dir.path())
            .package_name("movies")
            .output_file("model/movies.json")
            .run()
            .unwrap();

        assert_eq!(report.package.name, "movies");
        assert_eq!(report.output_file, dir.path().join("model/movies.json"));
        assert!(report.output_file.exists());
    }

    #[test]
    fn test_missing_sources_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(generate_model_for(dir.path()).run().is_err());
    }

    fn generate_model_for(root: &Path) -> ModelGenerator {
        crate::generate_model().project_root(root)
    }
}
