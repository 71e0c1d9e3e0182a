use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use graphgen::config::{CONFIG_FILE, GraphgenConfig};

/// The crate a command operates on
pub struct ProjectContext {
    /// Directory holding the crate's Cargo.toml
    pub project_root: PathBuf,
    /// Where graphgen.toml lives, whether or not it exists yet
    pub config_path: PathBuf,
}

impl ProjectContext {
    /// Find the crate enclosing `start`, or the current directory when `None`
    pub fn locate(start: Option<&Path>) -> Result<Self> {
        let start = match start {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let project_root = find_manifest_dir(&start)?;
        Ok(Self::at(project_root))
    }

    pub fn at(project_root: PathBuf) -> Self {
        let config_path = project_root.join(CONFIG_FILE);
        Self {
            project_root,
            config_path,
        }
    }

    /// Read graphgen.toml, falling back to defaults when it is absent.
    ///
    /// Kept separate from `locate` so `init --force` can replace a broken file.
    pub fn load_config(&self) -> Result<GraphgenConfig> {
        GraphgenConfig::load(&self.project_root).with_context(|| format!("Failed to load {}", self.config_path.display()))
    }

    pub fn is_initialized(&self) -> bool {
        self.config_path.exists()
    }
}

fn find_manifest_dir(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("Cargo.toml").is_file())
        .map(Path::to_path_buf)
        .with_context(|| format!("No Cargo.toml in {} or its parents", start.display()))
}
