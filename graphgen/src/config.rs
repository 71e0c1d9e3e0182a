//! Project configuration stored in `graphgen.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GraphgenError, Result};

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "graphgen.toml";

/// Configuration stored in graphgen.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphgenConfig {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub conventions: Conventions,
    #[serde(default)]
    pub diagnostics: DiagnosticsSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Source directories, relative to the project root
    #[serde(default = "default_scan_dirs")]
    pub dirs: Vec<String>,
    /// Directory names skipped anywhere below the source directories
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            dirs: default_scan_dirs(),
            exclude: default_exclude(),
        }
    }
}

fn default_scan_dirs() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["target".to_string(), "generated".to_string()]
}

/// Naming conventions used to recognise entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Name of the `String` identity field
    #[serde(default = "default_uid_field")]
    pub uid_field: String,
    /// Name of the `Vec<String>` type-discriminator field
    #[serde(default = "default_dtype_field")]
    pub dtype_field: String,
    /// Field attribute holding the graph-schema directives.
    ///
    /// Only the source scanner honors this. `#[derive(GraphEntity)]` always
    /// reads `#[dgraph(...)]`, since rustc rejects attributes a derive does not
    /// register, so any other name is limited to scanned crates without the derive.
    #[serde(default = "default_schema_attribute")]
    pub schema_attribute: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            uid_field: default_uid_field(),
            dtype_field: default_dtype_field(),
            schema_attribute: default_schema_attribute(),
        }
    }
}

fn default_uid_field() -> String {
    "UID".to_string()
}

fn default_dtype_field() -> String {
    "DType".to_string()
}

fn default_schema_attribute() -> String {
    "dgraph".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsSettings {
    /// Report diagnostics as warnings instead of staying silent
    #[serde(default)]
    pub warn: bool,
}

impl GraphgenConfig {
    /// Load `graphgen.toml` from `root`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| GraphgenError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| GraphgenError::Config { path, source })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Render as TOML, as written by `graphgen init`.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphgenConfig::default();
        assert_eq!(config.scan.dirs, vec!["src"]);
        assert_eq!(config.scan.exclude, vec!["target", "generated"]);
        assert_eq!(config.conventions.uid_field, "UID");
        assert_eq!(config.conventions.dtype_field, "DType");
        assert_eq!(config.conventions.schema_attribute, "dgraph");
        assert!(!config.diagnostics.warn);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = GraphgenConfig::from_toml(
            r#"
            [conventions]
            uid_field = "uid"

            [diagnostics]
            warn = true
            "#,
        )
        .unwrap();
        assert_eq!(config.conventions.uid_field, "uid");
        assert_eq!(config.conventions.dtype_field, "DType");
        assert_eq!(config.scan.dirs, vec!["src"]);
        assert!(config.diagnostics.warn);
    }

    #[test]
    fn test_config_serialization() {
        let config = GraphgenConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("uid_field"));
        assert!(toml_str.contains("schema_attribute"));
        assert_eq!(GraphgenConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GraphgenConfig::load(dir.path()).unwrap();
        assert_eq!(config, GraphgenConfig::default());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[scan\ndirs = 3").unwrap();
        let err = GraphgenConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, GraphgenError::Config { .. }));
    }
}
