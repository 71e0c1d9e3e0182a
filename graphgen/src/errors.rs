use std::path::PathBuf;

use thiserror::Error;

/// Structural failures that abort a build.
///
/// Anything below the file level (unknown directive tokens, types without
/// identity fields) degrades gracefully and never surfaces here.
#[derive(Debug, Error)]
pub enum GraphgenError {
    /// A source, manifest or config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// `Cargo.toml` exists but could not be parsed.
    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `graphgen.toml` exists but could not be parsed.
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configured source directories contain no Rust files.
    #[error("no Rust sources found under {path}")]
    NoSources { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, GraphgenError>;
