//! graphgen core library.
//!
//! Reads structs annotated with graph-schema directives and builds a
//! cross-referenced model of entities, edges, indexes and search fields for a
//! code emission stage to consume.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize, GraphEntity)]
//! #[allow(non_snake_case)]
//! pub struct Film {
//!     #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
//!     pub UID: String,
//!     #[serde(rename = "dgraph.type")]
//!     pub DType: Vec<String>,
//!     #[dgraph("index=hash,term,trigram,fulltext")]
//!     pub Name: String,
//!     #[dgraph("predicate=genre,reverse,count")]
//!     pub Genres: Vec<Genre>,
//! }
//! ```
//!
//! The pipeline is [`scanner::scan_package`] (or hand-built
//! [`source::TypeDecl`]s) → [`builder::EntityBuilder`] → [`model::Package`].

extern crate self as graphgen;

pub mod annotation;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod inference;
pub mod model;
pub mod scanner;
pub mod source;

pub use annotation::{Directives, apply_directives};
pub use builder::{EntityBuilder, TypeIndex};
pub use config::{Conventions, GraphgenConfig};
pub use diagnostics::Diagnostic;
pub use errors::*;
pub use graphgen_macros::GraphEntity;
pub use model::{Entity, Field, Package, TypeName};

use std::path::Path;

/// Compile-time view of a struct deriving [`GraphEntity`].
pub trait GraphType {
    /// The struct name.
    const TYPE_NAME: &'static str;

    /// `(field, raw directive string)` for every field carrying a `dgraph` attribute.
    const DIRECTIVES: &'static [(&'static str, &'static str)];

    /// Parsed directives of one field, if it has any.
    fn directives_for(field: &str) -> Option<Directives> {
        Self::DIRECTIVES
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, raw)| Directives::parse(raw))
    }
}

/// Scan the project at `root` with its `graphgen.toml` and build the package model.
pub fn build_project(root: &Path) -> Result<(Package, Vec<Diagnostic>)> {
    let config = GraphgenConfig::load(root)?;
    build_project_with(root, &config)
}

/// Scan the project at `root` with an explicit configuration and build the package model.
pub fn build_project_with(root: &Path, config: &GraphgenConfig) -> Result<(Package, Vec<Diagnostic>)> {
    let source = scanner::scan_package(root, config)?;
    let builder = EntityBuilder::with_conventions(config.conventions.clone());
    Ok(builder.build_with_report(source.name, &source.types))
}
