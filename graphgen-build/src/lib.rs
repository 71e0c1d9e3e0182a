//! Build-time model generator for graphgen.
//!
//! Scans the crate's annotated structs, builds the package model and writes
//! it as JSON for later code emission stages.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     graphgen_build::generate_model()
//!         .output_file("src/generated/graph_model.json")
//!         .run()
//!         .expect("Failed to generate graph model");
//!
//!     println!("cargo:rerun-if-changed=src/");
//! }
//! ```

mod generator;

pub use generator::{GenerationReport, ModelGenerator};

/// Create a new model generator with default settings.
pub fn generate_model() -> ModelGenerator {
    ModelGenerator::new()
}
