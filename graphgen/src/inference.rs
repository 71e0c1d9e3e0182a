//! Entity-level rules applied once all fields of an entity are resolved.
//!
//! Edges and reverse edges are already settled per field by the builder;
//! this pass only derives what needs the whole field list:
//!
//! - **Searchable**: the first non-identity `String` field carrying a
//!   `fulltext` index becomes the entity's search field.
//!
//! Edges whose target never qualified as an entity are left as they are.

use crate::model::Entity;

/// Derive entity-level flags from its resolved fields.
pub fn apply_inference(entity: &mut Entity) {
    let search_field = entity
        .fields
        .iter()
        .find(|field| !field.is_identity() && field.type_name.is_string() && field.has_index("fulltext"))
        .map(|field| field.name.clone());

    if let Some(name) = search_field {
        entity.searchable = true;
        entity.search_field = name;
    }
}
