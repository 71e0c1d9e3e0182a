//! Resolved graph schema model handed to the emission stage.
//!
//! A [`Package`] is built once per invocation by the
//! [`EntityBuilder`](crate::builder::EntityBuilder) and is read-only afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::source::{SourceLocation, TypeDesc};

/// The scanned package and every declared type that qualified as an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name (crate name from the manifest, or the directory name)
    pub name: String,

    /// Entities in declaration order
    pub entities: Vec<Entity>,
}

impl Package {
    /// Look up an entity by its type name.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Entities exposing a full-text search field.
    pub fn searchable_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.searchable)
    }

    /// Names of all entities, in declaration order.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|entity| entity.name.as_str()).collect()
    }
}

/// A declared type recognised as a graph node type (it has both identity fields).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Struct name (e.g., "Film")
    pub name: String,

    /// Exported fields in declaration order
    pub fields: Vec<Field>,

    /// True if some non-identity string field carries a `fulltext` index
    pub searchable: bool,

    /// Name of the first such field (empty when not searchable)
    pub search_field: String,

    /// Where the struct was declared, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl Entity {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields that point at another declared type.
    pub fn edges(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_edge)
    }

    pub fn uid_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_uid)
    }

    /// The search field, if the entity is searchable.
    pub fn search_field(&self) -> Option<&Field> {
        if !self.searchable {
            return None;
        }
        self.field(&self.search_field)
    }
}

/// A single exported field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as declared (e.g., "InitialReleaseDate")
    pub name: String,

    /// Classified declared type
    #[serde(rename = "type")]
    pub type_name: TypeName,

    /// Name from the serialization attribute (empty when absent)
    #[serde(default)]
    pub serialization_name: String,

    /// True if the serialization attribute omits default values
    #[serde(default)]
    pub omit_empty: bool,

    /// Resolved graph predicate
    #[serde(default)]
    pub predicate: String,

    /// True if the type is a sequence of another declared type
    #[serde(default)]
    pub is_edge: bool,

    /// Target type name for edge fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_entity: Option<String>,

    /// True if the predicate starts with `~` or the directives carry `reverse`
    #[serde(default)]
    pub is_reverse: bool,

    /// True if the directives carry `count`
    #[serde(default)]
    pub has_count: bool,

    /// Index directives in declaration order (e.g., ["hash", "term", "fulltext"])
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<String>,

    /// Value of the `type=` directive (e.g., "geo")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    #[serde(default)]
    pub is_uid: bool,

    #[serde(default)]
    pub is_dtype: bool,

    /// True if the directives carry `upsert`
    #[serde(default)]
    pub upsert: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
            serialization_name: String::new(),
            omit_empty: false,
            predicate: String::new(),
            is_edge: false,
            edge_entity: None,
            is_reverse: false,
            has_count: false,
            indexes: Vec::new(),
            type_hint: None,
            is_uid: false,
            is_dtype: false,
            upsert: false,
        }
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.indexes.iter().any(|index| index == name)
    }

    /// True for the UID and DType fields.
    pub fn is_identity(&self) -> bool {
        self.is_uid || self.is_dtype
    }

    /// Temporal field indexed by year, filterable by a year range.
    pub fn is_year_filterable(&self) -> bool {
        self.type_name.is_temporal() && self.has_index("year")
    }

    /// Field supports exact-match lookups.
    pub fn supports_exact_lookup(&self) -> bool {
        self.has_index("hash") || self.has_index("exact")
    }

    pub fn is_term_searchable(&self) -> bool {
        self.has_index("term")
    }
}

/// Classified field type.
///
/// Pointer-like wrappers (`Option`, `Box`, references, ...) are stripped before
/// classification, so only the referent is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "of")]
pub enum TypeName {
    /// `String` or `str`
    String,
    /// Any other primitive, kept as written (`i64`, `bool`, ...)
    Scalar(String),
    /// Opaque date/time type, kept as written (`chrono::DateTime<Utc>`)
    Temporal(String),
    /// A named type; crate-local paths keep only the last segment
    Named(String),
    Sequence(Box<TypeName>),
    Map(Box<TypeName>, Box<TypeName>),
    Other(String),
}

impl TypeName {
    /// Classify a declared type shape, see [`classify_type`](crate::builder::classify_type).
    pub fn classify(desc: &TypeDesc) -> Self {
        crate::builder::classify_type(desc)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TypeName::String)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, TypeName::Temporal(_))
    }

    /// True for a sequence of strings, the shape of the DType field.
    pub fn is_string_sequence(&self) -> bool {
        matches!(self, TypeName::Sequence(inner) if inner.is_string())
    }

    /// Element type of a sequence.
    pub fn element(&self) -> Option<&TypeName> {
        match self {
            TypeName::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    /// Name of the element type when this is a sequence of a named type.
    pub fn named_element(&self) -> Option<&str> {
        match self.element()? {
            TypeName::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::String => write!(f, "String"),
            TypeName::Scalar(name) | TypeName::Temporal(name) | TypeName::Named(name) | TypeName::Other(name) => {
                write!(f, "{name}")
            }
            TypeName::Sequence(inner) => write!(f, "Vec<{inner}>"),
            TypeName::Map(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}
