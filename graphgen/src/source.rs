//! Declarations handed to the builder by a front-end.
//!
//! These types carry declared structs exactly as written: field order, the
//! unclassified type shape and the raw attribute strings. The bundled
//! [`scanner`](crate::scanner) fills them from Rust sources, but any other
//! front-end can construct them directly.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A scanned package ready for the builder.
#[derive(Debug, Clone, Default)]
pub struct SourcePackage {
    pub name: String,
    pub types: Vec<TypeDecl>,
}

/// A declared composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub exported: bool,
    pub fields: Vec<FieldDecl>,
    pub location: Option<SourceLocation>,
}

impl TypeDecl {
    /// An exported type with the given fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            exported: true,
            fields,
            location: None,
        }
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// A declared field with its raw attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// `None` for anonymous or embedded fields
    pub name: Option<String>,
    pub exported: bool,
    pub ty: TypeDesc,
    pub serialization: Option<SerializationTag>,
    /// Raw graph-schema directive string
    pub schema: Option<String>,
}

impl FieldDecl {
    /// An exported, named field without attributes.
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: Some(name.into()),
            exported: true,
            ty,
            serialization: None,
            schema: None,
        }
    }

    /// An embedded field with no name of its own.
    pub fn embedded(ty: TypeDesc) -> Self {
        Self {
            name: None,
            exported: true,
            ty,
            serialization: None,
            schema: None,
        }
    }

    /// Attach a serialization tag in its raw comma form (`"name,omitempty"`).
    pub fn serialized(mut self, raw: &str) -> Self {
        self.serialization = Some(SerializationTag::parse(raw));
        self
    }

    pub fn schema(mut self, raw: impl Into<String>) -> Self {
        self.schema = Some(raw.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// Serialization name and omit flag of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationTag {
    pub name: String,
    pub omit_empty: bool,
}

impl SerializationTag {
    pub fn new(name: impl Into<String>, omit_empty: bool) -> Self {
        Self {
            name: name.into(),
            omit_empty,
        }
    }

    /// Parse the raw comma form: the first segment is the name, a later
    /// `omitempty` segment sets `omit_empty`.
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split(',');
        let name = segments.next().unwrap_or_default().trim().to_string();
        let omit_empty = segments.any(|segment| segment.trim() == "omitempty");
        Self { name, omit_empty }
    }
}

/// Declared type shape before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    /// `a::b::C<Args>`
    Path { segments: Vec<String>, args: Vec<TypeDesc> },
    /// `&T` / `&mut T`
    Reference(Box<TypeDesc>),
    /// `[T]`
    Slice(Box<TypeDesc>),
    /// `[T; N]`
    Array(Box<TypeDesc>),
    /// Anything else, rendered as written
    Other(String),
}

impl TypeDesc {
    /// A single-segment path without generic arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeDesc::Path {
            segments: vec![name.into()],
            args: Vec::new(),
        }
    }

    /// A path like `chrono::DateTime` from its segments.
    pub fn path(segments: &[&str], args: Vec<TypeDesc>) -> Self {
        TypeDesc::Path {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            args,
        }
    }

    /// A single-segment generic like `Vec<T>`.
    pub fn generic(name: impl Into<String>, args: Vec<TypeDesc>) -> Self {
        TypeDesc::Path {
            segments: vec![name.into()],
            args,
        }
    }

    pub fn vec_of(inner: TypeDesc) -> Self {
        Self::generic("Vec", vec![inner])
    }

    pub fn option_of(inner: TypeDesc) -> Self {
        Self::generic("Option", vec![inner])
    }

    pub fn string() -> Self {
        Self::named("String")
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Path { segments, args } => {
                write!(f, "{}", segments.join("::"))?;
                if !args.is_empty() {
                    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", rendered.join(", "))?;
                }
                Ok(())
            }
            TypeDesc::Reference(inner) => write!(f, "&{inner}"),
            TypeDesc::Slice(inner) => write!(f, "[{inner}]"),
            TypeDesc::Array(inner) => write!(f, "[{inner}; _]"),
            TypeDesc::Other(text) => write!(f, "{text}"),
        }
    }
}

/// Where a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Path relative to the project root
    pub file: PathBuf,
    /// 1-indexed line of the declaration
    pub line: usize,
}
