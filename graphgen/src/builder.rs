//! Two-pass entity builder.
//!
//! Pass 1 ([`TypeIndex::collect`]) records every exported type name. It must
//! finish before pass 2 starts: an edge may point at a type declared later,
//! or at its own type. Pass 2 resolves each exported type on its own, reading
//! only the finished index, and keeps the type only if it declares both
//! identity fields.

use std::collections::HashSet;

use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::annotation::apply_directives;
use crate::config::Conventions;
use crate::diagnostics::Diagnostic;
use crate::inference::apply_inference;
use crate::model::{Entity, Field, Package, TypeName};
use crate::source::{FieldDecl, TypeDecl, TypeDesc};

/// Wrappers stripped before classification; only the referent is recorded.
const POINTER_WRAPPERS: &[&str] = &["Option", "Box", "Rc", "Arc", "Cow"];
const SEQUENCES: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet"];
const MAPS: &[&str] = &["HashMap", "BTreeMap"];
const TEMPORALS: &[&str] = &[
    "DateTime",
    "NaiveDateTime",
    "NaiveDate",
    "NaiveTime",
    "OffsetDateTime",
    "PrimitiveDateTime",
    "SystemTime",
];
const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64",
];
const LOCAL_ROOTS: &[&str] = &["crate", "self", "super"];

/// Names of every exported type in the package (pass 1).
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    names: HashSet<String>,
}

impl TypeIndex {
    pub fn collect(types: &[TypeDecl]) -> Self {
        let names = types
            .iter()
            .filter(|decl| decl.exported)
            .map(|decl| decl.name.clone())
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Outcome of resolving one declared type.
#[derive(Debug, Clone, Default)]
pub struct TypeResolution {
    /// `Some` only if the type declares both identity fields
    pub entity: Option<Entity>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns declared types into a [`Package`].
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    conventions: Conventions,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Build the package model.
    pub fn build(&self, package_name: impl Into<String>, types: &[TypeDecl]) -> Package {
        self.build_with_report(package_name, types).0
    }

    /// Build the package model and return the diagnostics gathered on the way.
    pub fn build_with_report(&self, package_name: impl Into<String>, types: &[TypeDecl]) -> (Package, Vec<Diagnostic>) {
        let package_name = package_name.into();

        let index = TypeIndex::collect(types);
        debug!("{package_name}: indexed {} exported type(s)", index.len());

        let mut entities = Vec::new();
        let mut diagnostics = Vec::new();
        for resolution in self.resolve_all(types, &index) {
            diagnostics.extend(resolution.diagnostics);
            entities.extend(resolution.entity);
        }

        diagnostics.extend(dangling_edges(&entities));
        for diagnostic in &diagnostics {
            debug!("{diagnostic}");
        }
        debug!("{package_name}: {} entit(ies) from {} type(s)", entities.len(), types.len());

        (
            Package {
                name: package_name,
                entities,
            },
            diagnostics,
        )
    }

    #[cfg(not(feature = "parallel"))]
    fn resolve_all(&self, types: &[TypeDecl], index: &TypeIndex) -> Vec<TypeResolution> {
        types
            .iter()
            .filter(|decl| decl.exported)
            .map(|decl| self.resolve_type(decl, index))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn resolve_all(&self, types: &[TypeDecl], index: &TypeIndex) -> Vec<TypeResolution> {
        types
            .par_iter()
            .filter(|decl| decl.exported)
            .map(|decl| self.resolve_type(decl, index))
            .collect()
    }

    /// Resolve one declared type against a finished [`TypeIndex`] (pass 2).
    pub fn resolve_type(&self, decl: &TypeDecl, index: &TypeIndex) -> TypeResolution {
        let mut diagnostics = Vec::new();
        let mut fields = Vec::new();
        let mut has_uid = false;
        let mut has_dtype = false;

        for field_decl in &decl.fields {
            let Some(field) = self.resolve_field(&decl.name, field_decl, index, &mut diagnostics) else {
                continue;
            };
            has_uid |= field.is_uid;
            has_dtype |= field.is_dtype;
            fields.push(field);
        }

        if !has_uid || !has_dtype {
            diagnostics.push(Diagnostic::ExcludedType {
                type_name: decl.name.clone(),
                missing_uid: !has_uid,
                missing_dtype: !has_dtype,
            });
            return TypeResolution {
                entity: None,
                diagnostics,
            };
        }

        let mut entity = Entity {
            name: decl.name.clone(),
            fields,
            searchable: false,
            search_field: String::new(),
            location: decl.location.clone(),
        };
        apply_inference(&mut entity);

        TypeResolution {
            entity: Some(entity),
            diagnostics,
        }
    }

    fn resolve_field(
        &self,
        type_name: &str,
        decl: &FieldDecl,
        index: &TypeIndex,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Field> {
        // Embedded and private fields
        let name = decl.name.as_deref().filter(|_| decl.exported)?;

        let mut field = Field::new(name, classify_type(&decl.ty));
        trace!("{type_name}.{name}: {} -> {}", decl.ty, field.type_name);

        if let Some(tag) = &decl.serialization {
            field.serialization_name = tag.name.clone();
            field.omit_empty = tag.omit_empty;
        }

        if let Some(raw) = &decl.schema {
            for token in apply_directives(raw, &mut field) {
                diagnostics.push(Diagnostic::IgnoredDirective {
                    type_name: type_name.to_string(),
                    field: name.to_string(),
                    token,
                });
            }
        }

        field.is_uid = name == self.conventions.uid_field && field.type_name.is_string();
        field.is_dtype = name == self.conventions.dtype_field && field.type_name.is_string_sequence();

        if field.predicate.is_empty() {
            field.predicate = field.serialization_name.clone();
        }

        if let Some(target) = field.type_name.named_element()
            && index.contains(target)
        {
            field.edge_entity = Some(target.to_string());
            field.is_edge = true;
        }

        // Additive with an explicit `reverse` directive
        if field.predicate.starts_with('~') {
            field.is_reverse = true;
        }

        if field.predicate.is_empty() && !field.is_identity() {
            diagnostics.push(Diagnostic::EmptyPredicate {
                type_name: type_name.to_string(),
                field: name.to_string(),
            });
        }

        Some(field)
    }
}

/// Edges whose target is a declared type but not a built entity.
fn dangling_edges(entities: &[Entity]) -> Vec<Diagnostic> {
    let names: HashSet<&str> = entities.iter().map(|entity| entity.name.as_str()).collect();

    entities
        .iter()
        .flat_map(|entity| {
            entity.edges().filter_map(|field| {
                let target = field.edge_entity.as_deref()?;
                (!names.contains(target)).then(|| Diagnostic::DanglingEdge {
                    type_name: entity.name.clone(),
                    field: field.name.clone(),
                    target: target.to_string(),
                })
            })
        })
        .collect()
}

/// Classify a declared type shape.
pub fn classify_type(desc: &TypeDesc) -> TypeName {
    match desc {
        TypeDesc::Reference(inner) => classify_type(inner),
        TypeDesc::Slice(inner) => TypeName::Sequence(Box::new(classify_type(inner))),
        TypeDesc::Array(_) | TypeDesc::Other(_) => TypeName::Other(desc.to_string()),
        TypeDesc::Path { segments, args } => classify_path(desc, segments, args),
    }
}

fn classify_path(desc: &TypeDesc, segments: &[String], args: &[TypeDesc]) -> TypeName {
    let Some(last) = segments.last().map(String::as_str) else {
        return TypeName::Other(desc.to_string());
    };

    match args {
        [inner] if POINTER_WRAPPERS.contains(&last) => return classify_type(inner),
        [inner] if SEQUENCES.contains(&last) => return TypeName::Sequence(Box::new(classify_type(inner))),
        [key, value] if MAPS.contains(&last) => {
            return TypeName::Map(Box::new(classify_type(key)), Box::new(classify_type(value)));
        }
        _ => {}
    }

    if TEMPORALS.contains(&last) {
        return TypeName::Temporal(desc.to_string());
    }
    if matches!(last, "String" | "str") && args.is_empty() {
        return TypeName::String;
    }
    if segments.len() == 1 && PRIMITIVES.contains(&last) {
        return TypeName::Scalar(last.to_string());
    }

    let is_local = segments.len() == 1 || LOCAL_ROOTS.contains(&segments[0].as_str());
    if is_local {
        TypeName::Named(last.to_string())
    } else {
        TypeName::Named(segments.join("::"))
    }
}
