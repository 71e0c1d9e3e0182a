//! Rust source file parser using syn to extract struct declarations.

use std::path::Path;

use quote::ToTokens;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Fields, GenericArgument, Item, ItemStruct, Lit, LitStr, Meta, PathArguments, Type, Visibility};

use crate::config::Conventions;
use crate::errors::{GraphgenError, Result};
use crate::source::{FieldDecl, SerializationTag, SourceLocation, TypeDecl, TypeDesc};

/// Parse a Rust file and lower every struct it declares.
///
/// # Arguments
/// * `path` - Absolute path to the Rust source file
/// * `relative_path` - Path relative to project root, recorded in source locations
pub fn parse_source_file(path: &Path, relative_path: &Path, conventions: &Conventions) -> Result<Vec<TypeDecl>> {
    let content = std::fs::read_to_string(path).map_err(|source| GraphgenError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_source(&content, relative_path, conventions).map_err(|source| GraphgenError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse Rust source text and lower every struct it declares, including
/// those inside inline modules, in declaration order.
pub fn parse_source(content: &str, relative_path: &Path, conventions: &Conventions) -> syn::Result<Vec<TypeDecl>> {
    let syntax = syn::parse_file(content)?;
    let mut types = Vec::new();
    collect_items(&syntax.items, relative_path, conventions, &mut types)?;
    Ok(types)
}

fn collect_items(
    items: &[Item],
    relative_path: &Path,
    conventions: &Conventions,
    types: &mut Vec<TypeDecl>,
) -> syn::Result<()> {
    for item in items {
        match item {
            Item::Struct(item_struct) => types.push(lower_struct(item_struct, relative_path, conventions)?),
            Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    collect_items(nested, relative_path, conventions, types)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Lower a struct definition into a TypeDecl
fn lower_struct(item: &ItemStruct, relative_path: &Path, conventions: &Conventions) -> syn::Result<TypeDecl> {
    let serializable = derives(&item.attrs, "Serialize");
    let rename_rule = parse_container_serde_attrs(&item.attrs)?;

    let mut fields = Vec::new();
    match &item.fields {
        Fields::Named(named) => {
            for field in &named.named {
                fields.push(lower_field(field, serializable, rename_rule, conventions)?);
            }
        }
        Fields::Unnamed(unnamed) => {
            for field in &unnamed.unnamed {
                fields.push(FieldDecl {
                    name: None,
                    exported: is_exported(&field.vis),
                    ty: lower_type(&field.ty),
                    serialization: None,
                    schema: None,
                });
            }
        }
        Fields::Unit => {}
    }

    Ok(TypeDecl {
        name: item.ident.unraw().to_string(),
        exported: is_exported(&item.vis),
        fields,
        location: Some(SourceLocation {
            file: relative_path.to_path_buf(),
            line: item.ident.span().start().line,
        }),
    })
}

fn lower_field(
    field: &syn::Field,
    serializable: bool,
    rename_rule: Option<RenameRule>,
    conventions: &Conventions,
) -> syn::Result<FieldDecl> {
    let ident = field.ident.as_ref().map(|ident| ident.unraw().to_string());

    let mut serde = SerdeFieldAttrs::default();
    let mut directives = Vec::new();
    for attr in &field.attrs {
        if attr.path().is_ident("serde") {
            serde.has_attr = true;
            parse_field_serde_attr(attr, &mut serde)?;
        } else if attr.path().is_ident(&conventions.schema_attribute) {
            directives.push(parse_schema_attr(attr)?);
        }
    }

    // Flattened fields are embedded in the parent; they have no name of their own
    let name = if serde.flatten { None } else { ident };

    let serialization = match &name {
        Some(name) if serializable || serde.has_attr => {
            let serialized = serde
                .rename
                .clone()
                .unwrap_or_else(|| rename_rule.map_or_else(|| name.clone(), |rule| rule.apply(name)));
            Some(SerializationTag::new(serialized, serde.omit_empty))
        }
        _ => None,
    };

    Ok(FieldDecl {
        name,
        exported: is_exported(&field.vis),
        ty: lower_type(&field.ty),
        serialization,
        schema: (!directives.is_empty()).then(|| directives.join(" ")),
    })
}

/// Only plain `pub` counts as exported.
fn is_exported(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

/// Check if attributes include derive(name)
fn derives(attrs: &[Attribute], name: &str) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .any(|path| path.segments.last().is_some_and(|segment| segment.ident == name))
}

/// Read the directive string from `#[dgraph("...")]` or `#[dgraph = "..."]`.
fn parse_schema_attr(attr: &Attribute) -> syn::Result<String> {
    match &attr.meta {
        Meta::List(_) => Ok(attr.parse_args::<LitStr>()?.value()),
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.value()),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        Meta::Path(path) => Err(syn::Error::new_spanned(path, "expected a directive string")),
    }
}

#[derive(Debug, Default)]
struct SerdeFieldAttrs {
    has_attr: bool,
    rename: Option<String>,
    omit_empty: bool,
    flatten: bool,
}

/// Parse #[serde(...)] attribute on a field
fn parse_field_serde_attr(attr: &Attribute, serde: &mut SerdeFieldAttrs) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            if let Some(name) = parse_serialize_name(&meta)? {
                serde.rename = Some(name);
            }
            return Ok(());
        }

        if meta.path.is_ident("skip_serializing_if") {
            skip_meta_value(&meta)?;
            serde.omit_empty = true;
            return Ok(());
        }

        if meta.path.is_ident("skip_serializing") {
            serde.omit_empty = true;
            return Ok(());
        }

        if meta.path.is_ident("flatten") {
            serde.flatten = true;
            return Ok(());
        }

        skip_meta_value(&meta)
    })
}

/// Parse container-level #[serde(...)] attributes, returning the `rename_all` rule
fn parse_container_serde_attrs(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(value) = parse_serialize_name(&meta)? {
                    rule = RenameRule::parse(&value);
                }
                return Ok(());
            }
            skip_meta_value(&meta)
        })?;
    }
    Ok(rule)
}

/// Read `key = "x"` or the serialize side of `key(serialize = "x", deserialize = "y")`.
fn parse_serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(Some(lit.value()));
    }

    let mut name = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            let lit: LitStr = nested.value()?.parse()?;
            name = Some(lit.value());
        } else {
            skip_meta_value(&nested)?;
        }
        Ok(())
    })?;
    Ok(name)
}

/// Consume whatever follows a meta item we do not interpret.
fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}

/// Subset of serde's `rename_all` rules, applied to field names.
///
/// As in serde, `lowercase` and `snake_case` leave field names untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(rule: &str) -> Option<Self> {
        match rule {
            "lowercase" => Some(RenameRule::Lower),
            "UPPERCASE" => Some(RenameRule::Upper),
            "PascalCase" => Some(RenameRule::Pascal),
            "camelCase" => Some(RenameRule::Camel),
            "snake_case" => Some(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Some(RenameRule::ScreamingSnake),
            "kebab-case" => Some(RenameRule::Kebab),
            "SCREAMING-KEBAB-CASE" => Some(RenameRule::ScreamingKebab),
            _ => None,
        }
    }

    fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Pascal => to_pascal_case(field),
            RenameRule::Camel => {
                let pascal = to_pascal_case(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn to_pascal_case(field: &str) -> String {
    let mut pascal = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }
    pascal
}

/// Convert syn::Type to its unclassified shape
fn lower_type(ty: &Type) -> TypeDesc {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segments = type_path
                .path
                .segments
                .iter()
                .map(|segment| segment.ident.unraw().to_string())
                .collect();
            let args = type_path
                .path
                .segments
                .last()
                .map(|segment| match &segment.arguments {
                    PathArguments::AngleBracketed(args) => args
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            GenericArgument::Type(inner) => Some(lower_type(inner)),
                            _ => None,
                        })
                        .collect(),
                    _ => Vec::new(),
                })
                .unwrap_or_default();
            TypeDesc::Path { segments, args }
        }
        Type::Reference(reference) => TypeDesc::Reference(Box::new(lower_type(&reference.elem))),
        Type::Slice(slice) => TypeDesc::Slice(Box::new(lower_type(&slice.elem))),
        Type::Array(array) => TypeDesc::Array(Box::new(lower_type(&array.elem))),
        Type::Paren(paren) => lower_type(&paren.elem),
        Type::Group(group) => lower_type(&group.elem),
        other => TypeDesc::Other(other.to_token_stream().to_string()),
    }
}
