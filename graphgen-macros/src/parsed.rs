use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Error, Expr, ExprLit, Fields, Generics, Ident, Lit, LitStr, Meta, Result};

/// Must match `attributes(...)` in the derive registration and the default
/// `Conventions::schema_attribute`; other names are not configurable here.
const ATTRIBUTE: &str = "dgraph";

pub(crate) struct ParsedEntity {
    name: Ident,
    generics: Generics,
    directives: Vec<ParsedDirective>,
}

struct ParsedDirective {
    field: String,
    raw: LitStr,
}

impl ParsedEntity {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident(ATTRIBUTE)) {
            return Err(Error::new_spanned(attr, "#[dgraph] is only allowed on fields"));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => &named.named,
                _ => return Err(Error::new(input.ident.span(), "GraphEntity requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "GraphEntity can only be derived for structs")),
        };

        let mut directives = Vec::new();
        for field in named {
            let Some(ident) = &field.ident else { continue };

            let mut found: Option<LitStr> = None;
            for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
                if found.is_some() {
                    return Err(Error::new_spanned(attr, "duplicate #[dgraph] attribute on field"));
                }
                found = Some(directive_literal(attr)?);
            }

            if let Some(raw) = found {
                directives.push(ParsedDirective {
                    field: ident.unraw().to_string(),
                    raw,
                });
            }
        }

        Ok(Self {
            name: input.ident.clone(),
            generics: input.generics.clone(),
            directives,
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let type_name = name.unraw().to_string();
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let entries = self.directives.iter().map(|directive| {
            let field = &directive.field;
            let raw = &directive.raw;
            quote! { (#field, #raw) }
        });

        quote! {
            impl #impl_generics ::graphgen::GraphType for #name #ty_generics #where_clause {
                const TYPE_NAME: &'static str = #type_name;
                const DIRECTIVES: &'static [(&'static str, &'static str)] = &[#(#entries),*];
            }
        }
    }
}

/// Accepts `#[dgraph("...")]` and `#[dgraph = "..."]`.
fn directive_literal(attr: &Attribute) -> Result<LitStr> {
    match &attr.meta {
        Meta::List(_) => attr.parse_args::<LitStr>(),
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.clone()),
            other => Err(Error::new_spanned(other, "expected a string literal directive")),
        },
        Meta::Path(path) => Err(Error::new_spanned(
            path,
            "expected #[dgraph(\"...\")] with a directive string",
        )),
    }
}
