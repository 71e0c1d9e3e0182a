use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;

use parsed::ParsedEntity;

/// Derive `graphgen::GraphType` for a struct.
///
/// Each field may carry one `#[dgraph("...")]` (or `#[dgraph = "..."]`)
/// attribute holding its raw directive string. The derive records the
/// strings verbatim; they are parsed by `graphgen` when the model is built.
///
/// ```text
/// #[derive(GraphEntity)]
/// pub struct Film {
///     #[dgraph("index=hash,term,trigram,fulltext")]
///     pub Name: String,
/// }
/// ```
#[proc_macro_derive(GraphEntity, attributes(dgraph))]
pub fn derive_graph_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedEntity::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
