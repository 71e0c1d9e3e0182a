//! Non-fatal findings collected while building a package.
//!
//! None of these change the built model. They are logged at `debug` level
//! and returned by [`EntityBuilder::build_with_report`](crate::builder::EntityBuilder::build_with_report).

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Diagnostic {
    /// A declared type lacks the UID or DType field and is not an entity.
    ExcludedType {
        type_name: String,
        missing_uid: bool,
        missing_dtype: bool,
    },

    /// A directive token the grammar does not understand.
    IgnoredDirective {
        type_name: String,
        field: String,
        token: String,
    },

    /// A non-identity field with neither an explicit predicate nor a serialization name.
    EmptyPredicate { type_name: String, field: String },

    /// An edge pointing at a declared type that did not qualify as an entity.
    DanglingEdge {
        type_name: String,
        field: String,
        target: String,
    },
}

impl Diagnostic {
    /// The declared type the finding belongs to.
    pub fn type_name(&self) -> &str {
        match self {
            Diagnostic::ExcludedType { type_name, .. }
            | Diagnostic::IgnoredDirective { type_name, .. }
            | Diagnostic::EmptyPredicate { type_name, .. }
            | Diagnostic::DanglingEdge { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ExcludedType {
                type_name,
                missing_uid,
                missing_dtype,
            } => {
                let missing = match (missing_uid, missing_dtype) {
                    (true, true) => "UID and DType fields",
                    (true, false) => "a UID field",
                    _ => "a DType field",
                };
                write!(f, "type `{type_name}` is not an entity: missing {missing}")
            }
            Diagnostic::IgnoredDirective { type_name, field, token } => {
                write!(f, "{type_name}.{field}: ignored directive token `{token}`")
            }
            Diagnostic::EmptyPredicate { type_name, field } => {
                write!(f, "{type_name}.{field}: no predicate and no serialization name")
            }
            Diagnostic::DanglingEdge { type_name, field, target } => {
                write!(f, "{type_name}.{field}: edge target `{target}` is not an entity")
            }
        }
    }
}
