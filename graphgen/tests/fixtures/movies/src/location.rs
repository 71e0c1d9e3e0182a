use graphgen::GraphEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Location {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "loc", skip_serializing_if = "Option::is_none")]
    #[dgraph("index=geo,type=geo")]
    pub Loc: Option<geo_types::Point<f64>>,

    #[serde(rename = "email", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=exact,upsert")]
    pub Email: String,
}
