use graphgen::GraphEntity;
use serde::{Deserialize, Serialize};

use crate::Film;

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Genre {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "~genre", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=~genre,reverse")]
    pub Films: Vec<Film>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Country {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "~country", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=~country,reverse")]
    pub Films: Vec<Film>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Rating {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "~rating", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=~rating,reverse")]
    pub Films: Vec<Film>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct ContentRating {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "~rated", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=~rated,reverse")]
    pub Films: Vec<Film>,
}
