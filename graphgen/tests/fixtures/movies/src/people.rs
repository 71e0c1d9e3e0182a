use graphgen::GraphEntity;
use serde::{Deserialize, Serialize};

use crate::Film;

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Director {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "director.film", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=director.film,reverse,count")]
    pub Films: Vec<Film>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Actor {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "actor.film", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=actor.film,count")]
    pub Films: Vec<Performance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Performance {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "performance.character_note", skip_serializing_if = "String::is_empty")]
    #[dgraph("predicate=performance.character_note")]
    pub CharacterNote: String,

    #[serde(rename = "performance.film", skip_serializing_if = "Option::is_none")]
    pub Film: Option<Box<Film>>,
}
