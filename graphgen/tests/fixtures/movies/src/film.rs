use chrono::{DateTime, Utc};
use graphgen::GraphEntity;
use serde::{Deserialize, Serialize};

use crate::{ContentRating, Country, Genre, Performance, Rating};

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphEntity)]
pub struct Film {
    #[serde(rename = "uid", skip_serializing_if = "String::is_empty")]
    pub UID: String,
    #[serde(rename = "dgraph.type", skip_serializing_if = "Vec::is_empty")]
    pub DType: Vec<String>,

    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    #[dgraph("index=hash,term,trigram,fulltext")]
    pub Name: String,

    #[serde(rename = "initial_release_date")]
    #[dgraph("predicate=initial_release_date index=year")]
    pub InitialReleaseDate: DateTime<Utc>,

    #[serde(rename = "tagline", skip_serializing_if = "String::is_empty")]
    pub Tagline: String,

    #[serde(rename = "genre", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=genre,reverse,count")]
    pub Genres: Vec<Genre>,

    #[serde(rename = "country", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=country,reverse")]
    pub Countries: Vec<Country>,

    #[serde(rename = "rating", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=rating,reverse")]
    pub Ratings: Vec<Rating>,

    #[serde(rename = "rated", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=rated,reverse")]
    pub ContentRatings: Vec<ContentRating>,

    #[serde(rename = "starring", skip_serializing_if = "Vec::is_empty")]
    #[dgraph("predicate=starring,count")]
    pub Starring: Vec<Performance>,
}

/// Lightweight listing row, not stored as a graph node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmSummary {
    pub name: String,
    pub year: i32,
}

struct Cursor {
    offset: usize,
}
