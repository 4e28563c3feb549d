use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A catalog entry, keyed by the provider's stable external id (e.g. "tt0133093").
///
/// Created once on first reference and never refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub kind: MovieKind,
    pub genre: String,
    pub country: String,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MovieKind {
    Movie,
    Series,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized media type '{0}' (expected movie or series)")]
pub struct ParseKindError(pub String);

impl MovieKind {
    /// Storage representation, also used for the `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieKind::Movie => "movie",
            MovieKind::Series => "series",
        }
    }

    /// Parse a user- or provider-supplied type name.
    ///
    /// Case-insensitive and accepts the common synonyms; anything else is an
    /// error rather than a silent non-match.
    pub fn parse(value: &str) -> Result<Self, ParseKindError> {
        match value.trim().to_lowercase().as_str() {
            "movie" | "movies" | "film" | "films" | "feature" | "pelicula" | "película"
            | "peliculas" | "películas" => Ok(MovieKind::Movie),
            "series" | "serie" | "tv" | "tv series" | "tv-series" | "show" | "tv show"
            | "episode" => Ok(MovieKind::Series),
            _ => Err(ParseKindError(value.to_string())),
        }
    }
}

impl FromStr for MovieKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovieKind::parse(s)
    }
}

impl fmt::Display for MovieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
