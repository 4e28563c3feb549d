use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What to ask the provider's detail endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderQuery {
    Id(String),
    Title(String),
}

impl ProviderQuery {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderQuery::Id(value) | ProviderQuery::Title(value) => value,
        }
    }
}

/// Full detail record for one title, with absent fields already normalized to `None`.
///
/// `kind` is the provider's raw type string; people are comma-separated name lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub genre: Option<String>,
    pub country: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i64>,
    pub directors: Option<String>,
    pub writers: Option<String>,
    pub actors: Option<String>,
}

/// One hit from a title search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCandidate {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub kind: String,
    pub poster_url: Option<String>,
}
