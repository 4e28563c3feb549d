use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::SourceError;
use crate::record::{MovieRecord, SearchCandidate};

/// OMDb fills missing fields with this marker instead of omitting them
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbDetail {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearch {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchHit>,
}

/// Drop blanks and the "N/A" marker.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

fn is_not_found_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("not found") || lower.contains("incorrect imdb id")
}

/// Returned for searches too short to narrow down; no usable hits.
fn is_too_broad_message(message: &str) -> bool {
    message.to_lowercase().contains("too many results")
}

/// "136 min" -> 136
pub(crate) fn parse_runtime(value: &str) -> Option<i64> {
    value.split_whitespace().next().and_then(|n| n.parse().ok())
}

/// "31 Mar 1999" -> 1999-03-31
pub(crate) fn parse_released(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d %b %Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

impl OmdbDetail {
    /// `Ok(None)` for OMDb's "not found" answers.
    pub(crate) fn into_record(self, requested: &str) -> Result<Option<MovieRecord>, SourceError> {
        if !self.response.eq_ignore_ascii_case("true") {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            if is_not_found_message(&message) {
                return Ok(None);
            }
            return Err(SourceError::Api { status: 200, message });
        }

        let id = present(self.imdb_id)
            .ok_or_else(|| SourceError::Malformed(format!("detail for '{}' has no imdbID", requested)))?;
        let title = present(self.title)
            .ok_or_else(|| SourceError::Malformed(format!("detail for '{}' has no Title", id)))?;
        let kind = present(self.kind)
            .ok_or_else(|| SourceError::Malformed(format!("detail for '{}' has no Type", id)))?;

        Ok(Some(MovieRecord {
            id,
            title,
            kind,
            genre: present(self.genre),
            country: present(self.country),
            poster_url: present(self.poster),
            rating: present(self.rating).and_then(|r| r.parse().ok()),
            release_date: present(self.released).as_deref().and_then(parse_released),
            runtime_minutes: present(self.runtime).as_deref().and_then(parse_runtime),
            directors: present(self.director),
            writers: present(self.writer),
            actors: present(self.actors),
        }))
    }
}

impl OmdbSearch {
    pub(crate) fn into_candidates(self) -> Result<Vec<SearchCandidate>, SourceError> {
        if !self.response.eq_ignore_ascii_case("true") {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            if is_not_found_message(&message) || is_too_broad_message(&message) {
                return Ok(Vec::new());
            }
            return Err(SourceError::Api { status: 200, message });
        }

        Ok(self
            .search
            .into_iter()
            .map(|hit| SearchCandidate {
                id: hit.imdb_id,
                title: hit.title,
                year: present(hit.year),
                kind: present(hit.kind).unwrap_or_default(),
                poster_url: present(hit.poster),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX_DETAIL: &str = r#"{
        "Title":"The Matrix","Year":"1999","Rated":"R","Released":"31 Mar 1999",
        "Runtime":"136 min","Genre":"Action, Sci-Fi",
        "Director":"Lana Wachowski, Lilly Wachowski",
        "Writer":"Lilly Wachowski, Lana Wachowski",
        "Actors":"Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
        "Country":"United States, Australia",
        "Poster":"https://m.media-amazon.com/images/matrix.jpg",
        "imdbRating":"8.7","imdbID":"tt0133093","Type":"movie","Response":"True"
    }"#;

    #[test]
    fn test_detail_into_record() {
        let detail: OmdbDetail = serde_json::from_str(MATRIX_DETAIL).unwrap();
        let record = detail.into_record("tt0133093").unwrap().unwrap();

        assert_eq!(record.id, "tt0133093");
        assert_eq!(record.title, "The Matrix");
        assert_eq!(record.kind, "movie");
        assert_eq!(record.genre.as_deref(), Some("Action, Sci-Fi"));
        assert_eq!(record.rating, Some(8.7));
        assert_eq!(record.runtime_minutes, Some(136));
        assert_eq!(record.release_date, NaiveDate::from_ymd_opt(1999, 3, 31));
        assert_eq!(record.directors.as_deref(), Some("Lana Wachowski, Lilly Wachowski"));
    }

    #[test]
    fn test_detail_not_available_fields_are_dropped() {
        let json = r#"{"Title":"Obscure","imdbID":"tt9","Type":"movie","Poster":"N/A",
            "imdbRating":"N/A","Released":"N/A","Runtime":"N/A","Writer":"N/A","Response":"True"}"#;
        let detail: OmdbDetail = serde_json::from_str(json).unwrap();
        let record = detail.into_record("tt9").unwrap().unwrap();

        assert_eq!(record.poster_url, None);
        assert_eq!(record.rating, None);
        assert_eq!(record.release_date, None);
        assert_eq!(record.runtime_minutes, None);
        assert_eq!(record.writers, None);
        assert_eq!(record.genre, None);
    }

    #[test]
    fn test_detail_not_found() {
        let detail: OmdbDetail =
            serde_json::from_str(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#).unwrap();
        assert!(detail.into_record("tt000").unwrap().is_none());

        let detail: OmdbDetail =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(detail.into_record("Nothing").unwrap().is_none());
    }

    #[test]
    fn test_detail_api_error() {
        let detail: OmdbDetail =
            serde_json::from_str(r#"{"Response":"False","Error":"Request limit reached!"}"#).unwrap();
        let err = detail.into_record("tt1").unwrap_err();
        assert!(matches!(err, SourceError::Api { .. }));
    }

    #[test]
    fn test_detail_missing_id_is_malformed() {
        let detail: OmdbDetail =
            serde_json::from_str(r#"{"Response":"True","Title":"X","Type":"movie"}"#).unwrap();
        assert!(matches!(detail.into_record("X"), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn test_search_into_candidates() {
        let json = r#"{"Search":[
            {"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Type":"movie","Poster":"N/A"},
            {"Title":"The Matrix Reloaded","Year":"2003","imdbID":"tt0234215","Type":"movie","Poster":"https://x/y.jpg"}
        ],"totalResults":"2","Response":"True"}"#;
        let search: OmdbSearch = serde_json::from_str(json).unwrap();
        let candidates = search.into_candidates().unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "tt0133093");
        assert_eq!(candidates[0].poster_url, None);
        assert_eq!(candidates[1].year.as_deref(), Some("2003"));
    }

    #[test]
    fn test_search_not_found_is_empty() {
        let search: OmdbSearch =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(search.into_candidates().unwrap().is_empty());
    }

    #[test]
    fn test_search_too_many_results_is_empty() {
        let search: OmdbSearch =
            serde_json::from_str(r#"{"Response":"False","Error":"Too many results."}"#).unwrap();
        assert!(search.into_candidates().unwrap().is_empty());

        let limited: OmdbSearch =
            serde_json::from_str(r#"{"Response":"False","Error":"Request limit reached!"}"#).unwrap();
        assert!(matches!(limited.into_candidates(), Err(SourceError::Api { .. })));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_runtime("90 min"), Some(90));
        assert_eq!(parse_runtime("unknown"), None);
        assert_eq!(parse_released("2003-05-15"), NaiveDate::from_ymd_opt(2003, 5, 15));
        assert_eq!(parse_released("someday"), None);
    }
}
