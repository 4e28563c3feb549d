use watchlist_models::{Movie, MovieKind, TeamRole};
use watchlist_sources::MovieRecord;

use crate::error::CoreError;

/// A provider record translated into rows ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MappedMovie {
    pub movie: Movie,
    pub members: Vec<(String, TeamRole)>,
}

/// Translate a provider record, storing it under `id`.
///
/// An unknown kind means the provider sent something we cannot represent,
/// which is treated as a malformed response.
pub(crate) fn map_record(id: &str, record: MovieRecord) -> Result<MappedMovie, CoreError> {
    let kind = MovieKind::parse(&record.kind).map_err(|e| {
        CoreError::transient(format!("malformed provider record for '{}': {}", id, e))
    })?;

    let mut members = Vec::new();
    for (names, role) in [
        (&record.directors, TeamRole::Director),
        (&record.writers, TeamRole::Writer),
        (&record.actors, TeamRole::Cast),
    ] {
        members.extend(split_names(names.as_deref()).into_iter().map(|name| (name, role)));
    }

    let movie = Movie {
        id: id.to_string(),
        title: record.title,
        kind,
        genre: record.genre.unwrap_or_default(),
        country: record.country.unwrap_or_default(),
        poster_url: record.poster_url,
        rating: record.rating,
        release_date: record.release_date,
        runtime_minutes: record.runtime_minutes,
    };

    Ok(MappedMovie { movie, members })
}

/// "A, B ,, A" -> ["A", "B"]
fn split_names(list: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in list.unwrap_or_default().split(',') {
        let name = name.trim();
        if name.is_empty() || name == "N/A" || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}
