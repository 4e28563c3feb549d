//! Cache-aside synchronization between the local catalog and the metadata provider.
//!
//! The local store is always consulted first; the provider is only called on a
//! miss, and whatever it returns is written back before being handed out.

mod mapping;
#[cfg(test)]
mod tests;

use sqlx::SqlitePool;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use watchlist_models::{Movie, MovieKind, TeamMember};
use watchlist_sources::{MetadataProvider, MovieRecord, ProviderQuery, SearchCandidate};

use crate::db::begin_write;
use crate::error::{CoreError, CoreResult};
use crate::store::{MovieFilter, MovieRepository, TeamMemberRepository};
use mapping::{map_record, MappedMovie};

/// Parameters of a catalog search. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub id: Option<String>,
    pub title: Option<String>,
    pub genre: Option<String>,
    /// Raw type name ("movie", "series", or a synonym)
    pub kind: Option<String>,
}

impl SearchQuery {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

pub struct CatalogSynchronizer {
    db: SqlitePool,
    provider: Arc<dyn MetadataProvider>,
    provider_timeout: Duration,
}

impl CatalogSynchronizer {
    pub fn new(db: SqlitePool, provider: Arc<dyn MetadataProvider>, provider_timeout: Duration) -> Self {
        Self { db, provider, provider_timeout }
    }

    /// Guarantee `id` exists locally, fetching it from the provider on a miss.
    pub async fn ensure_by_id(&self, id: &str) -> CoreResult<Movie> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CoreError::validation("movie id cannot be empty"));
        }

        if let Some(movie) = MovieRepository::get_by_id(&self.db, id).await? {
            debug!("Catalog cache hit: {}", id);
            return Ok(movie);
        }

        info!("Catalog cache miss: {} (querying {})", id, self.provider.provider_name());
        let record = self
            .fetch_detail(ProviderQuery::Id(id.to_string()))
            .await?
            .ok_or_else(|| CoreError::not_found(format!("movie '{}' is unknown to the provider", id)))?;

        self.persist(map_record(id, record)?).await
    }

    /// Resolve an exact title through the provider, then ensure the id it names.
    pub async fn ensure_by_title(&self, title: &str) -> CoreResult<Movie> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::validation("title cannot be empty"));
        }

        let record = self
            .fetch_detail(ProviderQuery::Title(title.to_string()))
            .await?
            .ok_or_else(|| CoreError::not_found(format!("no title matching '{}'", title)))?;

        if let Some(movie) = MovieRepository::get_by_id(&self.db, &record.id).await? {
            debug!("Catalog cache hit for title '{}': {}", title, movie.id);
            return Ok(movie);
        }

        let id = record.id.clone();
        self.persist(map_record(&id, record)?).await
    }

    /// Local-first search; falls back to provider discovery only when the
    /// local result is empty and a title was given.
    pub async fn search_and_ensure(&self, query: &SearchQuery) -> CoreResult<Vec<Movie>> {
        let kind = normalize(&query.kind)
            .map(|k| MovieKind::parse(&k))
            .transpose()?;

        if let Some(id) = normalize(&query.id) {
            return Ok(vec![self.ensure_by_id(&id).await?]);
        }

        let filter = MovieFilter {
            title: normalize(&query.title),
            genre: normalize(&query.genre),
            kind,
        };

        let local = MovieRepository::search(&self.db, &filter).await?;
        if !local.is_empty() {
            debug!("Catalog search answered locally ({} result(s))", local.len());
            return Ok(local);
        }

        let Some(title) = filter.title.clone() else {
            debug!("Catalog search empty and no title given; skipping provider");
            return Ok(local);
        };

        let candidates = match self.with_timeout(self.provider.search_by_title(&title)).await? {
            Ok(candidates) => candidates,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(CoreError::transient(e.to_string())),
        };
        let candidates = filter_candidates(candidates, kind);
        info!("Seeding catalog from {} provider candidate(s) for '{}'", candidates.len(), title);

        let mut seen = HashSet::new();
        for candidate in candidates {
            if !seen.insert(candidate.id.clone()) {
                continue;
            }
            if MovieRepository::exists(&self.db, &candidate.id).await? {
                continue;
            }
            if let Err(e) = self.ensure_by_id(&candidate.id).await {
                warn!("Skipping candidate {} ('{}'): {}", candidate.id, candidate.title, e);
            }
        }

        Ok(MovieRepository::search(&self.db, &filter).await?)
    }

    /// Local lookup only; never calls the provider.
    pub async fn get_movie(&self, id: &str) -> CoreResult<Movie> {
        MovieRepository::get_by_id(&self.db, id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("movie '{}' is not in the catalog", id)))
    }

    pub async fn team_for(&self, id: &str) -> CoreResult<Vec<TeamMember>> {
        if !MovieRepository::exists(&self.db, id).await? {
            return Err(CoreError::not_found(format!("movie '{}' is not in the catalog", id)));
        }
        Ok(TeamMemberRepository::list_for_movie(&self.db, id).await?)
    }

    async fn fetch_detail(&self, query: ProviderQuery) -> CoreResult<Option<MovieRecord>> {
        match self.with_timeout(self.provider.fetch_detail(&query)).await? {
            Ok(record) => Ok(record),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                warn!("Provider lookup for '{}' failed: {}", query.as_str(), e);
                Err(e.into())
            }
        }
    }

    async fn with_timeout<T>(&self, call: impl Future<Output = T>) -> CoreResult<T> {
        tokio::time::timeout(self.provider_timeout, call)
            .await
            .map_err(|_| {
                CoreError::transient(format!(
                    "{} did not answer within {:?}",
                    self.provider.provider_name(),
                    self.provider_timeout
                ))
            })
    }

    /// Write movie and team in one transaction.
    async fn persist(&self, mapped: MappedMovie) -> CoreResult<Movie> {
        let MappedMovie { movie, members } = mapped;

        let mut tx = begin_write(&self.db).await?;
        if !MovieRepository::insert_if_absent(&mut *tx, &movie).await? {
            // Someone else ensured the same id first; theirs wins
            tx.rollback().await?;
            debug!("Concurrent ensure of {} detected, returning stored row", movie.id);
            return self.get_movie(&movie.id).await;
        }
        TeamMemberRepository::insert_all(&mut *tx, &movie.id, &members).await?;
        tx.commit().await?;

        info!("Catalog stored {} '{}' with {} team member(s)", movie.id, movie.title, members.len());
        Ok(movie)
    }
}

/// Treat blank strings as absent.
fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Keep candidates whose provider type matches `kind`; unparseable types never match.
fn filter_candidates(candidates: Vec<SearchCandidate>, kind: Option<MovieKind>) -> Vec<SearchCandidate> {
    let Some(kind) = kind else {
        return candidates;
    };
    candidates
        .into_iter()
        .filter(|c| MovieKind::parse(&c.kind).map(|k| k == kind).unwrap_or(false))
        .collect()
}
