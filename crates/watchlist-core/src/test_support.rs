//! Shared fixtures for the crate's tests.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use watchlist_models::{Movie, MovieKind, WatchListItem};
use watchlist_sources::{MetadataProvider, MovieRecord, ProviderQuery, SearchCandidate, SourceError};

use crate::store::MovieRepository;

/// In-memory provider that counts calls.
#[derive(Default)]
pub struct StubProvider {
    details: Mutex<HashMap<String, MovieRecord>>,
    searches: Mutex<HashMap<String, Vec<SearchCandidate>>>,
    failing: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    detail_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before answering.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn with_detail(self, record: MovieRecord) -> Self {
        self.details.lock().unwrap().insert(record.id.clone(), record);
        self
    }

    /// Register the hits returned for a title search (matched case-insensitively).
    pub fn with_search(self, title: &str, hits: Vec<SearchCandidate>) -> Self {
        self.searches.lock().unwrap().insert(title.to_lowercase(), hits);
        self
    }

    /// Detail lookups for `id` fail with a transport-style error.
    pub fn failing_on(self, id: &str) -> Self {
        self.failing.lock().unwrap().insert(id.to_string());
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.detail_calls() + self.search_calls()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn fetch_detail(&self, query: &ProviderQuery) -> Result<Option<MovieRecord>, SourceError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        if self.failing.lock().unwrap().contains(query.as_str()) {
            return Err(SourceError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }

        let details = self.details.lock().unwrap();
        let record = match query {
            ProviderQuery::Id(id) => details.get(id).cloned(),
            ProviderQuery::Title(title) => details
                .values()
                .find(|r| r.title.eq_ignore_ascii_case(title))
                .cloned(),
        };
        Ok(record)
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<SearchCandidate>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        Ok(self
            .searches
            .lock()
            .unwrap()
            .get(&title.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

pub fn record(id: &str, title: &str, kind: &str, genre: &str) -> MovieRecord {
    MovieRecord {
        id: id.to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        genre: Some(genre.to_string()),
        country: Some("United States".to_string()),
        poster_url: None,
        rating: Some(7.5),
        release_date: None,
        runtime_minutes: Some(120),
        directors: Some("Jane Doe".to_string()),
        writers: Some("John Roe, Jane Doe".to_string()),
        actors: Some("Alice, Bob".to_string()),
    }
}

pub fn candidate(id: &str, title: &str, kind: &str) -> SearchCandidate {
    SearchCandidate {
        id: id.to_string(),
        title: title.to_string(),
        year: Some("1999".to_string()),
        kind: kind.to_string(),
        poster_url: None,
    }
}

pub fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        kind: MovieKind::Movie,
        genre: "Drama".to_string(),
        country: String::new(),
        poster_url: None,
        rating: None,
        release_date: None,
        runtime_minutes: None,
    }
}

/// Store movies directly, bypassing the provider.
pub async fn seed_movies(pool: &SqlitePool, ids: &[&str]) {
    let mut conn = pool.acquire().await.unwrap();
    for id in ids {
        MovieRepository::insert_if_absent(&mut *conn, &movie(id, &format!("Title {}", id)))
            .await
            .unwrap();
    }
}

/// (movie id, position) pairs, for compact assertions.
pub fn layout(items: &[WatchListItem]) -> Vec<(String, i64)> {
    items.iter().map(|i| (i.movie_id.clone(), i.position)).collect()
}

/// Positions must be exactly 1..=N in order.
pub fn assert_dense(items: &[WatchListItem]) {
    let positions: Vec<i64> = items.iter().map(|i| i.position).collect();
    let expected: Vec<i64> = (1..=items.len() as i64).collect();
    assert_eq!(positions, expected, "positions are not dense: {:?}", layout(items));
}
