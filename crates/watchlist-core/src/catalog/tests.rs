use super::*;
use crate::db::create_memory_pool;
use crate::store::MovieRepository;
use crate::test_support::{candidate, record, StubProvider};
use watchlist_models::TeamRole;

const TIMEOUT: Duration = Duration::from_secs(2);

async fn synchronizer(provider: StubProvider) -> (CatalogSynchronizer, Arc<StubProvider>, SqlitePool) {
    let pool = create_memory_pool().await.unwrap();
    let provider = Arc::new(provider);
    let sync = CatalogSynchronizer::new(pool.clone(), provider.clone(), TIMEOUT);
    (sync, provider, pool)
}

fn matrix_provider() -> StubProvider {
    StubProvider::new()
        .with_detail(record("tt0133093", "The Matrix", "movie", "Action, Sci-Fi"))
        .with_detail(record("tt0234215", "The Matrix Reloaded", "movie", "Action"))
        .with_detail(record("tt0410519", "The Matrix Recalibrated", "movie", "Documentary"))
        .with_search(
            "Matrix",
            vec![
                candidate("tt0133093", "The Matrix", "movie"),
                candidate("tt0234215", "The Matrix Reloaded", "movie"),
                candidate("tt0410519", "The Matrix Recalibrated", "movie"),
            ],
        )
}

#[tokio::test]
async fn test_ensure_by_id_fetches_once_then_hits_cache() {
    let (sync, provider, pool) = synchronizer(matrix_provider()).await;

    let first = sync.ensure_by_id("tt0133093").await.unwrap();
    assert_eq!(first.title, "The Matrix");
    assert_eq!(provider.detail_calls(), 1);

    let second = sync.ensure_by_id("tt0133093").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(provider.detail_calls(), 1);
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_ensure_by_id_persists_team() {
    let (sync, _provider, _pool) = synchronizer(matrix_provider()).await;

    sync.ensure_by_id("tt0133093").await.unwrap();
    let team = sync.team_for("tt0133093").await.unwrap();

    let directors: Vec<_> = team.iter().filter(|m| m.role == TeamRole::Director).collect();
    let writers: Vec<_> = team.iter().filter(|m| m.role == TeamRole::Writer).collect();
    let cast: Vec<_> = team.iter().filter(|m| m.role == TeamRole::Cast).collect();
    assert_eq!(directors.len(), 1);
    assert_eq!(writers.len(), 2);
    assert_eq!(cast.len(), 2);
    assert!(team.iter().all(|m| m.movie_id == "tt0133093"));
}

#[tokio::test]
async fn test_ensure_by_id_not_found_leaves_store_empty() {
    let (sync, provider, pool) = synchronizer(StubProvider::new()).await;

    let err = sync.ensure_by_id("tt000").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
    assert_eq!(provider.detail_calls(), 1);
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_ensure_by_id_provider_failure_is_transient() {
    let provider = matrix_provider().failing_on("tt0133093");
    let (sync, _provider, pool) = synchronizer(provider).await;

    let err = sync.ensure_by_id("tt0133093").await.unwrap_err();
    assert!(matches!(err, CoreError::TransientProvider(_)));
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_ensure_by_id_times_out() {
    let pool = create_memory_pool().await.unwrap();
    let provider = Arc::new(
        StubProvider::slow(Duration::from_millis(500))
            .with_detail(record("tt1", "Slow", "movie", "Drama")),
    );
    let sync = CatalogSynchronizer::new(pool.clone(), provider, Duration::from_millis(20));

    let err = sync.ensure_by_id("tt1").await.unwrap_err();
    assert!(matches!(err, CoreError::TransientProvider(_)));
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_ensure_by_id_rejects_blank_id() {
    let (sync, provider, _pool) = synchronizer(StubProvider::new()).await;

    let err = sync.ensure_by_id("  ").await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn test_ensure_by_title_reuses_stored_id() {
    let (sync, provider, pool) = synchronizer(matrix_provider()).await;

    sync.ensure_by_id("tt0133093").await.unwrap();
    let movie = sync.ensure_by_title("the matrix").await.unwrap();

    assert_eq!(movie.id, "tt0133093");
    assert_eq!(provider.detail_calls(), 2);
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_search_with_id_returns_singleton() {
    let (sync, _provider, _pool) = synchronizer(matrix_provider()).await;

    let found = sync.search_and_ensure(&SearchQuery::by_id("tt0234215")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "The Matrix Reloaded");
}

#[tokio::test]
async fn test_search_without_title_never_calls_provider() {
    let (sync, provider, _pool) = synchronizer(matrix_provider()).await;

    let query = SearchQuery::default().with_genre("Drama");
    let found = sync.search_and_ensure(&query).await.unwrap();

    assert!(found.is_empty());
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn test_search_seeds_everything_but_filters_result() {
    let (sync, provider, pool) = synchronizer(matrix_provider()).await;

    let query = SearchQuery::by_title("Matrix").with_genre("Sci-Fi");
    let found = sync.search_and_ensure(&query).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "tt0133093");
    assert_eq!(provider.search_calls(), 1);
    assert_eq!(provider.detail_calls(), 3);
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_search_local_hit_is_authoritative() {
    let (sync, provider, _pool) = synchronizer(matrix_provider()).await;
    sync.ensure_by_id("tt0133093").await.unwrap();

    let found = sync.search_and_ensure(&SearchQuery::by_title("matrix")).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(provider.search_calls(), 0);
    assert_eq!(provider.detail_calls(), 1);
}

#[tokio::test]
async fn test_search_results_are_ordered_by_title() {
    let (sync, _provider, _pool) = synchronizer(matrix_provider()).await;

    let found = sync.search_and_ensure(&SearchQuery::by_title("MATRIX")).await.unwrap();
    let titles: Vec<_> = found.iter().map(|m| m.title.as_str()).collect();

    assert_eq!(
        titles,
        vec!["The Matrix", "The Matrix Recalibrated", "The Matrix Reloaded"]
    );
}

#[tokio::test]
async fn test_search_skips_failing_candidates() {
    let provider = matrix_provider().failing_on("tt0234215");
    let (sync, _provider, pool) = synchronizer(provider).await;

    let found = sync.search_and_ensure(&SearchQuery::by_title("Matrix")).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|m| m.id != "tt0234215"));
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_search_skips_candidates_unknown_to_detail_endpoint() {
    let provider = StubProvider::new()
        .with_detail(record("tt1", "Alien", "movie", "Horror"))
        .with_search(
            "Alien",
            vec![candidate("tt1", "Alien", "movie"), candidate("tt2", "Aliens", "movie")],
        );
    let (sync, _provider, _pool) = synchronizer(provider).await;

    let found = sync.search_and_ensure(&SearchQuery::by_title("Alien")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "tt1");
}

#[tokio::test]
async fn test_search_rejects_unknown_type_before_any_call() {
    let (sync, provider, _pool) = synchronizer(matrix_provider()).await;

    let query = SearchQuery::by_title("Matrix").with_kind("videogame");
    let err = sync.search_and_ensure(&query).await.unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn test_search_type_filter_accepts_synonyms_and_drops_other_kinds() {
    let provider = StubProvider::new()
        .with_detail(record("tt1", "Dark", "movie", "Thriller"))
        .with_detail(record("tt2", "Dark", "series", "Thriller"))
        .with_detail(record("tt3", "Dark Game", "game", "Thriller"))
        .with_search(
            "Dark",
            vec![
                candidate("tt1", "Dark", "movie"),
                candidate("tt2", "Dark", "series"),
                candidate("tt3", "Dark Game", "game"),
            ],
        );
    let (sync, provider, pool) = synchronizer(provider).await;

    let query = SearchQuery::by_title("Dark").with_kind("Serie");
    let found = sync.search_and_ensure(&query).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "tt2");
    assert_eq!(found[0].kind, MovieKind::Series);
    // Only the matching candidate was seeded
    assert_eq!(provider.detail_calls(), 1);
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_search_deduplicates_candidates() {
    let provider = StubProvider::new()
        .with_detail(record("tt1", "Heat", "movie", "Crime"))
        .with_search(
            "Heat",
            vec![candidate("tt1", "Heat", "movie"), candidate("tt1", "Heat", "movie")],
        );
    let (sync, provider, _pool) = synchronizer(provider).await;

    let found = sync.search_and_ensure(&SearchQuery::by_title("Heat")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(provider.detail_calls(), 1);
}

#[tokio::test]
async fn test_get_movie_is_local_only() {
    let (sync, provider, _pool) = synchronizer(matrix_provider()).await;

    let err = sync.get_movie("tt0133093").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn test_concurrent_ensure_stores_one_copy() {
    let provider = StubProvider::slow(Duration::from_millis(50))
        .with_detail(record("tt0133093", "The Matrix", "movie", "Action, Sci-Fi"));
    let (sync, provider, pool) = synchronizer(provider).await;

    // Both calls miss the cache before either stores its result
    let (first, second) = tokio::join!(sync.ensure_by_id("tt0133093"), sync.ensure_by_id("tt0133093"));
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_eq!(first, second);
    assert_eq!(provider.detail_calls(), 2);
    assert_eq!(MovieRepository::count(&pool).await.unwrap(), 1);
    assert_eq!(sync.team_for("tt0133093").await.unwrap().len(), 5);
}
