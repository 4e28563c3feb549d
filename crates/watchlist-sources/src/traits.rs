use async_trait::async_trait;

use crate::error::SourceError;
use crate::record::{MovieRecord, ProviderQuery, SearchCandidate};

/// Remote catalog of movie metadata.
///
/// Implementations perform network I/O and impose no caching of their own.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Look up a single title by id or exact title.
    ///
    /// `Ok(None)` means the provider answered and has no such record.
    async fn fetch_detail(&self, query: &ProviderQuery) -> Result<Option<MovieRecord>, SourceError>;

    /// Search by free-text title. An empty result is not an error.
    async fn search_by_title(&self, title: &str) -> Result<Vec<SearchCandidate>, SourceError>;
}
