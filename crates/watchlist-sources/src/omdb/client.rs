use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::SourceError;
use crate::omdb::api::{OmdbDetail, OmdbSearch};
use crate::record::{MovieRecord, ProviderQuery, SearchCandidate};
use crate::traits::MetadataProvider;

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reelrank/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Use a preconfigured reqwest client (proxy, custom TLS, ...).
    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn fetch_detail(&self, query: &ProviderQuery) -> Result<Option<MovieRecord>, SourceError> {
        let key = match query {
            ProviderQuery::Id(_) => "i",
            ProviderQuery::Title(_) => "t",
        };
        debug!("OMDb detail lookup: {}={}", key, query.as_str());

        let detail: OmdbDetail = self.get(&[(key, query.as_str()), ("plot", "short")]).await?;
        detail.into_record(query.as_str())
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<SearchCandidate>, SourceError> {
        debug!("OMDb title search: '{}'", title);

        let search: OmdbSearch = self.get(&[("s", title)]).await?;
        let candidates = search.into_candidates()?;
        debug!("OMDb title search '{}' returned {} candidate(s)", title, candidates.len());
        Ok(candidates)
    }
}
