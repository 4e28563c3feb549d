use std::sync::Arc;

use tracing::debug;
use watchlist_config::{ProviderConfig, ProviderKind};

use crate::error::SourceError;
use crate::omdb::OmdbClient;
use crate::traits::MetadataProvider;

/// Build the configured metadata provider.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn MetadataProvider>, SourceError> {
    if !config.is_configured() {
        return Err(SourceError::NotConfigured(
            "provider.api_key is missing".to_string(),
        ));
    }

    match config.kind {
        ProviderKind::Omdb => {
            debug!("Building OMDb provider (base url: {}, timeout: {}s)", config.base_url, config.timeout_secs);
            let client = OmdbClient::new(&config.base_url, &config.api_key, config.timeout())?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_provider_requires_api_key() {
        let config = ProviderConfig::default();
        let result = build_provider(&config);
        assert!(matches!(result, Err(SourceError::NotConfigured(_))));
    }

    #[test]
    fn test_build_provider_omdb() {
        let config = ProviderConfig {
            api_key: "key".to_string(),
            ..ProviderConfig::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "omdb");
    }
}
