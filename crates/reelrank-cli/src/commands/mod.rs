pub mod config;
pub mod list;
pub mod movie;

use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use tracing::debug;
use watchlist_config::{Config, PathManager};
use watchlist_core::{create_pool, CatalogSynchronizer, OrderedListManager, SqlitePool};
use watchlist_sources::{build_provider, MetadataProvider};

/// Opened store plus the configuration needed to reach the provider.
pub struct App {
    config: Config,
    pool: SqlitePool,
}

impl App {
    pub async fn open(config: Config, paths: &PathManager) -> Result<Self> {
        if config.database.url.is_none() {
            paths
                .ensure_directories()
                .map_err(|e| eyre!("Failed to create {}: {}", paths.data_dir().display(), e))?;
        }

        let url = config.database.resolved_url(paths);
        debug!("Opening local store at {}", url);
        let pool = create_pool(&url, &config.database)
            .await
            .wrap_err_with(|| format!("Failed to open database {}", url))?;

        Ok(Self { config, pool })
    }

    /// Requires a configured provider; local-only commands never call this.
    pub fn catalog(&self) -> Result<CatalogSynchronizer> {
        self.config
            .validate()
            .map_err(|e| eyre!("Invalid configuration: {}", e))?;
        let provider = build_provider(&self.config.provider)
            .wrap_err("Failed to build metadata provider")?;
        debug!("Using metadata provider '{}'", provider.provider_name());

        Ok(CatalogSynchronizer::new(
            self.pool.clone(),
            provider,
            self.config.provider.timeout(),
        ))
    }

    pub fn lists(&self) -> OrderedListManager {
        OrderedListManager::new(self.pool.clone())
    }
}
