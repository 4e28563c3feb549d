use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use watchlist_config::DatabaseConfig;

use crate::error::CoreResult;

/// Open (creating if needed) the SQLite store and bring its schema up to date.
pub async fn create_pool(database_url: &str, config: &DatabaseConfig) -> CoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // WAL allows concurrent reads during writes
        .journal_mode(SqliteJournalMode::Wal)
        // Wait for the write lock instead of failing immediately
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    debug!("Connected to {}", database_url);

    run_migrations(&pool).await?;
    info!("Local store ready at {}", database_url);
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> CoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Single-connection in-memory store; every connection to `:memory:` is a separate database.
pub async fn create_memory_pool() -> CoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Start a transaction that holds the write lock from its first statement.
///
/// Under WAL a deferred transaction that reads first cannot become a writer
/// once another connection has committed (SQLITE_BUSY_SNAPSHOT), and the busy
/// timeout does not cover that failure. Taking the lock up front makes the
/// busy timeout apply instead.
pub(crate) async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}
