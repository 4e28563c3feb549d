use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};
use watchlist_models::WatchList;

pub struct WatchListRepository;

impl WatchListRepository {
    pub async fn find_by_user<'e, E>(executor: E, user_id: i64) -> Result<Option<WatchList>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<(i64, i64, DateTime<Utc>)> =
            sqlx::query_as("SELECT id, user_id, created_at FROM watch_lists WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?;

        Ok(row.map(|(id, user_id, created_at)| WatchList { id, user_id, created_at }))
    }

    /// Create the user's list unless one exists. Returns whether a row was written.
    pub async fn insert_if_absent<'e, E>(executor: E, user_id: i64) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO watch_lists (user_id, created_at)
            VALUES ($1, $2)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
