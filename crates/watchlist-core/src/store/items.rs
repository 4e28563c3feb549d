use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};
use watchlist_models::{MovieKind, WatchListEntry, WatchListItem};

pub struct WatchListItemRepository;

impl WatchListItemRepository {
    /// All items of a list in ascending position order.
    pub async fn list<'e, E>(executor: E, list_id: i64) -> Result<Vec<WatchListItem>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT list_id, movie_id, position, added_at
            FROM watch_list_items
            WHERE list_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Items joined with their movie's title and kind, ascending position order.
    pub async fn list_entries<'e, E>(
        executor: E,
        list_id: i64,
    ) -> Result<Vec<WatchListEntry>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<(i64, String, String, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT i.position, i.movie_id, m.title, m.kind, i.added_at
            FROM watch_list_items i
            JOIN movies m ON m.id = i.movie_id
            WHERE i.list_id = $1
            ORDER BY i.position ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(executor)
        .await?;

        rows.into_iter()
            .map(|(position, movie_id, title, kind, added_at)| -> Result<WatchListEntry, sqlx::Error> {
                let kind = MovieKind::parse(&kind).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Ok(WatchListEntry { position, movie_id, title, kind, added_at })
            })
            .collect()
    }

    pub async fn find<'e, E>(
        executor: E,
        list_id: i64,
        movie_id: &str,
    ) -> Result<Option<WatchListItem>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT list_id, movie_id, position, added_at
            FROM watch_list_items
            WHERE list_id = $1 AND movie_id = $2
            "#,
        )
        .bind(list_id)
        .bind(movie_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn count<'e, E>(executor: E, list_id: i64) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM watch_list_items WHERE list_id = $1")
            .bind(list_id)
            .fetch_one(executor)
            .await?;
        Ok(count.0)
    }

    /// Highest position in the list, 0 when empty.
    pub async fn max_position<'e, E>(executor: E, list_id: i64) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let max: (i64,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position), 0) FROM watch_list_items WHERE list_id = $1",
        )
        .bind(list_id)
        .fetch_one(executor)
        .await?;
        Ok(max.0)
    }

    pub async fn insert<'e, E>(
        executor: E,
        list_id: i64,
        movie_id: &str,
        position: i64,
    ) -> Result<WatchListItem, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO watch_list_items (list_id, movie_id, position, added_at)
            VALUES ($1, $2, $3, $4)
            RETURNING list_id, movie_id, position, added_at
            "#,
        )
        .bind(list_id)
        .bind(movie_id)
        .bind(position)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    /// Delete one item. Returns whether a row was removed.
    pub async fn delete<'e, E>(executor: E, list_id: i64, movie_id: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM watch_list_items WHERE list_id = $1 AND movie_id = $2")
            .bind(list_id)
            .bind(movie_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Park every item at or after `from_position` by adding `offset`.
    pub async fn park_from<'e, E>(
        executor: E,
        list_id: i64,
        from_position: i64,
        offset: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE watch_list_items SET position = position + $1 WHERE list_id = $2 AND position >= $3",
        )
        .bind(offset)
        .bind(list_id)
        .bind(from_position)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Bring parked items back, landing each at its original position plus `delta`.
    pub async fn unpark<'e, E>(
        executor: E,
        list_id: i64,
        offset: i64,
        delta: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE watch_list_items SET position = position - $1 + $2 WHERE list_id = $3 AND position > $1",
        )
        .bind(offset)
        .bind(delta)
        .bind(list_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn set_position<'e, E>(
        executor: E,
        list_id: i64,
        movie_id: &str,
        position: i64,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE watch_list_items SET position = $1 WHERE list_id = $2 AND movie_id = $3")
            .bind(position)
            .bind(list_id)
            .bind(movie_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    list_id: i64,
    movie_id: String,
    position: i64,
    added_at: DateTime<Utc>,
}

impl From<ItemRow> for WatchListItem {
    fn from(row: ItemRow) -> Self {
        Self {
            list_id: row.list_id,
            movie_id: row.movie_id,
            position: row.position,
            added_at: row.added_at,
        }
    }
}
