use chrono::NaiveDate;
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection};
use watchlist_models::{Movie, MovieKind};

/// Common SELECT fields for movie queries
const SELECT_MOVIE: &str = r#"
    SELECT
        id, title, kind, genre, country,
        poster_url, rating, release_date, runtime_minutes
    FROM movies
"#;

/// Local catalog filter. Text filters are case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub kind: Option<MovieKind>,
}

pub struct MovieRepository;

impl MovieRepository {
    pub async fn get_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Movie>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("{} WHERE id = $1", SELECT_MOVIE);
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        row.map(MovieRow::into_movie).transpose()
    }

    pub async fn exists<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies WHERE id = $1")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(count.0 > 0)
    }

    /// Insert unless a row with the same id exists. Returns whether a row was written.
    pub async fn insert_if_absent(
        conn: &mut SqliteConnection,
        movie: &Movie,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO movies (
                id, title, kind, genre, country,
                poster_url, rating, release_date, runtime_minutes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(movie.kind.as_str())
        .bind(&movie.genre)
        .bind(&movie.country)
        .bind(&movie.poster_url)
        .bind(movie.rating)
        .bind(movie.release_date)
        .bind(movie.runtime_minutes)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Filtered search, ordered by title ascending (id breaks ties).
    pub async fn search<'e, E>(executor: E, filter: &MovieFilter) -> Result<Vec<Movie>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_MOVIE);
        builder.push(" WHERE 1 = 1");

        // instr() instead of LIKE so '%' and '_' in user input stay literal
        if let Some(title) = &filter.title {
            builder.push(" AND instr(lower(title), lower(");
            builder.push_bind(title.clone());
            builder.push(")) > 0");
        }
        if let Some(genre) = &filter.genre {
            builder.push(" AND instr(lower(genre), lower(");
            builder.push_bind(genre.clone());
            builder.push(")) > 0");
        }
        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind.as_str());
        }
        builder.push(" ORDER BY title ASC, id ASC");

        let rows = builder
            .build_query_as::<MovieRow>()
            .fetch_all(executor)
            .await?;

        rows.into_iter().map(MovieRow::into_movie).collect()
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(executor)
            .await?;
        Ok(count.0)
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: String,
    title: String,
    kind: String,
    genre: String,
    country: String,
    poster_url: Option<String>,
    rating: Option<f64>,
    release_date: Option<NaiveDate>,
    runtime_minutes: Option<i64>,
}

impl MovieRow {
    fn into_movie(self) -> Result<Movie, sqlx::Error> {
        let kind = MovieKind::parse(&self.kind).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Movie {
            id: self.id,
            title: self.title,
            kind,
            genre: self.genre,
            country: self.country,
            poster_url: self.poster_url,
            rating: self.rating,
            release_date: self.release_date,
            runtime_minutes: self.runtime_minutes,
        })
    }
}
