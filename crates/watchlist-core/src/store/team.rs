use sqlx::{Executor, Sqlite, SqliteConnection};
use watchlist_models::{TeamMember, TeamRole};

pub struct TeamMemberRepository;

impl TeamMemberRepository {
    /// Insert the credited people of one movie. Meant to run in the movie's transaction.
    pub async fn insert_all(
        conn: &mut SqliteConnection,
        movie_id: &str,
        members: &[(String, TeamRole)],
    ) -> Result<(), sqlx::Error> {
        for (name, role) in members {
            sqlx::query("INSERT INTO team_members (movie_id, name, role) VALUES ($1, $2, $3)")
                .bind(movie_id)
                .bind(name)
                .bind(role.as_str())
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Members in insertion order.
    pub async fn list_for_movie<'e, E>(
        executor: E,
        movie_id: &str,
    ) -> Result<Vec<TeamMember>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id, movie_id, name, role FROM team_members WHERE movie_id = $1 ORDER BY id ASC",
        )
        .bind(movie_id)
        .fetch_all(executor)
        .await?;

        rows.into_iter()
            .map(|(id, movie_id, name, role)| -> Result<TeamMember, sqlx::Error> {
                let role = role
                    .parse::<TeamRole>()
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Ok(TeamMember { id, movie_id, name, role })
            })
            .collect()
    }
}
