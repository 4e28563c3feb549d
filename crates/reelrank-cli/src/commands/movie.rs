use super::App;
use crate::output::{styled_table, Output};
use crate::MovieCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use watchlist_core::SearchQuery;
use watchlist_models::{Movie, TeamMember, TeamRole};

pub async fn run_movie(cmd: MovieCommands, app: &App, output: &Output) -> Result<()> {
    match cmd {
        MovieCommands::Get { id, title } => get_movie(id, title, app, output).await,
        MovieCommands::Search { id, title, genre, kind } => {
            let query = SearchQuery { id, title, genre, kind };
            search_movies(&query, app, output).await
        }
    }
}

async fn get_movie(id: Option<String>, title: Option<String>, app: &App, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let movie = match (id, title) {
        (_, Some(title)) => catalog.ensure_by_title(&title).await?,
        (Some(id), None) => catalog.ensure_by_id(&id).await?,
        (None, None) => return Err(eyre!("Either an id or --title is required")),
    };
    let team = catalog.team_for(&movie.id).await?;

    if !output.is_human() {
        output.json(&json!({ "movie": movie, "team": team }));
        return Ok(());
    }

    let mut table = styled_table(&["Field", "Value"]);
    table.add_row(vec!["Id".to_string(), movie.id.clone()]);
    table.add_row(vec!["Title".to_string(), movie.title.clone()]);
    table.add_row(vec!["Type".to_string(), movie.kind.to_string()]);
    table.add_row(vec!["Genre".to_string(), movie.genre.clone()]);
    table.add_row(vec!["Country".to_string(), movie.country.clone()]);
    table.add_row(vec!["Released".to_string(), display_opt(movie.release_date)]);
    table.add_row(vec![
        "Runtime".to_string(),
        movie.runtime_minutes.map(|m| format!("{} min", m)).unwrap_or_default(),
    ]);
    table.add_row(vec!["Rating".to_string(), display_opt(movie.rating)]);
    for role in [TeamRole::Director, TeamRole::Writer, TeamRole::Cast] {
        table.add_row(vec![role_label(role).to_string(), names_with_role(&team, role)]);
    }
    output.table(&table);
    Ok(())
}

async fn search_movies(query: &SearchQuery, app: &App, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let movies = catalog.search_and_ensure(query).await?;

    if !output.is_human() {
        output.json(&json!({ "count": movies.len(), "movies": movies }));
        return Ok(());
    }

    if movies.is_empty() {
        output.warn("No movies matched");
        return Ok(());
    }
    output.table(&movie_table(&movies));
    output.info(format!("{} movie(s)", movies.len()));
    Ok(())
}

fn movie_table(movies: &[Movie]) -> comfy_table::Table {
    let mut table = styled_table(&["Id", "Title", "Type", "Genre", "Released"]);
    for movie in movies {
        table.add_row(vec![
            movie.id.clone(),
            movie.title.clone(),
            movie.kind.to_string(),
            movie.genre.clone(),
            display_opt(movie.release_date),
        ]);
    }
    table
}

fn role_label(role: TeamRole) -> &'static str {
    match role {
        TeamRole::Director => "Directors",
        TeamRole::Writer => "Writers",
        TeamRole::Cast => "Cast",
    }
}

fn names_with_role(team: &[TeamMember], role: TeamRole) -> String {
    team.iter()
        .filter(|m| m.role == role)
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
