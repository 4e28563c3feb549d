use super::App;
use crate::output::{styled_table, Output};
use crate::ListCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use watchlist_core::OrderedListManager;
use watchlist_models::{WatchList, WatchListEntry};

pub async fn run_list(cmd: ListCommands, app: &App, output: &Output) -> Result<()> {
    let lists = app.lists();
    match cmd {
        ListCommands::Show { user } => show_list(user, &lists, output).await,
        ListCommands::Add { user, movie_id, position } => {
            // The catalog must hold the movie before it can be ranked
            let movie = app.catalog()?.ensure_by_id(&movie_id).await?;
            let list = lists.get_or_create_list(user).await?;
            let item = lists.add_item(&list, &movie.id, position).await?;
            output.success(format!(
                "{} ({}) is #{} on user {}'s list",
                movie.title, movie.id, item.position, user
            ));
            print_entries(user, &lists.list_entries(&list).await?, output);
            Ok(())
        }
        ListCommands::Remove { user, movie_id } => {
            let list = existing_list(user, &lists).await?;
            if lists.remove_item(&list, &movie_id).await? {
                output.success(format!("Removed {} from user {}'s list", movie_id, user));
            } else {
                output.warn(format!("{} is not on user {}'s list", movie_id, user));
            }
            print_entries(user, &lists.list_entries(&list).await?, output);
            Ok(())
        }
        ListCommands::Move { user, movie_id, position } => {
            let list = existing_list(user, &lists).await?;
            let items = lists.reorder_item(&list, &movie_id, position).await?;
            let landed = items
                .iter()
                .find(|i| i.movie_id == movie_id)
                .map(|i| i.position)
                .unwrap_or(position);
            output.success(format!("Moved {} to #{}", movie_id, landed));
            print_entries(user, &lists.list_entries(&list).await?, output);
            Ok(())
        }
    }
}

async fn show_list(user: i64, lists: &OrderedListManager, output: &Output) -> Result<()> {
    let entries = match lists.find_list(user).await? {
        Some(list) => lists.list_entries(&list).await?,
        None => Vec::new(),
    };
    print_entries(user, &entries, output);
    Ok(())
}

async fn existing_list(user: i64, lists: &OrderedListManager) -> Result<WatchList> {
    lists
        .find_list(user)
        .await?
        .ok_or_else(|| eyre!("User {} has no watch list yet", user))
}

fn print_entries(user: i64, entries: &[WatchListEntry], output: &Output) {
    if !output.is_human() {
        output.json(&json!({ "user_id": user, "items": entries }));
        return;
    }

    if entries.is_empty() {
        output.info(format!("User {}'s list is empty", user));
        return;
    }

    let mut table = styled_table(&["#", "Id", "Title", "Type", "Added"]);
    for entry in entries {
        table.add_row(vec![
            entry.position.to_string(),
            entry.movie_id.clone(),
            entry.title.clone(),
            entry.kind.to_string(),
            entry.added_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    output.table(&table);
}
