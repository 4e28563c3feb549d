use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::MovieKind;

/// A user's ranked list. At most one per user; created lazily.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchList {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// One ranked entry. `position` is 1-based and unique within the list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchListItem {
    pub list_id: i64,
    pub movie_id: String,
    pub position: i64,
    pub added_at: DateTime<Utc>,
}

/// A list item joined with the movie fields needed for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchListEntry {
    pub position: i64,
    pub movie_id: String,
    pub title: String,
    pub kind: MovieKind,
    pub added_at: DateTime<Utc>,
}
