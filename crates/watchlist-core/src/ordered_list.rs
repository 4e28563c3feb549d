//! Per-user ranked lists whose positions are always exactly 1..N.
//!
//! Every mutation runs inside one transaction while holding the list's lock.
//! Position shifts never write a value another row still holds: the moving
//! rows are parked above the live range first, then brought to their final
//! slots (parked renumbering).


use sqlx::SqlitePool;
use tracing::{debug, info};
use watchlist_models::{WatchList, WatchListEntry, WatchListItem};

use crate::db::begin_write;
use crate::error::{CoreError, CoreResult};
use crate::locks::ListLocks;
use crate::store::{MovieRepository, WatchListItemRepository, WatchListRepository};

/// Base distance parked rows are moved away from the live 1..N range.
pub const PARKING_OFFSET: i64 = 1_000_000;

/// Parked values must land above every live position.
fn parking_offset(len: i64) -> i64 {
    PARKING_OFFSET.max(len + 1)
}

pub struct OrderedListManager {
    db: SqlitePool,
    locks: ListLocks,
}

impl OrderedListManager {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            locks: ListLocks::new(),
        }
    }

    /// Fetch the user's list, creating it on first access.
    pub async fn get_or_create_list(&self, user_id: i64) -> CoreResult<WatchList> {
        if let Some(list) = WatchListRepository::find_by_user(&self.db, user_id).await? {
            return Ok(list);
        }

        // Concurrent first calls for the same user converge on one row
        if WatchListRepository::insert_if_absent(&self.db, user_id).await? {
            info!("Created watch list for user {}", user_id);
        } else {
            debug!("Watch list for user {} created concurrently, re-reading", user_id);
        }

        WatchListRepository::find_by_user(&self.db, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("watch list for user {}", user_id)))
    }

    /// Read-only lookup; does not create.
    pub async fn find_list(&self, user_id: i64) -> CoreResult<Option<WatchList>> {
        Ok(WatchListRepository::find_by_user(&self.db, user_id).await?)
    }

    /// Items in ascending position order.
    pub async fn list_items(&self, list: &WatchList) -> CoreResult<Vec<WatchListItem>> {
        Ok(WatchListItemRepository::list(&self.db, list.id).await?)
    }

    /// Items with movie title and kind, in ascending position order.
    pub async fn list_entries(&self, list: &WatchList) -> CoreResult<Vec<WatchListEntry>> {
        Ok(WatchListItemRepository::list_entries(&self.db, list.id).await?)
    }

    /// Add `movie_id`, appending when `position` is `None`.
    ///
    /// An explicit position is clamped to `1..=len+1`; items at or after it
    /// move down one slot. Adding a movie already on the list returns the
    /// existing item unchanged.
    pub async fn add_item(
        &self,
        list: &WatchList,
        movie_id: &str,
        position: Option<i64>,
    ) -> CoreResult<WatchListItem> {
        let _guard = self.locks.acquire(list.id).await;
        let mut tx = begin_write(&self.db).await?;

        if let Some(existing) = WatchListItemRepository::find(&mut *tx, list.id, movie_id).await? {
            tx.rollback().await?;
            debug!("{} already on list {} at {}", movie_id, list.id, existing.position);
            return Ok(existing);
        }

        if !MovieRepository::exists(&mut *tx, movie_id).await? {
            tx.rollback().await?;
            return Err(CoreError::referential(format!(
                "movie '{}' must be in the catalog before it can be listed",
                movie_id
            )));
        }

        let len = WatchListItemRepository::count(&mut *tx, list.id).await?;
        let position = match position {
            None => WatchListItemRepository::max_position(&mut *tx, list.id).await? + 1,
            Some(requested) => {
                let target = requested.clamp(1, len + 1);
                if target <= len {
                    let offset = parking_offset(len);
                    WatchListItemRepository::park_from(&mut *tx, list.id, target, offset).await?;
                    WatchListItemRepository::unpark(&mut *tx, list.id, offset, 1).await?;
                }
                target
            }
        };

        let item = WatchListItemRepository::insert(&mut *tx, list.id, movie_id, position).await?;
        tx.commit().await?;

        info!("Added {} to list {} at position {}", movie_id, list.id, position);
        Ok(item)
    }

    /// Remove `movie_id` and close the gap. Returns whether anything was removed.
    pub async fn remove_item(&self, list: &WatchList, movie_id: &str) -> CoreResult<bool> {
        let _guard = self.locks.acquire(list.id).await;
        let mut tx = begin_write(&self.db).await?;

        let Some(item) = WatchListItemRepository::find(&mut *tx, list.id, movie_id).await? else {
            tx.rollback().await?;
            debug!("{} not on list {}, nothing to remove", movie_id, list.id);
            return Ok(false);
        };

        let len = WatchListItemRepository::count(&mut *tx, list.id).await?;
        WatchListItemRepository::delete(&mut *tx, list.id, movie_id).await?;

        let offset = parking_offset(len);
        let parked =
            WatchListItemRepository::park_from(&mut *tx, list.id, item.position + 1, offset).await?;
        if parked > 0 {
            WatchListItemRepository::unpark(&mut *tx, list.id, offset, -1).await?;
        }
        tx.commit().await?;

        info!("Removed {} from list {} (was at {})", movie_id, list.id, item.position);
        Ok(true)
    }

    /// Move `movie_id` to `new_position` (clamped to `1..=len`) and return the new order.
    pub async fn reorder_item(
        &self,
        list: &WatchList,
        movie_id: &str,
        new_position: i64,
    ) -> CoreResult<Vec<WatchListItem>> {
        let _guard = self.locks.acquire(list.id).await;
        let mut tx = begin_write(&self.db).await?;

        let mut items = WatchListItemRepository::list(&mut *tx, list.id).await?;
        let Some(current) = items.iter().position(|i| i.movie_id == movie_id) else {
            tx.rollback().await?;
            return Err(CoreError::referential(format!(
                "movie '{}' is not on list {}",
                movie_id, list.id
            )));
        };

        let len = items.len() as i64;
        let target = (new_position.clamp(1, len) - 1) as usize;
        if target == current {
            tx.rollback().await?;
            return Ok(items);
        }

        let moved = items.remove(current);
        items.insert(target, moved);

        // Phase 1: park every row above the live range
        WatchListItemRepository::park_from(&mut *tx, list.id, 1, parking_offset(len)).await?;

        // Phase 2: write the final 1..N order
        for (index, item) in items.iter_mut().enumerate() {
            item.position = index as i64 + 1;
            WatchListItemRepository::set_position(&mut *tx, list.id, &item.movie_id, item.position)
                .await?;
        }
        tx.commit().await?;

        info!(
            "Moved {} on list {} from {} to {}",
            movie_id,
            list.id,
            current + 1,
            target + 1
        );
        Ok(items)
    }
}
