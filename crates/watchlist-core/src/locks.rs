use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per list id; mutations on the same list run one at a time.
///
/// Entries are never evicted: there is one per list that was ever mutated
/// during the process lifetime.
#[derive(Default)]
pub struct ListLocks {
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl ListLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `list_id`; released when the guard drops.
    pub async fn acquire(&self, list_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(list_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}
