pub mod catalog;
pub mod db;
pub mod error;
pub mod locks;
pub mod ordered_list;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{CatalogSynchronizer, SearchQuery};
pub use db::{create_memory_pool, create_pool, run_migrations};
pub use error::{CoreError, CoreResult};
pub use locks::ListLocks;
pub use ordered_list::{OrderedListManager, PARKING_OFFSET};
pub use store::MovieFilter;

pub use sqlx::SqlitePool;
