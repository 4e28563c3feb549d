//! SQLite repositories for the local store.
//!
//! Repositories are stateless; every function takes an executor so the same
//! query runs against the pool or inside an open transaction (`&mut *tx`).

mod items;
mod movies;
mod team;
mod watch_lists;

pub use items::WatchListItemRepository;
pub use movies::{MovieFilter, MovieRepository};
pub use team::TeamMemberRepository;
pub use watch_lists::WatchListRepository;
