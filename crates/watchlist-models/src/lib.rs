pub mod movie;
pub mod team;
pub mod watchlist;

pub use movie::{Movie, MovieKind, ParseKindError};
pub use team::{ParseRoleError, TeamMember, TeamRole};
pub use watchlist::{WatchList, WatchListEntry, WatchListItem};
