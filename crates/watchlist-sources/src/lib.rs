pub mod error;
pub mod factory;
pub mod omdb;
pub mod record;
pub mod traits;

pub use error::SourceError;
pub use factory::build_provider;
pub use omdb::OmdbClient;
pub use record::{MovieRecord, ProviderQuery, SearchCandidate};
pub use traits::MetadataProvider;
