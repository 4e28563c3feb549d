pub mod config;
pub mod paths;

pub use config::{Config, DatabaseConfig, LoggingConfig, ProviderConfig, ProviderKind};
pub use paths::{container_base_path, PathManager};
