use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from the environment; `None` when unset.
pub fn container_base_path() -> Option<PathBuf> {
    std::env::var("REELRANK_BASE_PATH").ok().map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelrank");

        Ok(Self::from_base(base_dir))
    }

    /// Layout rooted at a single directory: config at the top, data in a subdir.
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("reelrank.db")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = container_base_path() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/reelrank on Linux)
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".reelrank")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_base() {
        let paths = PathManager::from_base(PathBuf::from("/srv/reelrank"));
        assert_eq!(paths.config_file(), PathBuf::from("/srv/reelrank/config.toml"));
        assert_eq!(paths.database_file(), PathBuf::from("/srv/reelrank/data/reelrank.db"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("app"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(dir.path().join("app").is_dir());
    }
}
