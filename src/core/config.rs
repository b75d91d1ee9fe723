//! Global workspace configuration
//!
//! Reads and writes `.nxtool/config.toml`, which holds the source repositories
//! cloned into the workspace:
//!
//! ```toml
//! [remotes]
//! apps = "https://github.com/apache/nuttx-apps"
//! nuttx = "https://github.com/apache/nuttx"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::urls::{APPS_REMOTE, APPS_REPO, NUTTX_REMOTE, NUTTX_REPO};
use crate::error::StoreError;
use crate::infra::filesystem;

/// Global configuration for a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    /// Remote name to repository URL; the name is also the checkout directory
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        let remotes = [(NUTTX_REMOTE, NUTTX_REPO), (APPS_REMOTE, APPS_REPO)]
            .into_iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect();
        Self { remotes }
    }
}

impl ConfigStore {
    /// Load configuration, falling back to defaults
    ///
    /// A missing or malformed file is reported as a warning, never as an error.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!("{} not found, using default remotes", path.display());
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}; using default remotes");
                Self::default()
            }
        }
    }

    /// Load configuration, reporting any failure
    pub fn try_load(path: &Path) -> Result<Self, StoreError> {
        let content = filesystem::read_file(path)?;
        toml::from_str(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Write configuration atomically
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(self).map_err(|e| StoreError::Serialize {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        filesystem::write_file_atomic(path, &content)?;
        Ok(())
    }

    /// URL of a remote
    pub fn remote(&self, name: &str) -> Option<&str> {
        self.remotes.get(name).map(String::as_str)
    }

    /// Iterate `(name, url)` pairs in name order
    pub fn remotes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.remotes.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_remotes() {
        let config = ConfigStore::default();
        assert_eq!(config.remote("nuttx"), Some(NUTTX_REPO));
        assert_eq!(config.remote("apps"), Some(APPS_REPO));
        assert_eq!(config.remotes().count(), 2);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let config = ConfigStore::load(&temp.path().join("config.toml"));
        assert_eq!(config, ConfigStore::default());
    }

    #[test]
    fn test_load_invalid_toml_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "remotes = [[[").unwrap();

        assert!(ConfigStore::try_load(&path).is_err());
        assert_eq!(ConfigStore::load(&path), ConfigStore::default());
    }

    #[test]
    fn test_load_custom_remotes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[remotes]\nnuttx = \"https://example.com/nuttx.git\"\n",
        )
        .unwrap();

        let config = ConfigStore::load(&path);
        assert_eq!(config.remote("nuttx"), Some("https://example.com/nuttx.git"));
        assert_eq!(config.remote("apps"), None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".nxtool").join("config.toml");

        let mut config = ConfigStore::default();
        config
            .remotes
            .insert("mirror".to_string(), "https://mirror.example.com/nuttx".to_string());
        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[remotes]"));

        assert_eq!(ConfigStore::try_load(&path).unwrap(), config);
    }
}
