//! Workspace directory layout
//!
//! A workspace is the nearest directory (starting from the current one and
//! walking up) that contains the `.nxtool` marker directory. All paths the
//! tool touches are derived from that root once per process and handed to
//! components through [`WorkspacePaths`].

use std::path::{Path, PathBuf};

use crate::config::defaults::{
    APPS_DIR_NAME, BUILD_DIR_PREFIX, CONFIG_FILE_NAME, NUTTX_DIR_NAME, PROJECTS_FILE_NAME,
    WORKSPACE_DIR_NAME,
};
use crate::error::WorkspaceError;

/// Find the first directory in `start` and its ancestors containing `marker`
pub fn find_root_with(start: &Path, marker: &str) -> Result<PathBuf, WorkspaceError> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| WorkspaceError::NotFound {
            start: start.to_path_buf(),
        })
}

/// Paths of one nxtool workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    /// Use `root` as the workspace root without checking for the marker
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the workspace containing `start`
    pub fn discover(start: &Path) -> Result<Self, WorkspaceError> {
        let root = find_root_with(start, WORKSPACE_DIR_NAME)?;
        tracing::debug!("Workspace root: {}", root.display());
        Ok(Self::new(root))
    }

    /// Workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.nxtool` marker directory
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR_NAME)
    }

    /// Global configuration file
    pub fn config_file(&self) -> PathBuf {
        self.state_dir().join(CONFIG_FILE_NAME)
    }

    /// Projects file
    pub fn projects_file(&self) -> PathBuf {
        self.state_dir().join(PROJECTS_FILE_NAME)
    }

    /// NuttX source tree
    pub fn nuttx_dir(&self) -> PathBuf {
        self.root.join(NUTTX_DIR_NAME)
    }

    /// NuttX applications tree
    pub fn apps_dir(&self) -> PathBuf {
        self.root.join(APPS_DIR_NAME)
    }

    /// Build destination for a project: `<root>/build_<name>`
    pub fn build_dir(&self, project: &str) -> PathBuf {
        self.root.join(format!("{BUILD_DIR_PREFIX}{project}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_root() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(WORKSPACE_DIR_NAME)).unwrap();

        let paths = WorkspacePaths::discover(temp.path()).unwrap();
        assert_eq!(paths.root(), temp.path());
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(WORKSPACE_DIR_NAME)).unwrap();
        let nested = temp.path().join("nuttx").join("arch").join("arm");
        std::fs::create_dir_all(&nested).unwrap();

        let paths = WorkspacePaths::discover(&nested).unwrap();
        assert_eq!(paths.root(), temp.path());
    }

    #[test]
    fn test_discover_prefers_nearest_marker() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(WORKSPACE_DIR_NAME)).unwrap();
        let inner = temp.path().join("inner");
        std::fs::create_dir_all(inner.join(WORKSPACE_DIR_NAME)).unwrap();

        let paths = WorkspacePaths::discover(&inner).unwrap();
        assert_eq!(paths.root(), inner.as_path());
    }

    #[test]
    fn test_marker_must_be_a_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker"), "").unwrap();

        let result = find_root_with(temp.path(), "marker");
        assert!(matches!(result, Err(WorkspaceError::NotFound { .. })));
    }

    #[test]
    fn test_derived_paths() {
        let paths = WorkspacePaths::new("/ws");
        assert_eq!(paths.config_file(), PathBuf::from("/ws/.nxtool/config.toml"));
        assert_eq!(paths.projects_file(), PathBuf::from("/ws/.nxtool/projects.toml"));
        assert_eq!(paths.nuttx_dir(), PathBuf::from("/ws/nuttx"));
        assert_eq!(paths.apps_dir(), PathBuf::from("/ws/apps"));
        assert_eq!(paths.build_dir("demo"), PathBuf::from("/ws/build_demo"));
    }
}
