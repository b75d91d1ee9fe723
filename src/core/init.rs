//! Workspace initialization logic
//!
//! Creates the `.nxtool` marker directory with a default `config.toml` and
//! `projects.toml`.

use std::path::Path;

use crate::core::config::ConfigStore;
use crate::core::project::ProjectStore;
use crate::error::WorkspaceError;
use crate::infra::dirs::WorkspacePaths;
use crate::infra::filesystem;

/// Initialize a workspace rooted at `root`
///
/// # Arguments
///
/// * `root` - Directory that becomes the workspace root
///
/// # Returns
///
/// * `Ok(WorkspacePaths)` - Paths of the new workspace
/// * `Err(WorkspaceError::AlreadyInitialized)` - If `root/.nxtool` exists
pub fn init_workspace(root: &Path) -> Result<WorkspacePaths, WorkspaceError> {
    let paths = WorkspacePaths::new(root);
    let state_dir = paths.state_dir();
    if state_dir.exists() {
        return Err(WorkspaceError::AlreadyInitialized { path: state_dir });
    }

    filesystem::create_dir_all(&state_dir)?;
    ConfigStore::default().save(&paths.config_file())?;
    ProjectStore::new(paths.projects_file()).save()?;

    tracing::info!("Initialized workspace at {}", root.display());
    Ok(paths)
}
