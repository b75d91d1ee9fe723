//! Project removal logic
//!
//! Removes a project from the store and cleans what its back-end built.

use crate::core::builder::{select_builder, BuildSettings};
use crate::core::project::ProjectStore;
use crate::error::NxtoolError;
use crate::infra::dirs::WorkspacePaths;
use crate::infra::process::CommandRunner;

/// Options for removing a project
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// Project name
    pub name: String,
    /// Also delete the build directory
    pub purge: bool,
}

/// Result of removing a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveResult {
    pub name: String,
    /// Configuration the project had
    pub config: Option<String>,
    /// Whether the build tool's clean target ran successfully
    pub cleaned: bool,
    /// Whether the build directory was deleted
    pub purged: bool,
}

/// Remove a project from `store`
///
/// The store rejects unknown, built-in and current projects before anything
/// is touched. Once removed, a configured build directory is cleaned; a
/// failing clean is logged and does not undo the removal.
pub fn remove_project(
    paths: &WorkspacePaths,
    store: &mut ProjectStore,
    options: &RemoveOptions,
    settings: &BuildSettings,
    runner: &dyn CommandRunner,
) -> Result<RemoveResult, NxtoolError> {
    let removed = store.remove(&options.name)?;
    let builder = select_builder(paths, &removed, settings, runner);

    let cleaned = if builder.is_configured() {
        match builder.clean() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to clean project '{}': {}", removed.name, e);
                false
            }
        }
    } else {
        tracing::debug!("Project '{}' was never configured, nothing to clean", removed.name);
        false
    };

    let purged = if options.purge {
        builder.fullclean()?
    } else {
        false
    };

    Ok(RemoveResult {
        name: removed.name,
        config: removed.config,
        cleaned,
        purged,
    })
}
