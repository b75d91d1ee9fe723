//! Source update logic
//!
//! Clones every configured remote into `<root>/<remote name>`, or
//! fast-forwards checkouts that already exist.

use serde::Serialize;

use crate::core::config::ConfigStore;
use crate::error::ProcessError;
use crate::infra::dirs::WorkspacePaths;
use crate::infra::git::{GitOperations, SyncAction};
use crate::infra::process::CommandRunner;

/// One synced repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncedRemote {
    pub name: String,
    pub url: String,
    /// `true` for a fresh clone, `false` for an update
    pub cloned: bool,
}

/// Clone or update all remotes, in name order
///
/// Stops at the first failing repository.
pub fn update_sources(
    paths: &WorkspacePaths,
    config: &ConfigStore,
    runner: &dyn CommandRunner,
) -> Result<Vec<SyncedRemote>, ProcessError> {
    let git = GitOperations::new(paths.root().to_path_buf(), runner);

    config
        .remotes()
        .map(|(name, url)| {
            let action = git.sync(url, name)?;
            Ok(SyncedRemote {
                name: name.to_string(),
                url: url.to_string(),
                cloned: action == SyncAction::Cloned,
            })
        })
        .collect()
}
