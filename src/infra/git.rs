//! Git operations
//!
//! Clones and updates the workspace source repositories by running the `git`
//! executable through a [`CommandRunner`], so clone progress is streamed like
//! any other tool output.

use std::path::{Path, PathBuf};

use crate::error::ProcessError;
use crate::infra::process::{locate, CommandRunner};

/// Name of the git executable
pub const GIT: &str = "git";

/// Outcome of syncing one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Repository was cloned fresh
    Cloned,
    /// Existing checkout was fast-forwarded
    Updated,
}

/// Git repository operations rooted at a working directory
pub struct GitOperations<'a> {
    /// Directory repositories are cloned into
    work_dir: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> GitOperations<'a> {
    /// Create a new git operations handler
    pub fn new(work_dir: PathBuf, runner: &'a dyn CommandRunner) -> Self {
        Self { work_dir, runner }
    }

    /// Fail early if git is not installed
    pub fn ensure_available() -> Result<(), ProcessError> {
        locate(GIT).map(|_| ())
    }

    /// Get the working directory
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Clone `url` into `<work_dir>/<dest_name>`
    pub fn clone_repo(&self, url: &str, dest_name: &str) -> Result<PathBuf, ProcessError> {
        let args = vec!["clone".to_string(), url.to_string(), dest_name.to_string()];
        self.runner.run(GIT, &args, &self.work_dir)?;
        Ok(self.work_dir.join(dest_name))
    }

    /// Fast-forward an existing checkout
    pub fn pull(&self, repo_dir: &Path) -> Result<(), ProcessError> {
        let args = vec!["pull".to_string(), "--ff-only".to_string()];
        self.runner.run(GIT, &args, repo_dir)
    }

    /// Clone `url` as `dest_name`, or update it when already checked out
    pub fn sync(&self, url: &str, dest_name: &str) -> Result<SyncAction, ProcessError> {
        let dest = self.work_dir.join(dest_name);
        if dest.join(".git").exists() {
            tracing::info!("Updating {}", dest.display());
            self.pull(&dest)?;
            Ok(SyncAction::Updated)
        } else {
            tracing::info!("Cloning {} into {}", url, dest.display());
            self.clone_repo(url, dest_name)?;
            Ok(SyncAction::Cloned)
        }
    }
}
