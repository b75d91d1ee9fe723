//! Project listing
//!
//! Read-only views of the project store, with the build state of each project
//! looked up from its back-end.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::builder::{select_builder, BuildSettings};
use crate::core::project::{ProjectInstance, ProjectOpts, ProjectStore};
use crate::error::ProjectError;
use crate::infra::dirs::WorkspacePaths;
use crate::infra::process::SystemRunner;

/// One project as shown by `info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub config: Option<String>,
    pub current: bool,
    /// `cmake` or `make`
    pub builder: &'static str,
    /// Directory the back-end builds into or deletes on fullclean
    pub build_dir: PathBuf,
    pub configured: bool,
    #[serde(skip_serializing_if = "ProjectOpts::is_empty")]
    pub opts: ProjectOpts,
}

/// All projects plus the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsInfo {
    pub current: String,
    pub projects: Vec<ProjectSummary>,
}

fn summarize(paths: &WorkspacePaths, store: &ProjectStore, project: &ProjectInstance) -> ProjectSummary {
    // Only queried, nothing is run
    let runner = SystemRunner::new();
    let builder = select_builder(paths, project, &BuildSettings::default(), &runner);
    ProjectSummary {
        name: project.name.clone(),
        config: project.config.clone(),
        current: project.name == store.current_name(),
        builder: builder.name(),
        build_dir: builder.dest().to_path_buf(),
        configured: builder.is_configured(),
        opts: project.opts.clone(),
    }
}

/// Summarize every project in name order
pub fn projects_info(paths: &WorkspacePaths, store: &ProjectStore) -> ProjectsInfo {
    ProjectsInfo {
        current: store.current_name().to_string(),
        projects: store
            .projects()
            .map(|p| summarize(paths, store, p))
            .collect(),
    }
}

/// Summarize one project, the current one by default
pub fn project_info(
    paths: &WorkspacePaths,
    store: &ProjectStore,
    name: Option<&str>,
) -> Result<ProjectSummary, ProjectError> {
    let project = match name {
        Some(name) => store.search(name).ok_or_else(|| ProjectError::NotFound {
            name: name.to_string(),
        })?,
        None => store.current(),
    };
    Ok(summarize(paths, store, project))
}
