//! Build command implementation
//!
//! Implements `nxtool build`, `configure`, `clean`, `fullclean` and
//! `install` on top of [`BuildCmd`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::output::{is_json, print_detail, print_json, print_success, tool_runner};
use crate::core::build::{BuildCmd, BuildOutcome, BuildRequest};
use crate::core::builder::BuildSettings;
use crate::infra::dirs::WorkspacePaths;

/// Build options
pub struct BuildOptions {
    /// Project to build instead of the current one
    pub project: Option<String>,
    /// Board configuration to apply
    pub config: Option<String>,
    /// Host tool to build
    pub tool: Option<String>,
    /// Force configure
    pub reconfig: bool,
}

fn report(outcome: &BuildOutcome, verb: &str) -> Result<()> {
    if is_json() {
        return print_json(outcome);
    }
    let what = match &outcome.target {
        Some(tool) => format!("tool '{tool}' of project '{}'", outcome.project),
        None => format!("project '{}'", outcome.project),
    };
    print_success(&format!("{verb} {what} with {}", outcome.builder));
    if let Some(config) = &outcome.config {
        let note = if outcome.reconfigured { " (configured)" } else { "" };
        print_detail(&format!("config: {config}{note}"));
    }
    Ok(())
}

/// Execute the build command
pub async fn execute(
    paths: &WorkspacePaths,
    options: BuildOptions,
    settings: BuildSettings,
) -> Result<()> {
    tracing::debug!("Building with {} jobs", settings.jobs);
    let runner = tool_runner();
    let mut cmd = BuildCmd::new(paths, settings, &runner);

    let request = BuildRequest {
        project: options.project,
        config: options.config,
        tool: options.tool,
        reconfigure: options.reconfig,
    };
    let outcome = cmd.build(&request).context("Build failed")?;
    report(&outcome, "Built")
}

/// Execute the configure command
pub async fn configure(
    paths: &WorkspacePaths,
    project: Option<String>,
    config: Option<String>,
    settings: BuildSettings,
) -> Result<()> {
    let runner = tool_runner();
    let mut cmd = BuildCmd::new(paths, settings, &runner);
    let outcome = cmd
        .configure(project.as_deref(), config.as_deref())
        .context("Configure failed")?;
    report(&outcome, "Configured")
}

/// Execute the clean and fullclean commands
pub async fn clean(paths: &WorkspacePaths, project: Option<String>, full: bool) -> Result<()> {
    let runner = tool_runner();
    let cmd = BuildCmd::new(paths, BuildSettings::default(), &runner);
    let outcome = cmd
        .clean(project.as_deref(), full)
        .context("Clean failed")?;

    if is_json() {
        return print_json(&outcome);
    }
    match (full, outcome.removed) {
        (true, true) => print_success(&format!(
            "Deleted {}",
            paths.build_dir(&outcome.project).display()
        )),
        (true, false) => print_success(&format!(
            "Project '{}' has no build directory",
            outcome.project
        )),
        (false, _) => print_success(&format!("Cleaned project '{}'", outcome.project)),
    }
    Ok(())
}

/// Execute the install command
pub async fn install(
    paths: &WorkspacePaths,
    project: Option<String>,
    prefix: Option<PathBuf>,
) -> Result<()> {
    let runner = tool_runner();
    let cmd = BuildCmd::new(paths, BuildSettings::default(), &runner);
    let name = cmd
        .install(project.as_deref(), prefix.as_deref())
        .context("Install failed")?;

    if is_json() {
        return print_json(&json!({ "project": name, "prefix": prefix }));
    }
    print_success(&format!("Installed project '{name}'"));
    Ok(())
}
