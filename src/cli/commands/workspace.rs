//! CLI implementation for `nxtool workspace`
//!
//! `init` creates the workspace state; `update` clones or fast-forwards the
//! configured source repositories.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::output::{is_json, print_detail, print_info, print_json, print_success, tool_runner};
use crate::core::config::ConfigStore;
use crate::core::init::init_workspace;
use crate::core::update::update_sources;
use crate::infra::dirs::WorkspacePaths;
use crate::infra::git::GitOperations;

/// Execute `workspace init`
pub async fn init(dir: &Path, clone: bool) -> Result<()> {
    let paths = init_workspace(dir)
        .with_context(|| format!("Failed to initialize workspace in {}", dir.display()))?;

    if is_json() && !clone {
        return print_json(&json!({ "root": paths.root() }));
    }
    print_success(&format!("Initialized workspace in {}", paths.root().display()));

    if clone {
        update(&paths).await?;
    } else {
        print_detail("Run 'nxtool workspace update' to clone the NuttX sources");
    }
    Ok(())
}

/// Execute `workspace update`
pub async fn update(paths: &WorkspacePaths) -> Result<()> {
    GitOperations::ensure_available()?;

    let config = ConfigStore::load(&paths.config_file());
    let runner = tool_runner();
    let synced = update_sources(paths, &config, &runner).context("Failed to update sources")?;

    if is_json() {
        return print_json(&synced);
    }
    if synced.is_empty() {
        print_info("No remotes configured in config.toml");
    }
    for remote in &synced {
        let verb = if remote.cloned { "Cloned" } else { "Updated" };
        print_success(&format!("{verb} {} from {}", remote.name, remote.url));
    }
    Ok(())
}
