//! CLI implementation for `nxtool project`

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::commands::{info, BuildArgs, ProjectCommands};
use crate::cli::output::{
    is_json, print_detail, print_json, print_success, print_warning, tool_runner,
};
use crate::core::add::{add_project, AddOptions};
use crate::core::builder::BuildSettings;
use crate::core::project::ProjectStore;
use crate::core::remove::{remove_project, RemoveOptions};
use crate::infra::dirs::WorkspacePaths;

/// Execute a project subcommand
pub async fn execute(paths: &WorkspacePaths, cmd: ProjectCommands) -> Result<()> {
    match cmd {
        ProjectCommands::List => info::projects(paths),
        ProjectCommands::Add {
            name,
            config,
            switch,
            init,
            build_args,
        } => {
            let options = AddOptions {
                name,
                config,
                switch,
                init,
            };
            add(paths, &options, &build_args)
        }
        ProjectCommands::Rm { name, purge } => remove(paths, &RemoveOptions { name, purge }),
        ProjectCommands::Switch { name } => switch(paths, &name),
        ProjectCommands::Set {
            key,
            value,
            project,
        } => set(paths, project.as_deref(), &key, &value),
    }
}

fn add(paths: &WorkspacePaths, options: &AddOptions, build_args: &BuildArgs) -> Result<()> {
    let mut store = ProjectStore::load(&paths.projects_file());
    let runner = tool_runner();
    let result = add_project(paths, &mut store, options, &build_args.settings(), &runner)
        .with_context(|| format!("Failed to add project '{}'", options.name))?;

    if is_json() {
        return print_json(&json!({
            "name": result.name,
            "config": result.config,
            "current": result.switched,
            "configured": result.configured,
        }));
    }

    match &result.config {
        Some(config) => print_success(&format!("Added project '{}' ({config})", result.name)),
        None => print_success(&format!("Added project '{}'", result.name)),
    }
    if result.switched {
        print_detail(&format!("'{}' is now the current project", result.name));
    }
    if result.configured {
        print_detail("Configured");
    }
    Ok(())
}

fn remove(paths: &WorkspacePaths, options: &RemoveOptions) -> Result<()> {
    let mut store = ProjectStore::load(&paths.projects_file());
    let runner = tool_runner();
    let settings = BuildSettings::default();
    let result = remove_project(paths, &mut store, options, &settings, &runner)
        .with_context(|| format!("Failed to remove project '{}'", options.name))?;

    if is_json() {
        return print_json(&json!({
            "name": result.name,
            "cleaned": result.cleaned,
            "purged": result.purged,
        }));
    }

    print_success(&format!("Removed project '{}'", result.name));
    if result.purged {
        print_detail(&format!("Deleted {}", paths.build_dir(&result.name).display()));
    } else if paths.build_dir(&result.name).exists() {
        if !result.cleaned {
            print_warning("Build directory was not cleaned");
        }
        print_detail(&format!(
            "{} was kept; use --purge to delete it",
            paths.build_dir(&result.name).display()
        ));
    }
    Ok(())
}

fn switch(paths: &WorkspacePaths, name: &str) -> Result<()> {
    let mut store = ProjectStore::load(&paths.projects_file());
    store
        .set_current(name)
        .with_context(|| format!("Failed to switch to project '{name}'"))?;

    if is_json() {
        return print_json(&json!({ "current": name }));
    }
    print_success(&format!("Switched to project '{name}'"));
    Ok(())
}

fn set(paths: &WorkspacePaths, project: Option<&str>, key: &str, value: &str) -> Result<()> {
    let mut store = ProjectStore::load(&paths.projects_file());
    let name = project.unwrap_or(store.current_name()).to_string();
    store
        .set_option(&name, key, value)
        .with_context(|| format!("Failed to set '{key}' for project '{name}'"))?;

    if is_json() {
        return print_json(&json!({ "project": name, "key": key, "value": value }));
    }
    if value.is_empty() {
        print_success(&format!("Unset {key} for project '{name}'"));
    } else {
        print_success(&format!("Set {key} = {value} for project '{name}'"));
    }
    print_detail("Takes effect on the next configure (nxtool build --reconfig)");
    Ok(())
}
