//! CLI implementation for `nxtool info`

use anyhow::Result;

use crate::cli::commands::InfoCommands;
use crate::cli::output::{is_json, print_detail, print_info, print_json, status};
use crate::core::board::BoardsStore;
use crate::core::info::{project_info, projects_info, ProjectSummary};
use crate::core::project::ProjectStore;
use crate::core::tools::ToolsStore;
use crate::infra::dirs::WorkspacePaths;

/// Execute an info subcommand
pub async fn execute(paths: &WorkspacePaths, cmd: InfoCommands) -> Result<()> {
    match cmd {
        InfoCommands::Boards => boards(paths),
        InfoCommands::Projects => projects(paths),
        InfoCommands::Project { name } => project(paths, name.as_deref()),
        InfoCommands::Tools => tools(paths),
    }
}

fn boards(paths: &WorkspacePaths) -> Result<()> {
    let store = BoardsStore::scan(&paths.nuttx_dir());
    if is_json() {
        return print_json(&store);
    }
    if store.is_empty() {
        print_info("No boards found. Run 'nxtool workspace update' to clone the sources");
        return Ok(());
    }
    for (board, defconfigs) in store.boards() {
        println!("{board}: {}", defconfigs.join(" "));
    }
    Ok(())
}

/// Print the project list, marking the current project
pub fn projects(paths: &WorkspacePaths) -> Result<()> {
    let store = ProjectStore::load(&paths.projects_file());
    let info = projects_info(paths, &store);
    if is_json() {
        return print_json(&info);
    }
    for summary in &info.projects {
        let marker = if summary.current { status::SUCCESS } else { " " };
        println!(
            "{marker} {:<20} {:<24} {}",
            summary.name,
            summary.config.as_deref().unwrap_or("-"),
            summary.builder
        );
    }
    Ok(())
}

fn project(paths: &WorkspacePaths, name: Option<&str>) -> Result<()> {
    let store = ProjectStore::load(&paths.projects_file());
    let summary = project_info(paths, &store, name)?;
    if is_json() {
        return print_json(&summary);
    }
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ProjectSummary) {
    let current = if summary.current { " (current)" } else { "" };
    println!("{}{current}", summary.name);
    print_detail(&format!(
        "config:     {}",
        summary.config.as_deref().unwrap_or("not set")
    ));
    print_detail(&format!("builder:    {}", summary.builder));
    print_detail(&format!("build dir:  {}", summary.build_dir.display()));
    print_detail(&format!("configured: {}", summary.configured));
    if let Some(generator) = &summary.opts.generator {
        print_detail(&format!("generator:  {generator}"));
    }
    if let Some(compiler) = &summary.opts.compiler {
        print_detail(&format!("compiler:   {compiler}"));
    }
}

fn tools(paths: &WorkspacePaths) -> Result<()> {
    let store = ToolsStore::scan(&paths.nuttx_dir());
    if is_json() {
        return print_json(&store);
    }
    for tool in store.tools() {
        println!("{tool}");
    }
    Ok(())
}
