//! CLI command implementations
//!
//! Each command group is implemented in its own submodule.

pub mod build;
pub mod info;
pub mod project;
pub mod workspace;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::defaults::DEFAULT_BUILD_TYPE;
use crate::core::builder::BuildSettings;
use crate::infra::dirs::WorkspacePaths;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the workspace or fetch its sources
    #[command(subcommand)]
    Workspace(WorkspaceCommands),

    /// Show boards, projects and tools
    #[command(subcommand)]
    Info(InfoCommands),

    /// Add, remove and switch projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Build a project, configuring it first when needed
    Build {
        /// Project to build (default: current project)
        #[arg(short, long)]
        project: Option<String>,

        /// Board configuration to apply, as <board>:<defconfig>
        #[arg(short, long)]
        config: Option<String>,

        /// Build only this host tool
        #[arg(short, long)]
        tool: Option<String>,

        /// Run configure even when nothing changed
        #[arg(short, long)]
        reconfig: bool,

        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Configure a project without building it
    Configure {
        /// Board configuration to apply (default: stored configuration)
        config: Option<String>,

        /// Project to configure (default: current project)
        #[arg(short, long)]
        project: Option<String>,

        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Remove build outputs
    Clean {
        /// Project to clean (default: current project)
        #[arg(short, long)]
        project: Option<String>,

        /// Delete the whole build directory
        #[arg(long)]
        full: bool,
    },

    /// Delete a project's build directory
    Fullclean {
        /// Project to clean (default: current project)
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Install (CMake) or export (Make) build results
    Install {
        /// Project to install (default: current project)
        #[arg(short, long)]
        project: Option<String>,

        /// Installation prefix (CMake only)
        #[arg(long)]
        prefix: Option<std::path::PathBuf>,
    },
}

/// Workspace subcommands
#[derive(Subcommand, Debug)]
pub enum WorkspaceCommands {
    /// Initialize a workspace in the current directory
    Init {
        /// Clone the NuttX sources right away
        #[arg(long)]
        clone: bool,
    },

    /// Clone missing sources and fast-forward existing ones
    Update,
}

/// Info subcommands
#[derive(Subcommand, Debug)]
pub enum InfoCommands {
    /// List boards and their configurations
    Boards,

    /// List projects
    Projects,

    /// Show one project
    Project {
        /// Project name (default: current project)
        name: Option<String>,
    },

    /// List buildable host tools
    Tools,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    #[command(alias = "ls")]
    List,

    /// Add a project
    Add {
        /// Project name
        name: String,

        /// Board configuration, as <board>:<defconfig>
        config: Option<String>,

        /// Make the new project current
        #[arg(long)]
        switch: bool,

        /// Configure the new project right away
        #[arg(long)]
        init: bool,

        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Remove a project
    #[command(alias = "remove")]
    Rm {
        /// Project name
        name: String,

        /// Also delete the build directory
        #[arg(long)]
        purge: bool,
    },

    /// Make a project current
    Switch {
        /// Project name
        name: String,
    },

    /// Set a project option (generator, compiler)
    Set {
        /// Option name
        key: String,

        /// Option value; empty to unset
        value: String,

        /// Project to change (default: current project)
        #[arg(short, long)]
        project: Option<String>,
    },
}

/// Build tool settings shared by build-type commands
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Number of parallel jobs (default: CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// CMake build type
    #[arg(long, default_value = DEFAULT_BUILD_TYPE)]
    pub build_type: String,
}

impl BuildArgs {
    /// Settings for the back-end
    pub fn settings(&self) -> BuildSettings {
        let defaults = BuildSettings::default();
        BuildSettings {
            build_type: self.build_type.clone(),
            jobs: self.jobs.unwrap_or(defaults.jobs),
        }
    }
}

impl Commands {
    /// Execute the command, looking for the workspace from `start`
    pub async fn run(self, start: &Path) -> Result<()> {
        if let Commands::Workspace(WorkspaceCommands::Init { clone }) = self {
            return workspace::init(start, clone).await;
        }

        let paths = WorkspacePaths::discover(start)?;
        match self {
            Commands::Workspace(WorkspaceCommands::Init { .. }) => Ok(()),
            Commands::Workspace(WorkspaceCommands::Update) => workspace::update(&paths).await,
            Commands::Info(cmd) => info::execute(&paths, cmd).await,
            Commands::Project(cmd) => project::execute(&paths, cmd).await,
            Commands::Build {
                project,
                config,
                tool,
                reconfig,
                build_args,
            } => {
                let options = build::BuildOptions {
                    project,
                    config,
                    tool,
                    reconfig,
                };
                build::execute(&paths, options, build_args.settings()).await
            }
            Commands::Configure {
                config,
                project,
                build_args,
            } => build::configure(&paths, project, config, build_args.settings()).await,
            Commands::Clean { project, full } => build::clean(&paths, project, full).await,
            Commands::Fullclean { project } => build::clean(&paths, project, true).await,
            Commands::Install { project, prefix } => {
                build::install(&paths, project, prefix).await
            }
        }
    }
}
