//! Build orchestration
//!
//! Resolves which project and board configuration a build applies to, decides
//! whether the back-end has to be (re)configured first, runs it, and records
//! the result in the project store.

use std::path::Path;

use serde::Serialize;

use crate::core::board::{BoardConfig, BoardsStore};
use crate::core::builder::{select_builder, BuildSettings, Builder};
use crate::core::project::{ProjectInstance, ProjectStore};
use crate::core::tools::ToolsStore;
use crate::error::{BoardError, BuildError, NxtoolError, ProjectError};
use crate::infra::dirs::WorkspacePaths;
use crate::infra::process::CommandRunner;

/// What to build
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Project to build instead of the current one
    pub project: Option<String>,
    /// Board configuration to apply instead of the stored one
    pub config: Option<String>,
    /// Host tool target to build instead of the whole tree
    pub tool: Option<String>,
    /// Run configure even when nothing changed
    pub reconfigure: bool,
}

/// Result of a configure and/or build run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    pub project: String,
    pub config: Option<String>,
    pub builder: &'static str,
    pub reconfigured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Result of a clean run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanOutcome {
    pub project: String,
    pub full: bool,
    /// Whether fullclean deleted anything
    pub removed: bool,
}

/// Whether a project must be configured before building
///
/// True when the back-end has never been configured or when `resolved`
/// differs from the stored configuration. Stored values are compared in
/// canonical form, so `esp32/nsh` and `esp32:nsh` are the same.
pub fn needs_reconfigure(stored: Option<&str>, resolved: &BoardConfig, configured: bool) -> bool {
    let stored = stored.and_then(|s| BoardConfig::parse(s).ok());
    !configured || stored.as_ref() != Some(resolved)
}

/// Configure/build/clean against the project store
pub struct BuildCmd<'a> {
    paths: &'a WorkspacePaths,
    store: ProjectStore,
    settings: BuildSettings,
    runner: &'a dyn CommandRunner,
}

impl<'a> BuildCmd<'a> {
    /// Load the workspace project store
    pub fn new(
        paths: &'a WorkspacePaths,
        settings: BuildSettings,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        let store = ProjectStore::load(&paths.projects_file());
        Self::with_store(paths, store, settings, runner)
    }

    /// Use an already loaded store
    pub fn with_store(
        paths: &'a WorkspacePaths,
        store: ProjectStore,
        settings: BuildSettings,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            paths,
            store,
            settings,
            runner,
        }
    }

    /// The project store as updated by previous operations
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Explicit project if given (it must exist), else the current one
    fn resolve_project(&self, name: Option<&str>) -> Result<ProjectInstance, ProjectError> {
        match name {
            Some(name) => self
                .store
                .search(name)
                .cloned()
                .ok_or_else(|| ProjectError::NotFound {
                    name: name.to_string(),
                }),
            None => Ok(self.store.current().clone()),
        }
    }

    /// Explicit configuration if given (it must be in the board tree), else
    /// the stored one
    fn resolve_config(
        &self,
        project: &ProjectInstance,
        explicit: Option<&str>,
    ) -> Result<Option<BoardConfig>, BoardError> {
        match explicit {
            Some(config) => BoardsStore::scan(&self.paths.nuttx_dir())
                .validate(config)
                .map(Some),
            None => project.config.as_deref().map(BoardConfig::parse).transpose(),
        }
    }

    fn builder(&self, project: &ProjectInstance) -> Box<dyn Builder + 'a> {
        select_builder(self.paths, project, &self.settings, self.runner)
    }

    /// Store the applied configuration and make the project current
    ///
    /// Skips the write when neither would change.
    fn commit(
        &mut self,
        project: &ProjectInstance,
        config: Option<&BoardConfig>,
    ) -> Result<(), ProjectError> {
        let config = config.map(ToString::to_string);
        let config_changed = config.is_some() && config != project.config;
        if config_changed || self.store.current_name() != project.name {
            self.store.record_build(&project.name, config.as_deref())?;
        }
        Ok(())
    }

    /// Build a project, configuring it first when required
    ///
    /// On success the applied configuration is stored and the project becomes
    /// the current one, in a single write. Nothing is persisted when configure
    /// or build fails.
    pub fn build(&mut self, request: &BuildRequest) -> Result<BuildOutcome, NxtoolError> {
        let project = self.resolve_project(request.project.as_deref())?;
        let config = self.resolve_config(&project, request.config.as_deref())?;

        if let Some(tool) = &request.tool {
            let tools = ToolsStore::scan(&self.paths.nuttx_dir());
            if !tools.contains(tool) {
                return Err(BuildError::UnknownTool { tool: tool.clone() }.into());
            }
        }

        let builder = self.builder(&project);
        let reconfigured = match &config {
            Some(cfg)
                if request.reconfigure
                    || needs_reconfigure(project.config.as_deref(), cfg, builder.is_configured()) =>
            {
                builder.configure(cfg)?;
                true
            }
            Some(_) => false,
            None if builder.is_configured() && !request.reconfigure => false,
            None => {
                return Err(ProjectError::NotConfigured {
                    name: project.name.clone(),
                }
                .into())
            }
        };

        tracing::info!(
            "Building project '{}' with {}{}",
            project.name,
            builder.name(),
            if reconfigured { " after configure" } else { "" }
        );
        builder.build(request.tool.as_deref())?;
        self.commit(&project, config.as_ref())?;

        Ok(BuildOutcome {
            project: project.name,
            config: config.map(|c| c.to_string()),
            builder: builder.name(),
            reconfigured,
            target: request.tool.clone(),
        })
    }

    /// Configure a project without building it
    pub fn configure(
        &mut self,
        project: Option<&str>,
        config: Option<&str>,
    ) -> Result<BuildOutcome, NxtoolError> {
        let project = self.resolve_project(project)?;
        let config = self
            .resolve_config(&project, config)?
            .ok_or_else(|| ProjectError::NotConfigured {
                name: project.name.clone(),
            })?;

        let builder = self.builder(&project);
        builder.configure(&config)?;
        self.commit(&project, Some(&config))?;

        Ok(BuildOutcome {
            project: project.name,
            config: Some(config.to_string()),
            builder: builder.name(),
            reconfigured: true,
            target: None,
        })
    }

    /// Clean a project's build outputs, or delete its build directory
    pub fn clean(&self, project: Option<&str>, full: bool) -> Result<CleanOutcome, NxtoolError> {
        let project = self.resolve_project(project)?;
        let builder = self.builder(&project);

        let removed = if full {
            builder.fullclean()?
        } else {
            builder.clean()?;
            false
        };

        Ok(CleanOutcome {
            project: project.name,
            full,
            removed,
        })
    }

    /// Install (CMake) or export (Make) a project's build results
    pub fn install(&self, project: Option<&str>, prefix: Option<&Path>) -> Result<String, NxtoolError> {
        let project = self.resolve_project(project)?;
        let builder = self.builder(&project);
        if !builder.is_configured() {
            return Err(ProjectError::NotConfigured { name: project.name }.into());
        }
        builder.install(prefix)?;
        Ok(project.name)
    }
}
