//! Project creation logic
//!
//! Adds a project to the store after checking its name and board
//! configuration, and optionally activates and configures it.

use crate::core::board::{BoardConfig, BoardsStore};
use crate::core::builder::{select_builder, BuildSettings};
use crate::core::project::{validate_name, ProjectStore};
use crate::error::{NxtoolError, ProjectError};
use crate::infra::dirs::WorkspacePaths;
use crate::infra::process::CommandRunner;

/// Options for adding a project
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Project name
    pub name: String,
    /// Board configuration; empty means none
    pub config: Option<String>,
    /// Make the new project current
    pub switch: bool,
    /// Run configure right away
    pub init: bool,
}

/// Result of adding a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddResult {
    pub name: String,
    /// Canonical `<board>:<defconfig>`
    pub config: Option<String>,
    pub switched: bool,
    pub configured: bool,
}

/// Add a project to `store`
///
/// The project is persisted before `--switch` and `--init` are applied, so a
/// failing configure leaves it registered.
pub fn add_project(
    paths: &WorkspacePaths,
    store: &mut ProjectStore,
    options: &AddOptions,
    settings: &BuildSettings,
    runner: &dyn CommandRunner,
) -> Result<AddResult, NxtoolError> {
    let name = options.name.as_str();
    validate_name(name)?;
    if store.search(name).is_some() {
        return Err(ProjectError::AlreadyExists {
            name: name.to_string(),
        }
        .into());
    }

    let config: Option<BoardConfig> = match options.config.as_deref() {
        Some(config) if !config.is_empty() => {
            Some(BoardsStore::scan(&paths.nuttx_dir()).validate(config)?)
        }
        _ => None,
    };

    store.add(name, config.as_ref())?;

    if options.switch {
        store.set_current(name)?;
    }

    let configured = if options.init {
        let config = config.as_ref().ok_or_else(|| ProjectError::NotConfigured {
            name: name.to_string(),
        })?;
        let project = store.search(name).ok_or_else(|| ProjectError::NotFound {
            name: name.to_string(),
        })?;
        select_builder(paths, project, settings, runner).configure(config)?;
        true
    } else {
        false
    };

    Ok(AddResult {
        name: name.to_string(),
        config: config.map(|c| c.to_string()),
        switched: options.switch,
        configured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::test_utils::{fixtures, RecordingRunner};

    fn settings() -> BuildSettings {
        BuildSettings {
            build_type: "Debug".to_string(),
            jobs: 1,
        }
    }

    fn options(name: &str, config: Option<&str>) -> AddOptions {
        AddOptions {
            name: name.to_string(),
            config: config.map(ToString::to_string),
            ..AddOptions::default()
        }
    }

    #[test]
    fn test_add_unknown_board_leaves_store_unchanged() {
        let (_temp, paths) = fixtures::workspace();
        let mut store = ProjectStore::load(&paths.projects_file());
        let runner = RecordingRunner::new();

        let err = add_project(
            &paths,
            &mut store,
            &options("demo2", Some("unknownboard:nsh")),
            &settings(),
            &runner,
        )
        .unwrap_err();

        assert!(matches!(err, NxtoolError::Board(BoardError::UnknownBoard { .. })));
        assert_eq!(store.len(), 1);
        assert!(!paths.projects_file().exists());
    }

    #[test]
    fn test_add_valid_config_is_searchable() {
        let (_temp, paths) = fixtures::workspace();
        let mut store = ProjectStore::load(&paths.projects_file());
        let runner = RecordingRunner::new();

        let result = add_project(
            &paths,
            &mut store,
            &options("demo2", Some("esp32/nsh")),
            &settings(),
            &runner,
        )
        .unwrap();

        assert_eq!(result.config.as_deref(), Some("esp32:nsh"));
        let stored = ProjectStore::try_load(&paths.projects_file()).unwrap();
        assert_eq!(
            stored.search("demo2").unwrap().config.as_deref(),
            Some("esp32:nsh")
        );
        assert_eq!(stored.current_name(), "make");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_add_empty_config_means_none() {
        let (_temp, paths) = fixtures::workspace();
        let mut store = ProjectStore::load(&paths.projects_file());
        let runner = RecordingRunner::new();

        let result =
            add_project(&paths, &mut store, &options("blank", Some("")), &settings(), &runner)
                .unwrap();

        assert_eq!(result.config, None);
        assert_eq!(store.search("blank").unwrap().config, None);
    }

    #[test]
    fn test_add_existing_name_fails() {
        let (_temp, paths) = fixtures::workspace();
        let mut store = ProjectStore::load(&paths.projects_file());
        let runner = RecordingRunner::new();

        let err = add_project(&paths, &mut store, &options("make", None), &settings(), &runner)
            .unwrap_err();

        assert!(matches!(
            err,
            NxtoolError::Project(ProjectError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_add_with_switch_and_init() {
        let (_temp, paths) = fixtures::workspace();
        let mut store = ProjectStore::load(&paths.projects_file());
        let runner = RecordingRunner::new();
        let opts = AddOptions {
            switch: true,
            init: true,
            ..options("demo", Some("sim:nsh"))
        };

        let result = add_project(&paths, &mut store, &opts, &settings(), &runner).unwrap();

        assert!(result.switched && result.configured);
        assert_eq!(store.current_name(), "demo");
        assert_eq!(runner.configure_count(), 1);
        assert!(paths.build_dir("demo").join("CMakeCache.txt").is_file());
    }

    #[test]
    fn test_init_without_config_fails_after_adding() {
        let (_temp, paths) = fixtures::workspace();
        let mut store = ProjectStore::load(&paths.projects_file());
        let runner = RecordingRunner::new();
        let opts = AddOptions {
            init: true,
            ..options("bare", None)
        };

        let err = add_project(&paths, &mut store, &opts, &settings(), &runner).unwrap_err();

        assert!(matches!(
            err,
            NxtoolError::Project(ProjectError::NotConfigured { .. })
        ));
        assert!(store.search("bare").is_some());
        assert!(runner.calls().is_empty());
    }
}
