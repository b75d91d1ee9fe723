//! Project state model
//!
//! A project is a named build target bound to an optional board
//! configuration. The set of projects and the current project are persisted
//! in `.nxtool/projects.toml`:
//!
//! ```toml
//! [current]
//! name = "demo"
//!
//! [[projects]]
//! name = "demo"
//! config = "esp32:nsh"
//!
//! [projects.opts]
//! generator = "Unix Makefiles"
//!
//! [[projects]]
//! name = "make"
//! ```
//!
//! Every mutation is staged on a copy of the state, written to disk, and only
//! then swapped in, so a failed mutation leaves both the file and the
//! in-memory store as they were.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::MAKE_PROJECT;
use crate::core::board::BoardConfig;
use crate::error::{ProjectError, StoreError};
use crate::infra::filesystem;

/// Option keys accepted by [`ProjectOpts::set`]
pub const PROJECT_OPTION_KEYS: &[&str] = &["generator", "compiler"];

/// Build tool overrides for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOpts {
    /// CMake generator (default: Ninja)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// C compiler passed to CMake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,
}

impl ProjectOpts {
    /// No overrides set
    pub fn is_empty(&self) -> bool {
        self.generator.is_none() && self.compiler.is_none()
    }

    /// Set an option by key; an empty value clears it
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ProjectError> {
        let value = (!value.is_empty()).then(|| value.to_string());
        match key {
            "generator" => self.generator = value,
            "compiler" => self.compiler = value,
            _ => {
                return Err(ProjectError::UnknownOption {
                    key: key.to_string(),
                    expected: PROJECT_OPTION_KEYS.iter().map(ToString::to_string).collect(),
                })
            }
        }
        Ok(())
    }
}

/// One named build target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInstance {
    pub name: String,

    /// `<board>:<defconfig>`, absent until the project is given one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    #[serde(default, skip_serializing_if = "ProjectOpts::is_empty")]
    pub opts: ProjectOpts,
}

impl ProjectInstance {
    /// Create a project without options
    pub fn new(name: impl Into<String>, config: Option<String>) -> Self {
        Self {
            name: name.into(),
            config,
            opts: ProjectOpts::default(),
        }
    }

    /// Whether this is the reserved project driving the Make flow
    pub fn is_builtin(&self) -> bool {
        self.name == MAKE_PROJECT
    }
}

/// Check that `name` can identify a project and its build directory
pub fn validate_name(name: &str) -> Result<(), ProjectError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name.chars().any(char::is_whitespace) {
        Some("name must not contain whitespace")
    } else if name.starts_with('.') {
        Some("name must not start with '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ProjectError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// On-disk layout of `projects.toml`
#[derive(Debug, Serialize, Deserialize)]
struct ProjectsFile {
    #[serde(default)]
    current: CurrentEntry,
    #[serde(default)]
    projects: Vec<ProjectInstance>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CurrentEntry {
    name: String,
}

/// Name-keyed projects plus the current project name
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectState {
    current: String,
    projects: BTreeMap<String, ProjectInstance>,
}

impl Default for ProjectState {
    fn default() -> Self {
        let builtin = ProjectInstance::new(MAKE_PROJECT, None);
        Self {
            current: MAKE_PROJECT.to_string(),
            projects: BTreeMap::from([(MAKE_PROJECT.to_string(), builtin)]),
        }
    }
}

impl ProjectState {
    /// Rebuild state from a parsed file, repairing what the invariants need
    fn from_file(file: ProjectsFile) -> Self {
        let mut projects = BTreeMap::new();
        for mut project in file.projects {
            if let Err(e) = validate_name(&project.name) {
                tracing::warn!("Ignoring project entry: {e}");
                continue;
            }
            if project.config.as_deref().is_some_and(str::is_empty) {
                project.config = None;
            }
            if projects.contains_key(&project.name) {
                tracing::warn!("Ignoring duplicate project entry '{}'", project.name);
                continue;
            }
            projects.insert(project.name.clone(), project);
        }

        projects
            .entry(MAKE_PROJECT.to_string())
            .or_insert_with(|| ProjectInstance::new(MAKE_PROJECT, None));

        let current = if projects.contains_key(&file.current.name) {
            file.current.name
        } else {
            if !file.current.name.is_empty() {
                tracing::warn!(
                    "Current project '{}' is not defined, falling back to '{}'",
                    file.current.name,
                    MAKE_PROJECT
                );
            }
            MAKE_PROJECT.to_string()
        };

        Self { current, projects }
    }

    fn to_file(&self) -> ProjectsFile {
        ProjectsFile {
            current: CurrentEntry {
                name: self.current.clone(),
            },
            projects: self.projects.values().cloned().collect(),
        }
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut ProjectInstance, ProjectError> {
        self.projects
            .get_mut(name)
            .ok_or_else(|| ProjectError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Persisted set of projects
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
    state: ProjectState,
}

impl ProjectStore {
    /// Store at `path` holding only the built-in project, not yet written
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: ProjectState::default(),
        }
    }

    /// Load the store, falling back to the built-in default
    ///
    /// A missing or malformed file is reported as a warning, never as an error.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!("{} not found, using defaults", path.display());
            return Self::new(path);
        }
        match Self::try_load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::new(path)
            }
        }
    }

    /// Load the store, reporting any failure
    pub fn try_load(path: &Path) -> Result<Self, StoreError> {
        let content = filesystem::read_file(path)?;
        let file: ProjectsFile = toml::from_str(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            state: ProjectState::from_file(file),
        })
    }

    /// Render the store as TOML
    pub fn to_toml(&self) -> Result<String, StoreError> {
        Self::render(&self.path, &self.state)
    }

    fn render(path: &Path, state: &ProjectState) -> Result<String, StoreError> {
        toml::to_string_pretty(&state.to_file()).map_err(|e| StoreError::Serialize {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Write the whole store atomically
    pub fn save(&self) -> Result<(), StoreError> {
        Self::write(&self.path, &self.state)
    }

    fn write(path: &Path, state: &ProjectState) -> Result<(), StoreError> {
        let content = Self::render(path, state)?;
        filesystem::write_file_atomic(path, &content)?;
        Ok(())
    }

    /// Apply `change` to a copy of the state, persist it, then adopt it
    fn transaction<T, F>(&mut self, change: F) -> Result<T, ProjectError>
    where
        F: FnOnce(&mut ProjectState) -> Result<T, ProjectError>,
    {
        let mut staged = self.state.clone();
        let value = change(&mut staged)?;
        Self::write(&self.path, &staged)?;
        self.state = staged;
        Ok(value)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The active project
    pub fn current(&self) -> &ProjectInstance {
        // The state invariant keeps current inside projects
        &self.state.projects[&self.state.current]
    }

    /// Name of the active project
    pub fn current_name(&self) -> &str {
        &self.state.current
    }

    /// All projects in name order
    pub fn projects(&self) -> impl Iterator<Item = &ProjectInstance> {
        self.state.projects.values()
    }

    /// Number of projects, including the built-in one
    pub fn len(&self) -> usize {
        self.state.projects.len()
    }

    /// Always false: the built-in project cannot be removed
    pub fn is_empty(&self) -> bool {
        self.state.projects.is_empty()
    }

    /// Look a project up by name
    pub fn search(&self, name: &str) -> Option<&ProjectInstance> {
        self.state.projects.get(name)
    }

    /// Add a project and persist
    pub fn add(&mut self, name: &str, config: Option<&BoardConfig>) -> Result<(), ProjectError> {
        validate_name(name)?;
        if self.search(name).is_some() {
            return Err(ProjectError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let project = ProjectInstance::new(name, config.map(ToString::to_string));
        self.transaction(|state| {
            state.projects.insert(project.name.clone(), project);
            Ok(())
        })?;
        tracing::info!("Added project '{}'", name);
        Ok(())
    }

    /// Remove a project and persist
    ///
    /// The built-in project and the current project cannot be removed.
    pub fn remove(&mut self, name: &str) -> Result<ProjectInstance, ProjectError> {
        if self.search(name).is_none() {
            return Err(ProjectError::NotFound {
                name: name.to_string(),
            });
        }
        if name == MAKE_PROJECT {
            return Err(ProjectError::Reserved {
                name: name.to_string(),
            });
        }
        if name == self.state.current {
            return Err(ProjectError::Active {
                name: name.to_string(),
            });
        }

        let removed = self.transaction(|state| {
            state.projects.remove(name).ok_or_else(|| ProjectError::NotFound {
                name: name.to_string(),
            })
        })?;
        tracing::info!("Removed project '{}'", name);
        Ok(removed)
    }

    /// Make `name` the current project and persist
    pub fn set_current(&mut self, name: &str) -> Result<(), ProjectError> {
        self.transaction(|state| {
            state.get_mut(name)?;
            state.current = name.to_string();
            Ok(())
        })?;
        tracing::info!("Current project is now '{}'", name);
        Ok(())
    }

    /// Set one of a project's build options and persist
    pub fn set_option(&mut self, name: &str, key: &str, value: &str) -> Result<(), ProjectError> {
        self.transaction(|state| state.get_mut(name)?.opts.set(key, value))
    }

    /// Record a successful configure or build: store the applied
    /// configuration, if any, and make the project current in one write
    pub fn record_build(&mut self, name: &str, config: Option<&str>) -> Result<(), ProjectError> {
        self.transaction(|state| {
            let project = state.get_mut(name)?;
            if let Some(config) = config {
                project.config = Some(config.to_string());
            }
            state.current = name.to_string();
            Ok(())
        })
    }
}
