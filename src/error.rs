//! Error types for nxtool
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Board configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Config string does not split into exactly `<board>:<defconfig>`
    #[error("Configuration '{config}' is not formatted as <board>:<defconfig> or <board>/<defconfig>")]
    InvalidFormat { config: String },

    /// Board not present in the source tree
    #[error("Board '{board}' not found in the NuttX source tree")]
    UnknownBoard { board: String },

    /// Board exists but has no such defconfig
    #[error("Board '{board}' has no configuration '{defconfig}'")]
    UnknownDefconfig { board: String, defconfig: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Persisted state (config.toml / projects.toml) errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// File exists but is not valid TOML for this store
    #[error("Failed to parse '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// In-memory state could not be rendered as TOML
    #[error("Failed to serialize '{path}': {error}")]
    Serialize { path: PathBuf, error: String },

    /// Underlying read/write failure
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Project management errors
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Project name not in the store
    #[error("Project '{name}' not found")]
    NotFound { name: String },

    /// Project name already taken
    #[error("Project '{name}' already exists")]
    AlreadyExists { name: String },

    /// Name cannot be used as a project identifier
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The built-in make project cannot be removed
    #[error("Project '{name}' is built in and cannot be removed")]
    Reserved { name: String },

    /// The active project cannot be removed
    #[error("Project '{name}' is the current project. Switch to another project first")]
    Active { name: String },

    /// Unrecognised project option key
    #[error("Unknown project option '{key}' (expected one of: {})", .expected.join(", "))]
    UnknownOption { key: String, expected: Vec<String> },

    /// Project has no configuration to apply
    #[error("Project '{name}' has no board configuration. Pass one with --config")]
    NotConfigured { name: String },

    /// Invalid board configuration
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Saving the store failed
    #[error("Failed to save projects: {0}")]
    Storage(#[from] StoreError),
}

/// External process errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Executable not found on PATH
    #[error("'{tool}' executable not found in PATH")]
    ToolNotFound { tool: String },

    /// Process could not be started or its output read
    #[error("Failed to run '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Process exited unsuccessfully
    #[error("'{program}' failed with {}", exit_description(.code))]
    Failed { program: String, code: Option<i32> },
}

#[allow(clippy::ref_option)]
fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Build back-end errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// External build tool failed
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Destination directory could not be removed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Requested tool target is not declared in the tools tree
    #[error("Tool '{tool}' is not a buildable NuttX host tool")]
    UnknownTool { tool: String },
}

/// Workspace layout errors
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// No ancestor contains the marker directory
    #[error("No nxtool workspace found from '{start}'. Run 'nxtool workspace init' first")]
    NotFound { start: PathBuf },

    /// `.nxtool` already exists
    #[error("Workspace already initialized at '{path}'")]
    AlreadyInitialized { path: PathBuf },

    /// Filesystem failure while creating the workspace
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Default state could not be written
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Top-level nxtool error type
#[derive(Error, Debug)]
pub enum NxtoolError {
    /// Project error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Board error
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Process error
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Workspace error
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}
