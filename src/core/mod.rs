//! Core business logic module
//!
//! Project, board and tool state plus the build orchestration on top of it.
//! Processes and files are reached only through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`project`] - Project state and its persisted store
//! - [`board`] - Board configuration index
//! - [`tools`] - Host tools index
//! - [`config`] - Global workspace configuration
//! - [`builder`] - CMake and Make build back-ends
//! - [`build`] - Configure/build decision and orchestration
//! - [`add`] - Project creation logic
//! - [`remove`] - Project removal logic
//! - [`info`] - Project listing
//! - [`init`] - Workspace initialization logic
//! - [`update`] - Source update logic

pub mod add;
pub mod board;
pub mod build;
pub mod builder;
pub mod config;
pub mod info;
pub mod init;
pub mod project;
pub mod remove;
pub mod tools;
pub mod update;
