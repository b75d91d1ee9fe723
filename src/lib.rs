//! nxtool - NuttX workspace and project manager
//!
//! Tracks named projects of one NuttX source tree, each bound to a board
//! configuration, and drives the CMake or legacy Make build for them.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic: projects, boards, build back-ends
//! - [`infra`] - Infrastructure layer (filesystem, processes, git)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
