//! Configuration and constants
//!
//! - [`defaults`] - Workspace layout names and build defaults
//! - [`urls`] - Default source repository locations

pub mod defaults;
pub mod urls;
