//! NuttX host tools index
//!
//! Lists the executables declared with `add_executable(...)` in
//! `nuttx/tools/CMakeLists.txt`. Rebuilt on every run.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::defaults::TOOLS_CMAKELISTS;
use crate::infra::filesystem;

fn add_executable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^\s*add_executable\(\s*([A-Za-z0-9_.+-]+)")
            .expect("add_executable pattern is valid")
    })
}

/// Host tool executables buildable from the NuttX tree
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ToolsStore {
    tools: Vec<String>,
}

impl ToolsStore {
    /// Read `<nuttx_dir>/tools/CMakeLists.txt`
    ///
    /// A missing or unreadable file yields an empty list.
    pub fn scan(nuttx_dir: &Path) -> Self {
        let path = nuttx_dir.join(TOOLS_CMAKELISTS);
        match filesystem::read_file(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::debug!("No tools list at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Extract tool names from CMakeLists.txt content
    pub fn parse(content: &str) -> Self {
        let mut tools: Vec<String> = add_executable_pattern()
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        tools.sort();
        tools.dedup();
        Self { tools }
    }

    /// All tool names, sorted
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Whether `name` is a known tool
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t == name)
    }
}
