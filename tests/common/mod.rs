//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Boards written by [`TestWorkspace::with_boards`]: (arch, chip, board, defconfig)
pub const BOARDS: &[(&str, &str, &str, &str)] = &[
    ("xtensa", "esp32", "esp32", "nsh"),
    ("xtensa", "esp32", "esp32", "wifi"),
    ("sim", "sim", "sim", "nsh"),
];

/// Minimal tools/CMakeLists.txt
pub const TOOLS_CMAKELISTS: &str = "add_executable(mkconfig mkconfig.c)\nadd_executable(mkversion mkversion.c)\n";

/// Fake cmake: echoes its arguments and writes CMakeCache.txt on configure
pub const FAKE_CMAKE: &str = r#"#!/bin/sh
echo "cmake $*"
while [ $# -gt 0 ]; do
  if [ "$1" = "-B" ]; then
    mkdir -p "$2" && touch "$2/CMakeCache.txt"
  fi
  shift
done
"#;

/// Fake make: echoes its arguments
pub const FAKE_MAKE: &str = "#!/bin/sh\necho \"make $*\"\n";

/// Fake configure.sh: echoes its arguments and writes .config
pub const FAKE_CONFIGURE: &str = "#!/bin/sh\necho \"configure $*\"\ntouch .config\n";

/// Temporary nxtool workspace
///
/// Runs the compiled binary with a clean environment and a private `bin/`
/// directory in front of `PATH` for fake build tools.
pub struct TestWorkspace {
    /// Temporary directory for the workspace root
    pub dir: TempDir,
    bin: TempDir,
}

impl TestWorkspace {
    /// Create an empty, uninitialized directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            bin: TempDir::new().expect("Failed to create bin directory"),
        }
    }

    /// Create a directory and run `nxtool workspace init` in it
    pub fn initialized() -> Self {
        let ws = Self::new();
        let output = ws.run(&["workspace", "init"]);
        assert!(
            output.status.success(),
            "workspace init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        ws
    }

    /// Add the [`BOARDS`] tree and a tools list under `nuttx/`
    pub fn with_boards(self) -> Self {
        for (arch, chip, board, defconfig) in BOARDS {
            self.create_file(
                &format!("nuttx/boards/{arch}/{chip}/{board}/configs/{defconfig}/defconfig"),
                "CONFIG_DEBUG_FEATURES=n\n",
            );
        }
        self.create_file("nuttx/tools/CMakeLists.txt", TOOLS_CMAKELISTS);
        self
    }

    /// Get the path to the workspace root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Command for the nxtool binary, run from the workspace root
    pub fn command(&self, args: &[&str]) -> Command {
        let mut path = vec![self.bin.path().to_path_buf()];
        if let Some(system) = std::env::var_os("PATH") {
            path.extend(std::env::split_paths(&system));
        }

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_nxtool"));
        cmd.current_dir(self.dir.path())
            .env_remove("NXTOOL_WORKSPACE")
            .env_remove("RUST_LOG")
            .env("PATH", std::env::join_paths(path).expect("Invalid PATH"))
            .args(args);
        cmd
    }

    /// Run nxtool to completion
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute nxtool")
    }

    /// Run nxtool and return stdout, failing the test on a non-zero exit
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "nxtool {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Run nxtool expecting failure and return stderr
    pub fn run_err(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "nxtool {args:?} should have failed: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    /// Run nxtool with `--json` and parse stdout
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = args.to_vec();
        full.push("--json");
        let stdout = self.run_ok(&full);
        serde_json::from_str(&stdout).expect("Output is not valid JSON")
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the workspace
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Install an executable script as `bin/<name>`, ahead of the system PATH
    #[cfg(unix)]
    pub fn install_tool(&self, name: &str, script: &str) {
        make_executable(&self.bin.path().join(name), script);
    }

    /// Install the fake cmake, make and configure.sh
    #[cfg(unix)]
    pub fn with_fake_tools(self) -> Self {
        self.install_tool("cmake", FAKE_CMAKE);
        self.install_tool("make", FAKE_MAKE);
        make_executable(
            &self.dir.path().join("nuttx/tools/configure.sh"),
            FAKE_CONFIGURE,
        );
        self
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &std::path::Path, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(path, script).expect("Failed to write script");
    let mut perms = std::fs::metadata(path)
        .expect("Failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).expect("Failed to chmod script");
}
