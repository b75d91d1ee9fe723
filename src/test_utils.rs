//! Test utilities
//!
//! Proptest generators, a recording [`CommandRunner`] and a fake workspace
//! with a minimal NuttX board tree.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid project name
    pub fn project_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,20}".prop_filter("reserved name", |s| s != "make")
    }

    /// Generate a board or defconfig identifier as found in the NuttX tree
    pub fn board_ident() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,15}"
    }

    /// Generate a separator accepted in config strings
    pub fn separator() -> impl Strategy<Value = char> {
        prop_oneof![Just(':'), Just('/')]
    }
}

#[cfg(test)]
pub use runner::{Invocation, RecordingRunner};

#[cfg(test)]
mod runner {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use crate::config::defaults::{CMAKE_CACHE_FILE, MAKE_CONFIG_FILE};
    use crate::error::ProcessError;
    use crate::infra::process::CommandRunner;

    /// One recorded program invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Invocation {
        pub program: String,
        pub args: Vec<String>,
        pub cwd: PathBuf,
    }

    impl Invocation {
        /// `cmake -S ... -B ...` or `tools/configure.sh`
        pub fn is_configure(&self) -> bool {
            (self.program == "cmake" && self.args.iter().any(|a| a == "-S"))
                || self.program.ends_with("configure.sh")
        }

        /// `cmake --build` or plain `make`
        pub fn is_build(&self) -> bool {
            (self.program == "cmake"
                && self.args.first().is_some_and(|a| a == "--build")
                && !self.args.iter().any(|a| a == "clean"))
                || (self.program == "make" && self.args.iter().all(|a| a.starts_with("-j")))
        }
    }

    /// Records invocations instead of running them
    ///
    /// Configure calls leave the same marker files the real tools write, so
    /// "has this been configured" checks behave as after a real run.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: RefCell<Vec<Invocation>>,
        fail_on: Option<String>,
        fail_builds: bool,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every invocation of `program` exits with status 2
        pub fn failing_on(program: &str) -> Self {
            Self {
                calls: RefCell::default(),
                fail_on: Some(program.to_string()),
                fail_builds: false,
            }
        }

        /// Configure succeeds but every build invocation exits with status 2
        pub fn failing_builds() -> Self {
            Self {
                fail_builds: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.borrow().clone()
        }

        pub fn configure_count(&self) -> usize {
            self.calls.borrow().iter().filter(|c| c.is_configure()).count()
        }

        pub fn build_count(&self) -> usize {
            self.calls.borrow().iter().filter(|c| c.is_build()).count()
        }

        pub fn clear(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ProcessError> {
            let call = Invocation {
                program: program.to_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            };
            let configure = call.is_configure();
            let build = call.is_build();
            self.calls.borrow_mut().push(call);

            if self.fail_on.as_deref() == Some(program) || (self.fail_builds && build) {
                return Err(ProcessError::Failed {
                    program: program.to_string(),
                    code: Some(2),
                });
            }

            if configure {
                let marker = if program == "cmake" {
                    let dest = args
                        .iter()
                        .position(|a| a == "-B")
                        .and_then(|i| args.get(i + 1))
                        .map(PathBuf::from)
                        .unwrap_or_else(|| cwd.to_path_buf());
                    dest.join(CMAKE_CACHE_FILE)
                } else {
                    cwd.join(MAKE_CONFIG_FILE)
                };
                if let Some(parent) = marker.parent() {
                    std::fs::create_dir_all(parent).expect("Failed to create build directory");
                }
                std::fs::write(marker, "").expect("Failed to write configure marker");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
pub mod fixtures {
    use tempfile::TempDir;

    use crate::config::defaults::WORKSPACE_DIR_NAME;
    use crate::infra::dirs::WorkspacePaths;

    /// Boards present in [`workspace`]: (arch, chip, board, defconfig)
    pub const BOARDS: &[(&str, &str, &str, &str)] = &[
        ("xtensa", "esp32", "esp32", "nsh"),
        ("xtensa", "esp32", "esp32", "wifi"),
        ("arm", "stm32", "nucleo-f446re", "nsh"),
        ("sim", "sim", "sim", "nsh"),
    ];

    /// Host tools declared in the fake `tools/CMakeLists.txt`
    pub const TOOLS_CMAKELISTS: &str = r"
cmake_minimum_required(VERSION 3.16)
project(nuttx_tools LANGUAGES C)

add_executable(mkconfig mkconfig.c cfgdefine.c)
add_executable(mkversion mkversion.c cfgdefine.c)
add_executable(mksyscall mksyscall.c csvparser.c)
install(TARGETS mkconfig DESTINATION bin)
";

    /// An initialised workspace with a NuttX tree containing [`BOARDS`]
    pub fn workspace() -> (TempDir, WorkspacePaths) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let paths = WorkspacePaths::new(temp.path());
        std::fs::create_dir_all(temp.path().join(WORKSPACE_DIR_NAME))
            .expect("Failed to create marker directory");

        let boards_dir = paths.nuttx_dir().join("boards");
        for (arch, chip, board, defconfig) in BOARDS {
            let dir = boards_dir
                .join(arch)
                .join(chip)
                .join(board)
                .join("configs")
                .join(defconfig);
            std::fs::create_dir_all(&dir).expect("Failed to create board directory");
            std::fs::write(dir.join("defconfig"), "CONFIG_ARCH_BOARD_CUSTOM=n\n")
                .expect("Failed to write defconfig");
        }

        let tools_dir = paths.nuttx_dir().join("tools");
        std::fs::create_dir_all(&tools_dir).expect("Failed to create tools directory");
        std::fs::write(tools_dir.join("CMakeLists.txt"), TOOLS_CMAKELISTS)
            .expect("Failed to write tools CMakeLists.txt");

        (temp, paths)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_project_name_generator(name in project_name()) {
            prop_assert!(!name.is_empty());
            prop_assert_ne!(name.as_str(), "make");
            prop_assert!(!name.contains('/'));
        }

        #[test]
        fn test_board_ident_generator(ident in board_ident()) {
            prop_assert!(!ident.is_empty());
            prop_assert!(!ident.contains(':') && !ident.contains('/'));
        }
    }
}
