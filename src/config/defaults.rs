//! Default configuration values

/// Marker directory that identifies a workspace root
pub const WORKSPACE_DIR_NAME: &str = ".nxtool";

/// Global configuration file inside the marker directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Projects file inside the marker directory
pub const PROJECTS_FILE_NAME: &str = "projects.toml";

/// NuttX source tree, relative to the workspace root
pub const NUTTX_DIR_NAME: &str = "nuttx";

/// NuttX applications tree, relative to the workspace root
pub const APPS_DIR_NAME: &str = "apps";

/// Built-in project that drives the legacy Make flow
pub const MAKE_PROJECT: &str = "make";

/// CMake build directories are named `build_<project>`
pub const BUILD_DIR_PREFIX: &str = "build_";

/// Board definitions, relative to the NuttX tree
pub const BOARDS_DIR_NAME: &str = "boards";

/// Leaf file that marks a board configuration
pub const DEFCONFIG_FILE_NAME: &str = "defconfig";

/// Host tools build description, relative to the NuttX tree
pub const TOOLS_CMAKELISTS: &str = "tools/CMakeLists.txt";

/// Legacy configuration script, relative to the NuttX tree
pub const CONFIGURE_SCRIPT: &str = "tools/configure.sh";

/// Default CMake build type
pub const DEFAULT_BUILD_TYPE: &str = "Debug";

/// Default CMake generator
pub const DEFAULT_GENERATOR: &str = "Ninja";

/// Written by `cmake -B` once a build directory is configured
pub const CMAKE_CACHE_FILE: &str = "CMakeCache.txt";

/// Written by `configure.sh` once the source tree is configured
pub const MAKE_CONFIG_FILE: &str = ".config";

/// Environment variable that overrides the workspace search start
pub const ENV_WORKSPACE: &str = "NXTOOL_WORKSPACE";
