//! Build back-ends
//!
//! A [`Builder`] drives one of the two native NuttX build flows. The CMake
//! flow builds out of tree into `<root>/build_<project>`; the Make flow
//! configures and builds inside the `nuttx/` source tree itself.

use std::path::{Path, PathBuf};

use crate::config::defaults::{
    CMAKE_CACHE_FILE, CONFIGURE_SCRIPT, DEFAULT_BUILD_TYPE, DEFAULT_GENERATOR, MAKE_CONFIG_FILE,
    MAKE_PROJECT,
};
use crate::core::board::BoardConfig;
use crate::core::project::ProjectInstance;
use crate::error::BuildError;
use crate::infra::dirs::WorkspacePaths;
use crate::infra::filesystem;
use crate::infra::process::CommandRunner;

/// CMake executable
pub const CMAKE: &str = "cmake";

/// Make executable
pub const MAKE: &str = "make";

/// Settings shared by both back-ends for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// `CMAKE_BUILD_TYPE` used on configure
    pub build_type: String,
    /// Parallel jobs passed to the build tool
    pub jobs: usize,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            build_type: DEFAULT_BUILD_TYPE.to_string(),
            jobs: num_cpus::get(),
        }
    }
}

/// Configure/build/clean capability of a build back-end
pub trait Builder {
    /// Back-end name, for messages
    fn name(&self) -> &'static str;

    /// Directory owned by this builder and removed by [`Builder::fullclean`]
    fn dest(&self) -> &Path;

    /// Whether a configure step has already been run
    fn is_configured(&self) -> bool;

    /// Apply a board configuration
    fn configure(&self, config: &BoardConfig) -> Result<(), BuildError>;

    /// Build everything, or only `target`
    fn build(&self, target: Option<&str>) -> Result<(), BuildError>;

    /// Remove build outputs through the build tool
    fn clean(&self) -> Result<(), BuildError>;

    /// Delete the destination directory
    ///
    /// Returns whether anything was removed; deleting a missing directory
    /// succeeds.
    fn fullclean(&self) -> Result<bool, BuildError> {
        let removed = filesystem::remove_dir_all(self.dest())?;
        if removed {
            tracing::info!("Removed {}", self.dest().display());
        }
        Ok(removed)
    }

    /// Install or export the build results
    fn install(&self, prefix: Option<&Path>) -> Result<(), BuildError>;
}

/// Pick the back-end for `project`
///
/// The reserved `make` project uses the Make flow; every other project is
/// built with CMake into its own build directory.
pub fn select_builder<'a>(
    paths: &WorkspacePaths,
    project: &ProjectInstance,
    settings: &BuildSettings,
    runner: &'a dyn CommandRunner,
) -> Box<dyn Builder + 'a> {
    if project.name == MAKE_PROJECT {
        Box::new(MakeBuilder::new(paths, settings, runner))
    } else {
        Box::new(CmakeBuilder::new(paths, project, settings, runner))
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

/// Out-of-tree CMake builds
pub struct CmakeBuilder<'a> {
    root: PathBuf,
    source: PathBuf,
    dest: PathBuf,
    generator: String,
    compiler: Option<String>,
    settings: BuildSettings,
    runner: &'a dyn CommandRunner,
}

impl<'a> CmakeBuilder<'a> {
    /// Builder for `project`, honouring its generator and compiler options
    pub fn new(
        paths: &WorkspacePaths,
        project: &ProjectInstance,
        settings: &BuildSettings,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            root: paths.root().to_path_buf(),
            source: paths.nuttx_dir(),
            dest: paths.build_dir(&project.name),
            generator: project
                .opts
                .generator
                .clone()
                .unwrap_or_else(|| DEFAULT_GENERATOR.to_string()),
            compiler: project.opts.compiler.clone(),
            settings: settings.clone(),
            runner,
        }
    }

    fn cmake(&self, args: &[String]) -> Result<(), BuildError> {
        self.runner.run(CMAKE, args, &self.root)?;
        Ok(())
    }

    fn build_args(&self, target: Option<&str>) -> Vec<String> {
        let mut args = vec!["--build".to_string(), path_arg(&self.dest)];
        if let Some(target) = target {
            args.extend(["--target".to_string(), target.to_string()]);
        }
        args.extend(["-j".to_string(), self.settings.jobs.to_string()]);
        args
    }
}

impl Builder for CmakeBuilder<'_> {
    fn name(&self) -> &'static str {
        CMAKE
    }

    fn dest(&self) -> &Path {
        &self.dest
    }

    fn is_configured(&self) -> bool {
        self.dest.join(CMAKE_CACHE_FILE).is_file()
    }

    fn configure(&self, config: &BoardConfig) -> Result<(), BuildError> {
        tracing::info!("Configuring {} in {}", config, self.dest.display());
        let mut args = vec![
            "-S".to_string(),
            path_arg(&self.source),
            "-B".to_string(),
            path_arg(&self.dest),
            "-G".to_string(),
            self.generator.clone(),
            format!("-DBOARD_CONFIG={config}"),
            format!("-DCMAKE_BUILD_TYPE={}", self.settings.build_type),
        ];
        if let Some(compiler) = &self.compiler {
            args.push(format!("-DCMAKE_C_COMPILER={compiler}"));
        }
        self.cmake(&args)
    }

    fn build(&self, target: Option<&str>) -> Result<(), BuildError> {
        self.cmake(&self.build_args(target))
    }

    fn clean(&self) -> Result<(), BuildError> {
        self.cmake(&[
            "--build".to_string(),
            path_arg(&self.dest),
            "--target".to_string(),
            "clean".to_string(),
        ])
    }

    fn install(&self, prefix: Option<&Path>) -> Result<(), BuildError> {
        let mut args = vec!["--install".to_string(), path_arg(&self.dest)];
        if let Some(prefix) = prefix {
            args.extend(["--prefix".to_string(), path_arg(prefix)]);
        }
        self.cmake(&args)
    }
}

/// In-tree legacy Make builds
pub struct MakeBuilder<'a> {
    nuttx_dir: PathBuf,
    apps_dir: PathBuf,
    dest: PathBuf,
    jobs: usize,
    runner: &'a dyn CommandRunner,
}

impl<'a> MakeBuilder<'a> {
    pub fn new(
        paths: &WorkspacePaths,
        settings: &BuildSettings,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            nuttx_dir: paths.nuttx_dir(),
            apps_dir: paths.apps_dir(),
            dest: paths.build_dir(MAKE_PROJECT),
            jobs: settings.jobs,
            runner,
        }
    }

    fn make(&self, args: &[String]) -> Result<(), BuildError> {
        self.runner.run(MAKE, args, &self.nuttx_dir)?;
        Ok(())
    }
}

impl Builder for MakeBuilder<'_> {
    fn name(&self) -> &'static str {
        MAKE
    }

    fn dest(&self) -> &Path {
        &self.dest
    }

    fn is_configured(&self) -> bool {
        self.nuttx_dir.join(MAKE_CONFIG_FILE).is_file()
    }

    fn configure(&self, config: &BoardConfig) -> Result<(), BuildError> {
        tracing::info!("Configuring {} in {}", config, self.nuttx_dir.display());
        let script = path_arg(&self.nuttx_dir.join(CONFIGURE_SCRIPT));
        let mut args = Vec::new();
        // configure.sh refuses an already configured tree unless told to distclean it
        if self.is_configured() {
            args.push("-E".to_string());
        }
        if self.apps_dir.is_dir() {
            args.extend(["-a".to_string(), path_arg(&self.apps_dir)]);
        }
        args.push(config.to_string());
        self.runner.run(&script, &args, &self.nuttx_dir)?;
        Ok(())
    }

    fn build(&self, target: Option<&str>) -> Result<(), BuildError> {
        let mut args: Vec<String> = target.map(ToString::to_string).into_iter().collect();
        args.push(format!("-j{}", self.jobs));
        self.make(&args)
    }

    fn clean(&self) -> Result<(), BuildError> {
        self.make(&["distclean".to_string()])
    }

    fn install(&self, prefix: Option<&Path>) -> Result<(), BuildError> {
        if let Some(prefix) = prefix {
            tracing::warn!(
                "Make export writes into {}; ignoring prefix {}",
                self.nuttx_dir.display(),
                prefix.display()
            );
        }
        self.make(&["export".to_string()])
    }
}
