//! External process execution
//!
//! Every build tool and git invocation goes through [`CommandRunner`], which
//! runs a program to completion in a fixed working directory and streams its
//! standard output line by line while it runs.

use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ProcessError;

/// Runs external programs synchronously
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, blocking until it exits
    ///
    /// Fails with [`ProcessError::ToolNotFound`] before spawning when the
    /// program cannot be located, and with [`ProcessError::Failed`] when it
    /// exits unsuccessfully.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ProcessError>;
}

/// Check whether a program is available
///
/// Bare names are looked up on `PATH`; paths must point to an existing file.
pub fn locate(program: &str) -> Result<PathBuf, ProcessError> {
    which::which(program).map_err(|_| ProcessError::ToolNotFound {
        tool: program.to_string(),
    })
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner {
    /// Forward tool output to stderr, keeping stdout for JSON
    to_stderr: bool,
}

impl SystemRunner {
    /// Create a new runner that forwards tool output to stdout
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward tool output to stderr instead of stdout
    #[must_use]
    pub fn with_stderr_output(mut self, to_stderr: bool) -> Self {
        self.to_stderr = to_stderr;
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), ProcessError> {
        let resolved = locate(program)?;

        tracing::info!("Running: {} {}", program, args.join(" "));
        tracing::debug!("Working directory: {}", cwd.display());

        let spawn_err = |e: io::Error| ProcessError::Spawn {
            program: program.to_string(),
            error: e.to_string(),
        };

        let mut child = Command::new(&resolved)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_err)?;

        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            let streamed = if self.to_stderr {
                stream_lines(reader, &mut io::stderr().lock())
            } else {
                stream_lines(reader, &mut io::stdout().lock())
            };
            if let Err(e) = streamed {
                // Reap the child before reporting so it does not linger
                let _ = child.kill();
                let _ = child.wait();
                return Err(spawn_err(e));
            }
        }

        let status = child.wait().map_err(spawn_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Failed {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Copy `reader` to `out` one line at a time, flushing after each line
///
/// Bytes are forwarded untouched, so non UTF-8 tool output survives.
fn stream_lines<R: BufRead, W: Write>(mut reader: R, out: &mut W) -> io::Result<()> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        out.write_all(&line)?;
        out.flush()?;
    }
}
