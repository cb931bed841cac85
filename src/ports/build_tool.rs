//! Build tool port for invoking the external build system.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single build tool invocation.
///
/// The working directory travels with the invocation so callers never
/// need to change the process-wide current directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Executable to run (e.g. `bazel`).
    pub program: String,
    /// Arguments, including the sub-command.
    pub args: Vec<String>,
    /// Directory the process is started in.
    pub workdir: PathBuf,
}

impl Invocation {
    /// Creates an invocation of `program` in `workdir` with no arguments.
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), workdir: workdir.into() }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        f.write_str(&shell_words::join(words))
    }
}

/// What a finished build tool process reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutput {
    /// Process exit code, `-1` when terminated by a signal.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error (empty when it was streamed to the terminal).
    #[serde(default)]
    pub stderr: String,
}

impl BuildOutput {
    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs build tool processes.
///
/// Abstracting the build tool allows recording a real session to a cassette
/// and replaying it later without the build system installed.
pub trait BuildTool: Send + Sync {
    /// Runs the invocation to completion, blocking until it exits.
    ///
    /// A non-zero exit is reported through [`BuildOutput::exit_code`], not as
    /// an error; callers decide whether it is fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, invocation: &Invocation) -> Result<BuildOutput>;
}
