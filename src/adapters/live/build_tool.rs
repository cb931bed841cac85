//! Live build tool adapter using `std::process::Command`.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, ToolError};
use crate::ports::build_tool::{BuildOutput, BuildTool, Invocation};

/// Runs the build tool as a child process.
///
/// Standard output is captured for the caller; standard error is passed
/// through so build progress stays visible on the terminal.
pub struct LiveBuildTool;

impl BuildTool for LiveBuildTool {
    fn run(&self, invocation: &Invocation) -> Result<BuildOutput> {
        debug!(workdir = %invocation.workdir.display(), command = %invocation, "running");
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.workdir)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::Spawn { command: invocation.to_string(), source })?;
        Ok(BuildOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
