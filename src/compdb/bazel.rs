//! Typed build tool calls made while generating a compilation database.

use std::path::{Path, PathBuf};

use tracing::info;

use super::query::{closure_query, parse_targets};
use crate::error::{Result, ToolError};
use crate::ports::{BuildTool, Invocation};

const COMPDB_ASPECT: &str = "--aspects=@bazel_compdb//:aspects.bzl%compilation_database_aspect";
const COMPDB_OUTPUT_GROUP: &str = "--output_groups=compdb_files";

/// Build tool client bound to one workspace directory.
pub struct Bazel<'a> {
    tool: &'a dyn BuildTool,
    program: &'a str,
    options: &'a [String],
    workdir: &'a Path,
}

impl<'a> Bazel<'a> {
    /// Creates a client running `program` in `workdir`, passing `options`
    /// to `build` and `info`.
    pub fn new(
        tool: &'a dyn BuildTool,
        program: &'a str,
        options: &'a [String],
        workdir: &'a Path,
    ) -> Self {
        Self { tool, program, options, workdir }
    }

    fn invocation(&self, subcommand: &str) -> Invocation {
        Invocation::new(self.program, self.workdir).arg(subcommand)
    }

    /// Runs the invocation and returns stdout, failing on a non-zero exit.
    fn check_output(&self, invocation: &Invocation) -> Result<String> {
        let output = self.tool.run(invocation)?;
        if !output.success() {
            return Err(ToolError::BuildTool {
                command: invocation.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout)
    }

    /// Lists the targets in the closure of `targets` whose outputs must exist
    /// before compile flags are meaningful.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn query_closure(&self, targets: &[String]) -> Result<Vec<String>> {
        let invocation =
            self.invocation("query").arg("--notool_deps").arg(closure_query(targets));
        Ok(parse_targets(&self.check_output(&invocation)?))
    }

    /// Builds `targets` with the configured options and any `extra` flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    pub fn build(&self, extra: &[&str], targets: &[String]) -> Result<()> {
        let invocation = self
            .invocation("build")
            .args(self.options.iter().cloned())
            .args(extra.iter().copied())
            .args(targets.iter().cloned());
        info!(targets = targets.len(), workdir = %self.workdir.display(), "building");
        self.check_output(&invocation).map(|_| ())
    }

    /// Builds `targets` with the compdb aspect so fragments land in the
    /// execution root.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    pub fn build_compdb_fragments(&self, targets: &[String]) -> Result<()> {
        self.build(&[COMPDB_ASPECT, COMPDB_OUTPUT_GROUP], targets)
    }

    /// Resolves the absolute execution root.
    ///
    /// # Errors
    ///
    /// Returns an error if `info` fails or prints nothing.
    pub fn execution_root(&self) -> Result<PathBuf> {
        let invocation =
            self.invocation("info").arg("execution_root").args(self.options.iter().cloned());
        let stdout = self.check_output(&invocation)?;
        let root = stdout.trim();
        if root.is_empty() {
            return Err(ToolError::Config(format!("`{invocation}` printed no execution root")));
        }
        let root = PathBuf::from(root);
        Ok(if root.is_absolute() { root } else { self.workdir.join(root) })
    }
}
