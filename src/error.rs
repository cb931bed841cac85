//! Error type shared by every tool, port, and adapter.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = ToolError> = std::result::Result<T, E>;

/// Failures that abort a tool invocation.
///
/// None of these are recoverable: the tools are one-shot and re-run on demand.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A filesystem operation failed.
    #[error("{op} {path}: {source}")]
    Io {
        /// What was being attempted (e.g. "copy", "create directory").
        op: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The build tool could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The build tool exited unsuccessfully.
    #[error("`{command}` exited with status {exit_code}{}", stderr_suffix(.stderr))]
    BuildTool {
        /// Rendered command line.
        command: String,
        /// Process exit code, `-1` when killed by a signal.
        exit_code: i32,
        /// Captured standard error, if any was captured.
        stderr: String,
    },

    /// A compilation database fragment was not valid JSON.
    #[error("malformed compdb fragment {path}: {source}")]
    Fragment {
        /// Fragment file path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The merged database could not be serialized.
    #[error("failed to serialize compilation database: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid configuration from the environment or command line.
    #[error("configuration error: {0}")]
    Config(String),

    /// A cassette could not be read, parsed, or written.
    #[error("cassette error: {0}")]
    Cassette(String),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

impl ToolError {
    /// Builds an [`ToolError::Io`] for `path`.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }
}
