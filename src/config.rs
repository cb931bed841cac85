//! Environment-driven settings shared by the tools.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, ToolError};

/// Extra build tool options, tokenized like a shell would.
pub const BUILD_OPTIONS_VAR: &str = "BAZEL_BUILD_OPTIONS";
/// Build tool executable override.
pub const BAZEL_VAR: &str = "BAZEL";
/// Cassette path to record build tool interactions to.
pub const RECORD_VAR: &str = "EGOTOOLS_RECORD";
/// Cassette path to replay build tool interactions from.
pub const REPLAY_VAR: &str = "EGOTOOLS_REPLAY";

const DEFAULT_BAZEL: &str = "bazel";

/// Settings resolved from the environment for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Options from `BAZEL_BUILD_OPTIONS`, passed to every build tool call.
    pub build_options: Vec<String>,
    /// Build tool executable.
    pub bazel: String,
    /// Record the build tool session to this cassette.
    pub record: Option<PathBuf>,
    /// Replay the build tool session from this cassette.
    pub replay: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            build_options: Vec::new(),
            bazel: DEFAULT_BAZEL.to_string(),
            record: None,
            replay: None,
        }
    }
}

impl Settings {
    /// Loads `.env` (if present) and reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or recording and replay
    /// are both requested.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or recording and replay
    /// are both requested.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let build_options = match non_empty(BUILD_OPTIONS_VAR) {
            Some(raw) => shell_words::split(&raw)
                .map_err(|e| ToolError::Config(format!("{BUILD_OPTIONS_VAR}: {e}")))?,
            None => Vec::new(),
        };
        let bazel = non_empty(BAZEL_VAR).unwrap_or_else(|| DEFAULT_BAZEL.to_string());
        let record = non_empty(RECORD_VAR).map(PathBuf::from);
        let replay = non_empty(REPLAY_VAR).map(PathBuf::from);

        if record.is_some() && replay.is_some() {
            return Err(ToolError::Config(format!(
                "{RECORD_VAR} and {REPLAY_VAR} cannot be set together"
            )));
        }

        Ok(Self { build_options, bazel, record, replay })
    }
}
