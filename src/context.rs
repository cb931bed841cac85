//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::adapters::live::build_tool::LiveBuildTool;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::build_tool::RecordingBuildTool;
use crate::adapters::replaying::ReplayingBuildTool;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::{workspace_commit, CassetteRecorder};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::Result;
use crate::ports::build_tool::BuildTool;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying). The filesystem is always live.
pub struct ServiceContext {
    /// Filesystem for walks, reads, and copies.
    pub fs: Box<dyn FileSystem>,
    /// Build tool runner.
    pub build: Box<dyn BuildTool>,
    /// Cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self::with_build_tool(Box::new(LiveBuildTool))
    }

    /// Creates a live-filesystem context around an arbitrary build tool.
    #[must_use]
    pub fn with_build_tool(build: Box<dyn BuildTool>) -> Self {
        Self { fs: Box::new(LiveFileSystem), build, recorder: None }
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// The live build tool does the actual work; every invocation and its
    /// result is captured to `path`.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "egotools-session",
            workspace_commit(),
        )));
        let build = RecordingBuildTool::new(Box::new(LiveBuildTool), Arc::clone(&recorder));
        Self { fs: Box::new(LiveFileSystem), build: Box::new(build), recorder: Some(recorder) }
    }

    /// Creates a context whose build tool is served from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let cassette = Cassette::load(path)?;
        info!(
            cassette = %path.display(),
            name = %cassette.name,
            interactions = cassette.interactions.len(),
            "replaying build tool session"
        );
        Ok(Self::with_build_tool(Box::new(ReplayingBuildTool::new(CassetteReplayer::new(
            &cassette,
        )))))
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let recorder = recorder.lock().unwrap_or_else(PoisonError::into_inner);
            match recorder.save() {
                Ok(path) => info!(
                    cassette = %path.display(),
                    interactions = recorder.interaction_count(),
                    "recorded build tool session"
                ),
                Err(e) => warn!(error = %e, "failed to write cassette"),
            }
        }
    }
}
