//! Recording adapter for the `BuildTool` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::Result;
use crate::ports::{BuildOutput, BuildTool, Invocation};

/// Records build tool interactions while delegating to an inner implementation.
pub struct RecordingBuildTool {
    inner: Box<dyn BuildTool>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingBuildTool {
    /// Creates a new recording build tool wrapping the given implementation.
    pub fn new(inner: Box<dyn BuildTool>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl BuildTool for RecordingBuildTool {
    fn run(&self, invocation: &Invocation) -> Result<BuildOutput> {
        let result = self.inner.run(invocation);
        record_result(&self.recorder, "build", "run", invocation, &result);
        result
    }
}
