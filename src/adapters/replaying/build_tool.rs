//! Replaying adapter for the `BuildTool` port.

use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::Result;
use crate::ports::{BuildOutput, BuildTool, Invocation};

/// Replays recorded build tool results from a cassette.
///
/// Interactions are served in recording order. An invocation whose arguments
/// differ from the recorded ones is still answered, with a warning.
pub struct ReplayingBuildTool {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingBuildTool {
    /// Creates a new replaying build tool from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl BuildTool for ReplayingBuildTool {
    fn run(&self, invocation: &Invocation) -> Result<BuildOutput> {
        let (input, output) = {
            let mut replayer = self.replayer.lock().unwrap_or_else(PoisonError::into_inner);
            let interaction = replayer.next_interaction("build", "run")?;
            (interaction.input.clone(), interaction.output.clone())
        };
        if let Ok(recorded) = serde_json::from_value::<Invocation>(input) {
            if recorded.args != invocation.args {
                warn!(
                    recorded = %recorded,
                    requested = %invocation,
                    "replayed build invocation differs from recording"
                );
            }
        }
        replay_result(&output, "build::run")
    }
}
