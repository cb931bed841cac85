//! Replaying adapters that serve recorded interactions.

pub mod build_tool;

pub use build_tool::ReplayingBuildTool;

use crate::error::{Result, ToolError};

/// Extracts a Result from a cassette output JSON value.
///
/// Mirror of `recording::record_result`: expects `{"ok": <value>}` or
/// `{"err": "message"}`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error");
        return Err(ToolError::Cassette(format!("{context}: recorded failure: {msg}")));
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| ToolError::Cassette(format!("{context}: failed to deserialize: {e}")))
}
