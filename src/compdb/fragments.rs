//! Collection of per-compilation JSON fragments from the execution root.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::entry::CompileEntry;
use crate::error::{Result, ToolError};
use crate::ports::FileSystem;

/// File name suffix of the fragments the compdb aspect writes.
pub const FRAGMENT_SUFFIX: &str = ".compile_commands.json";

/// Placeholder the aspect writes in place of the execution root.
pub const EXEC_ROOT_PLACEHOLDER: &str = "__EXEC_ROOT__";

/// Parses one fragment: comma-joined JSON objects without enclosing brackets.
///
/// A trailing comma is tolerated. The execution root placeholder is replaced
/// in every string value, extra fields included. Substitution happens after
/// parsing, so roots containing quotes or backslashes need no escaping.
///
/// # Errors
///
/// Returns the JSON error if the fragment is malformed.
pub fn parse_fragment(
    text: &str,
    exec_root: &str,
) -> Result<Vec<CompileEntry>, serde_json::Error> {
    let body = text.trim_end();
    let body = body.strip_suffix(',').unwrap_or(body);
    let mut parsed: Value = serde_json::from_str(&format!("[{body}]"))?;
    substitute_exec_root(&mut parsed, exec_root);
    serde_json::from_value(parsed)
}

fn substitute_exec_root(value: &mut Value, exec_root: &str) {
    match value {
        Value::String(s) if s.contains(EXEC_ROOT_PLACEHOLDER) => {
            *s = s.replace(EXEC_ROOT_PLACEHOLDER, exec_root);
        }
        Value::Array(items) => items.iter_mut().for_each(|v| substitute_exec_root(v, exec_root)),
        Value::Object(map) => map.values_mut().for_each(|v| substitute_exec_root(v, exec_root)),
        _ => {}
    }
}

/// Reads every fragment below `exec_root` in path order.
///
/// No fragments is not an error: the result is simply empty.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked, a fragment cannot be
/// read, or a fragment is malformed.
pub fn collect(fs: &dyn FileSystem, exec_root: &Path) -> Result<Vec<CompileEntry>> {
    let root = exec_root.to_string_lossy();
    let mut entries = Vec::new();
    for path in fs.walk_files(exec_root, true)? {
        if !path.to_string_lossy().ends_with(FRAGMENT_SUFFIX) {
            continue;
        }
        let text = fs.read_to_string(&path)?;
        let parsed = parse_fragment(&text, &root)
            .map_err(|source| ToolError::Fragment { path: path.clone(), source })?;
        debug!(fragment = %path.display(), entries = parsed.len(), "read fragment");
        entries.extend(parsed);
    }
    Ok(entries)
}
