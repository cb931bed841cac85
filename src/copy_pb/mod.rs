//! Copies generated protobuf Go bindings from the build output tree into
//! the source tree.
//!
//! A generated file's place in the source tree is whatever follows the
//! import-path marker in its output path, so
//! `bazel-out/.../api_go_proto_/%/github.com/grab/ego/api/v1/api.pb.go`
//! lands at `api/v1/api.pb.go`.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::error::Result;

/// Suffixes of generated Go protobuf sources.
pub const GENERATED_SUFFIXES: [&str; 2] = [".pb.go", ".pb.validate.go"];

/// Default build output directory.
pub const DEFAULT_OUT_DIR: &str = "bazel-out";

/// Default marker separating build scaffolding from the source-relative path.
pub const DEFAULT_MARKER: &str = "%/github.com/grab/ego/";

/// Where to look and where to copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Tree to scan for generated files.
    pub out_dir: PathBuf,
    /// Marker substring located in each candidate path.
    pub marker: String,
    /// Directory destinations are resolved against.
    pub dest_root: PathBuf,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            marker: DEFAULT_MARKER.to_string(),
            dest_root: PathBuf::from("."),
        }
    }
}

/// Outcome of a copy pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// `(source, destination)` for every file copied, in walk order.
    pub copied: Vec<(PathBuf, PathBuf)>,
    /// Generated files skipped because the marker was absent or unsafe.
    pub skipped: usize,
}

/// Returns `true` if `path` names a generated protobuf Go file.
#[must_use]
pub fn is_generated(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| GENERATED_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Source-relative destination for `path`: everything after the first
/// occurrence of `marker`.
///
/// Returns `None` when the marker is absent or the remainder is empty,
/// absolute, or climbs out of the destination root.
#[must_use]
pub fn destination_for(path: &Path, marker: &str) -> Option<PathBuf> {
    let full = path.to_string_lossy();
    let (_, rest) = full.split_once(marker)?;
    let dest = PathBuf::from(rest);
    let contained =
        dest.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    (contained && dest.file_name().is_some()).then_some(dest)
}

/// Joins `relative` onto `dest_root`, leaving it bare when the root is `.`.
fn resolve_destination(dest_root: &Path, relative: PathBuf) -> PathBuf {
    if dest_root == Path::new(".") || dest_root.as_os_str().is_empty() {
        relative
    } else {
        dest_root.join(relative)
    }
}

/// Copies every generated file under `options.out_dir` to its source-tree
/// location, overwriting existing files.
///
/// # Errors
///
/// Returns the first walk, directory creation, or copy failure; files copied
/// before it stay in place.
pub fn copy_generated(ctx: &ServiceContext, options: &CopyOptions) -> Result<CopyReport> {
    println!("Current Working Directory {}", ctx.fs.current_dir()?.display());

    let mut report = CopyReport::default();
    for src in ctx.fs.walk_files(&options.out_dir, false)? {
        if !is_generated(&src) {
            continue;
        }
        let Some(relative) = destination_for(&src, &options.marker) else {
            if src.to_string_lossy().contains(&options.marker) {
                warn!(path = %src.display(), "destination escapes the source tree, skipping");
            } else {
                debug!(path = %src.display(), "no marker, skipping");
            }
            report.skipped += 1;
            continue;
        };
        let dest = resolve_destination(&options.dest_root, relative);

        println!("copying {} --> {}", src.display(), dest.display());
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            ctx.fs.create_dir_all(parent)?;
        }
        ctx.fs.copy(&src, &dest)?;
        report.copied.push((src, dest));
    }

    info!(copied = report.copied.len(), skipped = report.skipped, "generated files synced");
    Ok(report)
}
