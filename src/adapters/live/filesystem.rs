//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ToolError};
use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().map_err(|e| ToolError::io("read working directory", ".", e))
    }

    fn walk_files(&self, root: &Path, follow_links: bool) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            debug!(root = %root.display(), "walk root missing, nothing to list");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(follow_links).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    warn!(path = ?err.path(), "skipping symlink loop");
                    continue;
                }
                // Dangling symlinks are common in build output trees.
                Err(err) if err.io_error().is_some_and(|e| e.kind() == ErrorKind::NotFound) => {
                    debug!(path = ?err.path(), "skipping dangling entry");
                    continue;
                }
                Err(err) => {
                    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    return Err(ToolError::io("walk", path, err.into()));
                }
            };
            if !entry.file_type().is_dir() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| ToolError::io("read", path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents).map_err(|e| ToolError::io("write", path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| ToolError::io("create directory", path, e))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::copy(from, to).map(|_| ()).map_err(|e| ToolError::io("copy", from, e))
    }
}
