//! Filesystem port for the walks, reads, and copies the tools perform.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Provides filesystem access.
///
/// Every method fails with [`crate::error::ToolError::Io`] naming the path
/// that could not be processed.
pub trait FileSystem: Send + Sync {
    /// Returns the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unavailable (e.g. deleted).
    fn current_dir(&self) -> Result<PathBuf>;

    /// Lists every non-directory entry below `root`, sorted by path.
    ///
    /// A missing `root` yields an empty list. When `follow_links` is set,
    /// symlinked directories are descended into.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory below `root` cannot be read.
    fn walk_files(&self, root: &Path, follow_links: bool) -> Result<Vec<PathBuf>>;

    /// Reads the entire contents of a file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Writes `contents` to `path`, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Creates `path` and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copies the bytes of `from` to `to`, overwriting `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` cannot be read or `to` cannot be written.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;
}
