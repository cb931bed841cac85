//! Compilation database generation.
//!
//! Each [`SubBuild`] is a workspace directory with its own target patterns.
//! For every sub-build the build tool optionally pre-builds the targets whose
//! generated headers and sources must exist, then builds with the compdb
//! aspect, after which the emitted fragments are collected, prefixed,
//! filtered, and rewritten. The sub-build results are concatenated in order
//! and written as one JSON array.

pub mod bazel;
pub mod entry;
pub mod filter;
pub mod fragments;
pub mod query;
pub mod rewrite;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::context::ServiceContext;
use crate::error::Result;
use bazel::Bazel;
pub use entry::{CompileCommand, CompileEntry};

/// Options appended to the user's build options for every compdb call.
///
/// Generated sources must be downloaded from remote caches, so this
/// overrides anything a bazelrc says.
pub const COMPDB_BUILD_OPTIONS: [&str; 2] = ["--config=compdb", "--remote_download_outputs=all"];

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "compile_commands.json";

/// Which entries are kept and how they are rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct EntryOptions {
    /// Keep header files.
    pub include_headers: bool,
    /// Keep files under the build output tree.
    pub include_genfiles: bool,
    /// Keep files from external repositories.
    pub include_external: bool,
    /// Rewrite `-iquote` to `-I` for Visual Studio Code.
    pub vscode: bool,
}

/// Settings for one generator run.
#[derive(Debug, Clone)]
pub struct CompdbOptions {
    /// Entry selection and rewriting.
    pub entries: EntryOptions,
    /// Build the target closure before generating fragments.
    pub run_bazel_build: bool,
    /// Build tool executable.
    pub bazel: String,
    /// Options for `build` and `info`, including [`COMPDB_BUILD_OPTIONS`].
    pub build_options: Vec<String>,
}

impl CompdbOptions {
    /// Creates options from the user's extra build options.
    #[must_use]
    pub fn new(entries: EntryOptions, bazel: impl Into<String>, user_options: &[String]) -> Self {
        Self {
            entries,
            run_bazel_build: false,
            bazel: bazel.into(),
            build_options: build_options(user_options),
        }
    }
}

/// The user's options followed by [`COMPDB_BUILD_OPTIONS`].
#[must_use]
pub fn build_options(user_options: &[String]) -> Vec<String> {
    user_options
        .iter()
        .cloned()
        .chain(COMPDB_BUILD_OPTIONS.iter().map(|o| (*o).to_string()))
        .collect()
}

/// A workspace directory whose targets contribute entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBuild {
    /// Directory the build tool runs in.
    pub workdir: PathBuf,
    /// Prepended to every entry's `file`.
    pub prefix: String,
    /// Target patterns to build.
    pub targets: Vec<String>,
}

impl SubBuild {
    /// A sub-build rooted at `workdir` whose entries are prefixed with
    /// `workdir/` (nothing for `.`).
    pub fn nested(workdir: impl Into<PathBuf>, targets: Vec<String>) -> Self {
        let workdir = workdir.into();
        let prefix = prefix_for(&workdir);
        Self { workdir, prefix, targets }
    }
}

fn prefix_for(workdir: &Path) -> String {
    let dir = workdir.to_string_lossy();
    let dir = dir.trim_start_matches("./").trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        String::new()
    } else {
        format!("{dir}/")
    }
}

/// Runs the full pipeline for one sub-build.
///
/// # Errors
///
/// Returns an error if any build tool call fails or a fragment is malformed.
pub fn generate_sub_build(
    ctx: &ServiceContext,
    options: &CompdbOptions,
    sub: &SubBuild,
) -> Result<Vec<CompileEntry>> {
    let cwd = ctx.fs.current_dir()?;
    println!("Current Working Directory {}", display_dir(&cwd, &sub.workdir).display());

    let bazel = Bazel::new(&*ctx.build, &options.bazel, &options.build_options, &sub.workdir);

    if options.run_bazel_build {
        let closure = bazel.query_closure(&sub.targets)?;
        if closure.is_empty() {
            info!(workdir = %sub.workdir.display(), "target closure is empty, skipping pre-build");
        } else {
            bazel.build(&[], &closure)?;
        }
    }

    bazel.build_compdb_fragments(&sub.targets)?;
    let exec_root = bazel.execution_root()?;
    let collected = fragments::collect(&*ctx.fs, &exec_root)?;
    let total = collected.len();

    let entries: Vec<CompileEntry> = collected
        .into_iter()
        .map(|mut entry| {
            entry.file.insert_str(0, &sub.prefix);
            entry
        })
        .filter(|entry| filter::is_compile_target(entry, &options.entries))
        .map(|mut entry| {
            rewrite::modify_compile_command(&mut entry, &options.entries);
            entry
        })
        .collect();

    info!(
        workdir = %sub.workdir.display(),
        exec_root = %exec_root.display(),
        fragment_entries = total,
        kept = entries.len(),
        "collected compilation entries"
    );
    Ok(entries)
}

/// Runs every sub-build in order and concatenates their entries.
///
/// Entries are not de-duplicated across sub-builds.
///
/// # Errors
///
/// Returns the first sub-build error; nothing is produced in that case.
pub fn generate(
    ctx: &ServiceContext,
    options: &CompdbOptions,
    subs: &[SubBuild],
) -> Result<Vec<CompileEntry>> {
    let mut db = Vec::new();
    for sub in subs {
        db.extend(generate_sub_build(ctx, options, sub)?);
    }
    Ok(db)
}

/// Writes `entries` as a two-space indented JSON array.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_database(ctx: &ServiceContext, path: &Path, entries: &[CompileEntry]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(entries)?;
    json.push('\n');
    ctx.fs.write(path, &json)?;
    info!(path = %path.display(), entries = entries.len(), "wrote compilation database");
    Ok(())
}

fn display_dir(cwd: &Path, workdir: &Path) -> PathBuf {
    if workdir.is_absolute() {
        workdir.to_path_buf()
    } else if workdir == Path::new(".") || workdir.as_os_str().is_empty() {
        cwd.to_path_buf()
    } else {
        cwd.join(workdir)
    }
}
