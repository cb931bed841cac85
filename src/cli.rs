//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::compdb::{EntryOptions, DEFAULT_OUTPUT};
use crate::copy_pb::{CopyOptions, DEFAULT_MARKER, DEFAULT_OUT_DIR};

/// Top-level CLI parser for `egotools`.
#[derive(Debug, Parser)]
#[command(name = "egotools", version, about = "Developer tooling for the ego workspace")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy generated protobuf Go bindings from bazel-out into the source tree.
    CopyPb(CopyPbArgs),
    /// Generate compile_commands.json for the envoy and ego sub-builds.
    Compdb(CompdbArgs),
}

/// Arguments for `copy-pb`.
#[derive(Debug, Args)]
pub struct CopyPbArgs {
    /// Build output tree to scan.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
    /// Path segment after which the source-relative path begins.
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,
    /// Directory destinations are written under.
    #[arg(long, default_value = ".")]
    pub dest_root: PathBuf,
}

impl CopyPbArgs {
    /// Converts the parsed arguments into copy options.
    #[must_use]
    pub fn to_options(&self) -> CopyOptions {
        CopyOptions {
            out_dir: self.out_dir.clone(),
            marker: self.marker.clone(),
            dest_root: self.dest_root.clone(),
        }
    }
}

/// Arguments for `compdb`.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CompdbArgs {
    /// Build the generated-code closure of the targets first.
    #[arg(long = "run_bazel_build", visible_alias = "run-bazel-build")]
    pub run_bazel_build: bool,
    /// Keep entries for external repositories.
    #[arg(long = "include_external", visible_alias = "include-external")]
    pub include_external: bool,
    /// Keep entries for generated files under bazel-out.
    #[arg(long = "include_genfiles", visible_alias = "include-genfiles")]
    pub include_genfiles: bool,
    /// Keep entries for header files.
    #[arg(long = "include_headers", visible_alias = "include-headers")]
    pub include_headers: bool,
    /// Replace -iquote with -I for Visual Studio Code.
    #[arg(long)]
    pub vscode: bool,
    /// Directory of the embedded envoy workspace.
    #[arg(long, default_value = "envoy")]
    pub envoy_dir: PathBuf,
    /// Target patterns for the local workspace (repeatable).
    #[arg(long = "local-target", default_values = ["//ego/src/..."])]
    pub local_targets: Vec<String>,
    /// Output file.
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Build tool executable (overrides $BAZEL).
    #[arg(long)]
    pub bazel: Option<String>,
    /// Target patterns for the envoy workspace.
    #[arg(default_values = ["//source/...", "//test/...", "//tools/..."])]
    pub targets: Vec<String>,
}

impl CompdbArgs {
    /// Entry selection and rewriting options.
    #[must_use]
    pub fn entry_options(&self) -> EntryOptions {
        EntryOptions {
            include_headers: self.include_headers,
            include_genfiles: self.include_genfiles,
            include_external: self.include_external,
            vscode: self.vscode,
        }
    }
}
