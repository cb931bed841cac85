//! `egotools compdb` command.

use crate::cli::CompdbArgs;
use crate::compdb::{generate, write_database, CompdbOptions, SubBuild};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::Result;

/// Execute the `compdb` command.
///
/// The envoy workspace is processed first with the positional targets, then
/// the local workspace with `--local-target`. The output file is only
/// written once both succeed.
///
/// # Errors
///
/// Returns an error if any build tool call fails, a fragment is malformed,
/// or the output cannot be written.
pub fn run_with_context(
    ctx: &ServiceContext,
    args: &CompdbArgs,
    settings: &Settings,
) -> Result<()> {
    let bazel = args.bazel.clone().unwrap_or_else(|| settings.bazel.clone());
    let mut options = CompdbOptions::new(args.entry_options(), bazel, &settings.build_options);
    options.run_bazel_build = args.run_bazel_build;

    let subs = sub_builds(args);
    let db = generate(ctx, &options, &subs)?;
    write_database(ctx, &args.output, &db)?;
    println!("{} entries written to {}.", db.len(), args.output.display());
    Ok(())
}

/// The envoy sub-build followed by the local one.
#[must_use]
pub fn sub_builds(args: &CompdbArgs) -> Vec<SubBuild> {
    vec![
        SubBuild::nested(args.envoy_dir.clone(), args.targets.clone()),
        SubBuild::nested(".", args.local_targets.clone()),
    ]
}
