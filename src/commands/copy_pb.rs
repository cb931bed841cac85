//! `egotools copy-pb` command.

use crate::cli::CopyPbArgs;
use crate::context::ServiceContext;
use crate::copy_pb::copy_generated;
use crate::error::Result;

/// Execute the `copy-pb` command.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be copied.
pub fn run_with_context(ctx: &ServiceContext, args: &CopyPbArgs) -> Result<()> {
    let report = copy_generated(ctx, &args.to_options())?;
    println!("{} generated file(s) copied.", report.copied.len());
    Ok(())
}
