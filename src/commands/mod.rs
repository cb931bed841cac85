//! Command dispatch and handlers.

pub mod compdb;
pub mod copy_pb;

use tracing::info;

use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `EGOTOOLS_RECORD` is set, every build tool interaction is recorded
/// to that cassette; when `EGOTOOLS_REPLAY` is set, they are served from it.
///
/// # Errors
///
/// Returns an error string if settings are invalid or the handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env().map_err(|e| e.to_string())?;
    let ctx = context_for(&settings)?;
    dispatch_with_context(command, &ctx, &settings)
}

/// Builds the service context the settings ask for.
fn context_for(settings: &Settings) -> Result<ServiceContext, String> {
    if let Some(path) = &settings.replay {
        return ServiceContext::replaying(path).map_err(|e| e.to_string());
    }
    if let Some(path) = &settings.record {
        info!(cassette = %path.display(), "recording build tool session");
        return Ok(ServiceContext::recording(path));
    }
    Ok(ServiceContext::live())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    let result = match command {
        Command::CopyPb(args) => copy_pb::run_with_context(ctx, args),
        Command::Compdb(args) => compdb::run_with_context(ctx, args, settings),
    };
    result.map_err(|e| e.to_string())
}
