//! Binary entrypoint for the `egotools` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    egotools::telemetry::init();
    // Recording and replay are handled in commands::dispatch via EGOTOOLS_RECORD / EGOTOOLS_REPLAY.
    match egotools::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
