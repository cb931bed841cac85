//! Compiler flag rewriting for downstream tooling.

use super::entry::{CompileCommand, CompileEntry};
use super::filter::is_header;
use super::EntryOptions;

/// Standard flags the build adds that clang-tidy misinterprets.
const LEGACY_STD_FLAGS: [&str; 2] = ["-std=c++0x", "-std=c++11"];

/// Warnings that are expected when a header is compiled on its own.
const HEADER_WARNING_SUPPRESSIONS: [&str; 3] =
    ["-Wno-pragma-once-outside-header", "-Wno-unused-const-variable", "-Wno-unused-function"];

const IQUOTE: &str = "-iquote";

/// Rewrites the argument list of a parsed command.
///
/// Legacy `-std` flags are dropped; with `vscode`, `-iquote` becomes `-I`;
/// headers get warning suppressions appended.
pub fn rewrite_args(command: &mut CompileCommand, header: bool, vscode: bool) {
    command.args.retain(|arg| !LEGACY_STD_FLAGS.contains(&arg.as_str()));

    if vscode {
        for arg in &mut command.args {
            if let Some(dir) = arg.strip_prefix(IQUOTE) {
                *arg = format!("-I{dir}");
            }
        }
    }

    if header {
        command.args.extend(HEADER_WARNING_SUPPRESSIONS.iter().map(|flag| (*flag).to_string()));
    }
}

/// Rewrites `entry.command` in place according to `options`.
pub fn modify_compile_command(entry: &mut CompileEntry, options: &EntryOptions) {
    let mut command = CompileCommand::parse(&entry.command);
    rewrite_args(&mut command, is_header(&entry.file), options.vscode);
    entry.command = command.render();
}
