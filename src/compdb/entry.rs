//! Compilation database entries and their structured command form.

use serde::{Deserialize, Serialize};

/// One record of a compilation database.
///
/// Fields other than `directory`, `command`, and `file` are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileEntry {
    /// Working directory of the compilation, as emitted by the build tool.
    #[serde(default)]
    pub directory: String,
    /// Full compiler invocation.
    pub command: String,
    /// Source file, relative to the sub-build root until a prefix is applied.
    pub file: String,
    /// Any other fields present in the fragment.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CompileEntry {
    /// Creates an entry with no extra fields.
    pub fn new(
        directory: impl Into<String>,
        command: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            command: command.into(),
            file: file.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A compiler invocation split into the executable and its argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    /// Compiler executable (first token).
    pub compiler: String,
    /// Remaining tokens in order.
    pub args: Vec<String>,
}

impl CompileCommand {
    /// Splits a command string on single spaces.
    ///
    /// Runs of spaces produce empty tokens, so [`render`](Self::render) gives
    /// back the original string byte for byte when no token was changed.
    #[must_use]
    pub fn parse(command: &str) -> Self {
        let mut tokens = command.split(' ').map(str::to_string);
        let compiler = tokens.next().unwrap_or_default();
        Self { compiler, args: tokens.collect() }
    }

    /// Joins the compiler and arguments back into a single command string.
    #[must_use]
    pub fn render(&self) -> String {
        std::iter::once(self.compiler.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_splits_compiler_from_arguments() {
        let cmd = CompileCommand::parse("/usr/bin/clang -c foo.cc -o foo.o");
        assert_eq!(cmd.compiler, "/usr/bin/clang");
        assert_eq!(cmd.args, vec!["-c", "foo.cc", "-o", "foo.o"]);
    }

    #[test]
    fn render_preserves_runs_of_spaces() {
        let raw = r#"clang '-DGREETING="a  b"'  -c foo.cc"#;
        assert_eq!(CompileCommand::parse(raw).render(), raw);
    }

    #[test]
    fn parse_of_empty_command_is_empty() {
        let cmd = CompileCommand::parse("");
        assert!(cmd.compiler.is_empty());
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn unknown_fields_survive_serialization() {
        let raw = json!({
            "directory": "/exec",
            "command": "clang -c a.cc",
            "file": "a.cc",
            "output": "a.o"
        });
        let entry: CompileEntry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.extra.get("output"), Some(&json!("a.o")));
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }
}
