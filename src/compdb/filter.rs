//! Entry selection: which compilation entries make it into the database.

use super::entry::CompileEntry;
use super::EntryOptions;

const HEADER_EXTENSIONS: [&str; 4] = [".h", ".hh", ".hpp", ".hxx"];

/// Build output tree.
const GENFILES_DIR: &str = "bazel-out/";
/// External repositories.
const EXTERNAL_DIR: &str = "external/";

/// Returns `true` for C/C++ header files.
#[must_use]
pub fn is_header(file: &str) -> bool {
    HEADER_EXTENSIONS.iter().any(|ext| file.ends_with(ext))
}

/// Returns `true` if `entry` passes every active filter.
///
/// The directory checks match at the start of `entry.file`, which already
/// carries its sub-build prefix, so `envoy/bazel-out/...` is kept.
#[must_use]
pub fn is_compile_target(entry: &CompileEntry, options: &EntryOptions) -> bool {
    let file = entry.file.as_str();
    if !options.include_headers && is_header(file) {
        return false;
    }
    if !options.include_genfiles && file.starts_with(GENFILES_DIR) {
        return false;
    }
    if !options.include_external && file.starts_with(EXTERNAL_DIR) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file: &str) -> CompileEntry {
        CompileEntry::new("/exec", "clang -c", file)
    }

    #[test]
    fn recognizes_header_extensions() {
        for file in ["a.h", "b/c.hh", "d.hpp", "e.hxx"] {
            assert!(is_header(file), "{file}");
        }
        for file in ["a.cc", "a.c", "a.hpp.cc", "h"] {
            assert!(!is_header(file), "{file}");
        }
    }

    #[test]
    fn default_options_keep_only_local_sources() {
        let options = EntryOptions::default();
        let entries = [
            entry("source/common/a.cc"),
            entry("source/common/a.h"),
            entry("bazel-out/k8-fastbuild/bin/api/x.pb.cc"),
            entry("external/com_google_absl/absl/strings/str_cat.cc"),
            entry("test/b.cc"),
        ];
        let kept: Vec<_> = entries
            .iter()
            .filter(|e| is_compile_target(e, &options))
            .map(|e| e.file.as_str())
            .collect();
        assert_eq!(kept, vec!["source/common/a.cc", "test/b.cc"]);
    }

    #[test]
    fn n_entries_with_h_headers_filter_to_n_minus_h() {
        let files = ["a.cc", "a.h", "b.cc", "b.hpp", "c.hh", "d.cc", "e.hxx"];
        let headers = files.iter().filter(|f| is_header(f)).count();
        let options = EntryOptions::default();
        let kept = files.iter().filter(|f| is_compile_target(&entry(f), &options)).count();
        assert_eq!(headers, 4);
        assert_eq!(kept, files.len() - headers);
    }

    #[test]
    fn include_flags_lift_each_filter() {
        let options = EntryOptions {
            include_headers: true,
            include_genfiles: true,
            include_external: true,
            vscode: false,
        };
        for file in ["a.h", "bazel-out/x.cc", "external/y.cc"] {
            assert!(is_compile_target(&entry(file), &options), "{file}");
        }
    }

    #[test]
    fn prefix_match_is_anchored_at_start() {
        let options = EntryOptions::default();
        assert!(is_compile_target(&entry("source/external/x.cc"), &options));
        assert!(is_compile_target(&entry("tools/bazel-out/x.cc"), &options));
        assert!(is_compile_target(&entry("envoy/external/absl/f.cc"), &options));
        assert!(!is_compile_target(&entry("external/absl/f.cc"), &options));
    }
}
