//! Build graph query for targets whose outputs compdb generation needs on disk.

/// Query templates; `{}` is replaced by the union of requested patterns.
const CLOSURE_QUERIES: [&str; 3] = [
    r#"attr(include_prefix, ".+", kind(cc_library, deps({})))"#,
    r#"attr(strip_include_prefix, ".+", kind(cc_library, deps({})))"#,
    r#"attr(generator_function, ".*proto_library", kind(cc_.*, deps({})))"#,
];

/// Builds the query selecting, within the dependency closure of `targets`,
/// libraries with include-prefix rewriting and proto-generated C++ targets.
#[must_use]
pub fn closure_query(targets: &[String]) -> String {
    let universe = targets.join(" union ");
    CLOSURE_QUERIES.iter().map(|q| q.replace("{}", &universe)).collect::<Vec<_>>().join(" union ")
}

/// Parses query output into target labels, one per non-empty line.
#[must_use]
pub fn parse_targets(stdout: &str) -> Vec<String> {
    stdout.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect()
}
