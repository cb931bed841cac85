//! End-to-end compilation database generation against a replayed build tool.
//!
//! The build tool session is a cassette: each `build` succeeds and each
//! `info execution_root` points at a scratch directory holding fragments.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use serde_json::{json, Value};

use egotools::cassette::format::{Cassette, Interaction};
use egotools::compdb::{self, CompdbOptions, CompileEntry, EntryOptions, SubBuild};
use egotools::context::ServiceContext;

fn build_run(seq: u64, args: &[&str], workdir: &str, exit_code: i32, stdout: &str) -> Interaction {
    Interaction {
        seq,
        port: "build".into(),
        method: "run".into(),
        input: json!({"program": "bazel", "args": args, "workdir": workdir}),
        output: json!({"ok": {"exit_code": exit_code, "stdout": stdout, "stderr": ""}}),
    }
}

fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
    let cassette = Cassette {
        name: "compdb".into(),
        recorded_at: Utc::now(),
        commit: "abc123".into(),
        interactions,
    };
    std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
}

fn write_fragment(exec_root: &Path, name: &str, file: &str) {
    let dir = exec_root.join("bazel-out/k8-fastbuild/bin/source");
    std::fs::create_dir_all(&dir).unwrap();
    let body = format!(
        r#"{{"directory": "__EXEC_ROOT__", "command": "/usr/bin/clang -std=c++0x -iquote __EXEC_ROOT__/inc -c {file}", "file": "{file}"}}"#
    );
    std::fs::write(dir.join(format!("{name}.compile_commands.json")), body).unwrap();
}

fn exec_root_line(path: &Path) -> String {
    format!("{}\n", path.display())
}

#[test]
fn header_fragment_is_dropped_and_source_is_prefixed() {
    let scratch = tempfile::tempdir().unwrap();
    let exec_root = scratch.path().join("execroot");
    write_fragment(&exec_root, "server_h", "source/server.h");
    write_fragment(&exec_root, "server", "source/server.cc");

    let cassette = scratch.path().join("session.cassette.yaml");
    write_cassette(
        &cassette,
        vec![
            build_run(0, &["build"], "envoy", 0, ""),
            build_run(1, &["info", "execution_root"], "envoy", 0, &exec_root_line(&exec_root)),
        ],
    );

    let ctx = ServiceContext::replaying(&cassette).unwrap();
    let options = CompdbOptions::new(EntryOptions::default(), "bazel", &[]);
    let sub = SubBuild::nested("envoy", vec!["//source/...".to_string()]);

    let db = compdb::generate_sub_build(&ctx, &options, &sub).unwrap();

    assert_eq!(db.len(), 1);
    assert_eq!(db[0].file, "envoy/source/server.cc");
    assert_eq!(db[0].directory, exec_root.to_string_lossy());
    assert_eq!(
        db[0].command,
        format!("/usr/bin/clang -iquote {}/inc -c source/server.cc", exec_root.display())
    );
}

#[test]
fn include_headers_keeps_header_with_suppressions() {
    let scratch = tempfile::tempdir().unwrap();
    let exec_root = scratch.path().join("execroot");
    write_fragment(&exec_root, "server_h", "source/server.h");

    let cassette = scratch.path().join("session.cassette.yaml");
    write_cassette(
        &cassette,
        vec![
            build_run(0, &["build"], ".", 0, ""),
            build_run(1, &["info", "execution_root"], ".", 0, &exec_root_line(&exec_root)),
        ],
    );

    let ctx = ServiceContext::replaying(&cassette).unwrap();
    let entries = EntryOptions { include_headers: true, vscode: true, ..EntryOptions::default() };
    let options = CompdbOptions::new(entries, "bazel", &[]);

    let db = compdb::generate_sub_build(&ctx, &options, &SubBuild::nested(".", vec![])).unwrap();

    assert_eq!(db.len(), 1);
    assert_eq!(db[0].file, "source/server.h");
    assert!(db[0].command.contains(" -I "));
    assert!(db[0].command.ends_with("-Wno-unused-function"));
}

fn run_compdb(workspace: &Path, cassette: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_egotools"))
        .arg("compdb")
        .args(args)
        .current_dir(workspace)
        .env("EGOTOOLS_REPLAY", cassette)
        .env_remove("EGOTOOLS_RECORD")
        .env_remove("BAZEL_BUILD_OPTIONS")
        .output()
        .expect("failed to run egotools binary")
}

#[test]
fn binary_merges_envoy_then_local_into_output_file() {
    let workspace = tempfile::tempdir().unwrap();
    let envoy_root = workspace.path().join("cache/envoy-execroot");
    let local_root = workspace.path().join("cache/ego-execroot");
    write_fragment(&envoy_root, "conn", "source/common/conn.cc");
    write_fragment(&envoy_root, "conn_h", "source/common/conn.h");
    write_fragment(&local_root, "filter", "ego/src/filter.cc");

    let cassette = workspace.path().join("session.cassette.yaml");
    write_cassette(
        &cassette,
        vec![
            build_run(0, &["build"], "envoy", 0, ""),
            build_run(1, &["info", "execution_root"], "envoy", 0, &exec_root_line(&envoy_root)),
            build_run(2, &["build"], ".", 0, ""),
            build_run(3, &["info", "execution_root"], ".", 0, &exec_root_line(&local_root)),
        ],
    );

    let output = run_compdb(workspace.path(), &cassette, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Current Working Directory").count(), 2);

    let written = std::fs::read_to_string(workspace.path().join("compile_commands.json")).unwrap();
    let db: Vec<CompileEntry> = serde_json::from_str(&written).unwrap();
    let files: Vec<_> = db.iter().map(|e| e.file.as_str()).collect();
    assert_eq!(files, vec!["envoy/source/common/conn.cc", "ego/src/filter.cc"]);

    let raw: Value = serde_json::from_str(&written).unwrap();
    for entry in raw.as_array().unwrap() {
        for key in ["directory", "command", "file"] {
            assert!(entry[key].is_string(), "{key} missing in {entry}");
        }
        assert!(!entry["command"].as_str().unwrap().contains("-std=c++0x"));
    }
}

#[test]
fn failing_build_writes_nothing() {
    let workspace = tempfile::tempdir().unwrap();
    let cassette = workspace.path().join("session.cassette.yaml");
    write_cassette(&cassette, vec![build_run(0, &["build"], "envoy", 1, "")]);

    let output = run_compdb(workspace.path(), &cassette, &["--output", "out.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exited with status 1"));
    assert!(!PathBuf::from(workspace.path()).join("out.json").exists());
}
