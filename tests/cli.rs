//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_egotools(dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_egotools");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("EGOTOOLS_RECORD")
        .env_remove("EGOTOOLS_REPLAY")
        .output()
        .expect("failed to run egotools binary")
}

fn write(path: &Path, contents: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn help_lists_both_tools() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_egotools(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("copy-pb"));
    assert!(stdout.contains("compdb"));
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_egotools(dir.path(), &["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn copy_pb_mirrors_marked_files_and_ignores_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let bin = root.join("bazel-out/k8-fastbuild/bin");
    let marked = bin.join("api/v1/api_go_proto_/%/github.com/grab/ego/api/v1");
    write(&marked.join("api.pb.go"), b"package v1\n// generated\n");
    write(&marked.join("api.pb.validate.go"), b"package v1\n// validate\n");
    write(&marked.join("README.md"), b"not generated");
    write(&bin.join("other/other.pb.go"), b"package other\n");

    let output = run_egotools(root, &["copy-pb"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Current Working Directory"));
    assert_eq!(stdout.matches("copying ").count(), 2);
    assert!(stdout.contains(" --> api/v1/api.pb.go\n"), "{stdout}");
    assert!(!stdout.contains("--> ./"), "{stdout}");

    assert_eq!(
        std::fs::read(root.join("api/v1/api.pb.go")).unwrap(),
        b"package v1\n// generated\n"
    );
    assert_eq!(
        std::fs::read(root.join("api/v1/api.pb.validate.go")).unwrap(),
        b"package v1\n// validate\n"
    );
    assert!(!root.join("api/v1/README.md").exists());
    assert!(!root.join("other").exists());
}

#[test]
fn copy_pb_is_idempotent_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let src = root.join("bazel-out/bin/x_go_proto_/%/github.com/grab/ego/pkg/x.pb.go");
    write(&src, b"package x // v2\n");
    write(&root.join("pkg/x.pb.go"), b"package x // stale v1 with more bytes\n");

    assert!(run_egotools(root, &["copy-pb"]).status.success());
    let first = std::fs::read(root.join("pkg/x.pb.go")).unwrap();
    assert!(run_egotools(root, &["copy-pb"]).status.success());
    let second = std::fs::read(root.join("pkg/x.pb.go")).unwrap();

    assert_eq!(first, b"package x // v2\n");
    assert_eq!(first, second);
}

#[test]
fn copy_pb_without_output_tree_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_egotools(dir.path(), &["copy-pb"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("0 generated file(s) copied."));
}
