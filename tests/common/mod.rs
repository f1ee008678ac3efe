//! Shared fixtures for codebase-casing integration tests.
//!
//! Tests build small JS/TS trees in a temporary directory and run the binary
//! against them through the command-line interface.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Creates a temporary directory containing `files` (relative path, content).
#[allow(unused)]
pub fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (rel, content) in files {
        write_file(temp.path(), rel, content);
    }
    temp
}

#[allow(unused)]
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[allow(unused)]
pub fn read_file(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel))
        .unwrap_or_else(|e| panic!("failed to read {}: {}", rel, e))
}

/// Lists every file below `root` as sorted forward-slash relative paths,
/// skipping `.git`.
#[allow(unused)]
pub fn list_files(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.file_name().is_some_and(|n| n == ".git") {
                continue;
            }
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

/// Runs the tool on `root` without checkpoint commits.
#[allow(unused)]
pub fn run_convert(root: &Path, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("codebase-casing");
    cmd.arg(root)
        .arg("--no-commit")
        .args(extra_args)
        .env_remove("RUST_LOG")
        .current_dir(root);

    cmd.assert()
}

/// Returns true when a usable `git` binary is on the PATH.
#[allow(unused)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Runs a git command in `root`, panicking on failure.
#[allow(unused)]
pub fn git(root: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialises a repository in `root` and commits everything in it.
#[allow(unused)]
pub fn init_repo(root: &Path) {
    git(root, &["init", "--quiet"]);
    git(root, &["config", "user.name", "Test User"]);
    git(root, &["config", "user.email", "test@example.com"]);
    git(root, &["config", "commit.gpgsign", "false"]);
    git(root, &["config", "core.ignorecase", "false"]);
    git(root, &["add", "--all"]);
    git(root, &["commit", "--quiet", "-m", "Initial commit"]);
}
