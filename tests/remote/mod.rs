mod fetch_and_pull_copy_remote_history;
mod push_copies_history_to_remote;
mod remote_errors;

use crate::common::command::run_gitlet_command;
use assert_fs::TempDir;
use std::path::PathBuf;

/// Create and initialize a repository under `root`
fn init_repository(root: &TempDir, name: &str) -> PathBuf {
    let dir = root.path().join(name);
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", dir, e));
    run_gitlet_command(&dir, &["init"]).assert().success();

    dir
}

/// Register `../<other>/.gitlet` as `origin`
fn add_origin(dir: &std::path::Path, other: &str) {
    let location = format!("../{}/.gitlet", other);
    run_gitlet_command(dir, &["add-remote", "origin", location.as_str()])
        .assert()
        .success()
        .stdout("");
}
