use crate::common::command::{
    branch_commit_id, commit_file, gitlet_checkout_branch, gitlet_merge, init_repository_dir,
    run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_fast_forwards_when_behind(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    gitlet_checkout_branch(dir.path(), "feature")
        .assert()
        .success();
    commit_file(dir.path(), "b.txt", "bee", "add b");
    commit_file(dir.path(), "a.txt", "two", "edit a");
    let feature = branch_commit_id(dir.path(), "feature");

    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success();
    assert!(!dir.path().join("b.txt").exists());

    gitlet_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(branch_commit_id(dir.path(), "master"), feature);
    assert_eq!(read_file(&dir.path().join("a.txt")), "two");
    assert_eq!(read_file(&dir.path().join("b.txt")), "bee");

    // no merge commit was made
    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Merge:").not());
}

