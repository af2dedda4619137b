use super::{add_origin, init_repository};
use crate::common::command::{
    branch_commit_id, commit_file, head_commit_id, repository_dir, run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn push_to_a_fresh_remote(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    let remote = init_repository(&repository_dir, "remote");
    commit_file(&local, "a.txt", "alpha", "add a");
    commit_file(&local, "b.txt", "beta", "add b");
    let head = head_commit_id(&local);

    add_origin(&local, "remote");
    run_gitlet_command(&local, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(&remote, "master"), head);
    // the remote work tree is left alone
    assert!(!remote.join("a.txt").exists());

    run_gitlet_command(&remote, &["checkout", head.as_str(), "--", "b.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&remote.join("b.txt")), "beta");

    run_gitlet_command(&remote, &["global-log"])
        .assert()
        .success()
        .stdout(predicates::str::contains("add a\n"))
        .stdout(predicates::str::contains("add b\n"));
}

#[rstest]
fn push_creates_a_missing_remote_branch(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    let remote = init_repository(&repository_dir, "remote");
    commit_file(&local, "a.txt", "alpha", "add a");
    let head = head_commit_id(&local);

    add_origin(&local, "remote");
    run_gitlet_command(&local, &["push", "origin", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(&remote, "feature"), head);
    assert_ne!(branch_commit_id(&remote, "master"), head);
}

#[rstest]
fn push_again_after_more_commits(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    let remote = init_repository(&repository_dir, "remote");
    add_origin(&local, "remote");

    commit_file(&local, "a.txt", "alpha", "add a");
    run_gitlet_command(&local, &["push", "origin", "master"])
        .assert()
        .success();
    commit_file(&local, "a.txt", "alpha two", "edit a");
    run_gitlet_command(&local, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(&remote, "master"), head_commit_id(&local));
}

#[rstest]
fn push_is_refused_when_the_remote_is_ahead(repository_dir: TempDir) {
    let local = init_repository(&repository_dir, "local");
    let remote = init_repository(&repository_dir, "remote");
    commit_file(&local, "a.txt", "alpha", "local work");
    commit_file(&remote, "r.txt", "remote", "remote work");
    let remote_head = head_commit_id(&remote);

    add_origin(&local, "remote");
    run_gitlet_command(&local, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout("Please pull down remote changes before pushing.\n");

    assert_eq!(branch_commit_id(&remote, "master"), remote_head);
}
