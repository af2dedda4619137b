use super::{add_origin, init_repository};
use crate::common::command::{
    branch_commit_id, commit_file, gitlet_checkout_branch, head_commit_id, repository_dir,
    run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn fetch_creates_a_remote_tracking_branch(repository_dir: TempDir) {
    let upstream = init_repository(&repository_dir, "upstream");
    let downstream = init_repository(&repository_dir, "downstream");
    commit_file(&upstream, "a.txt", "alpha", "add a");
    commit_file(&upstream, "b.txt", "beta", "add b");
    let upstream_head = head_commit_id(&upstream);

    add_origin(&downstream, "upstream");
    run_gitlet_command(&downstream, &["fetch", "origin", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(&downstream, "origin/master"), upstream_head);
    // fetching does not touch the current branch or work tree
    assert_ne!(head_commit_id(&downstream), upstream_head);
    assert!(!downstream.join("a.txt").exists());

    run_gitlet_command(&downstream, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::starts_with(
            "=== Branches ===\n*master\norigin/master\n\n",
        ));

    gitlet_checkout_branch(&downstream, "origin/master")
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&downstream.join("a.txt")), "alpha");
    assert_eq!(read_file(&downstream.join("b.txt")), "beta");

    run_gitlet_command(&downstream, &["log"])
        .assert()
        .success()
        .stdout(predicates::str::contains(format!("commit {}\n", upstream_head)));
}

#[rstest]
fn pull_fast_forwards_a_fresh_repository(repository_dir: TempDir) {
    let upstream = init_repository(&repository_dir, "upstream");
    let downstream = init_repository(&repository_dir, "downstream");
    commit_file(&upstream, "a.txt", "alpha", "add a");
    let upstream_head = head_commit_id(&upstream);

    add_origin(&downstream, "upstream");
    run_gitlet_command(&downstream, &["pull", "origin", "master"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(head_commit_id(&downstream), upstream_head);
    assert_eq!(read_file(&downstream.join("a.txt")), "alpha");
}

#[rstest]
fn pull_merges_divergent_work(repository_dir: TempDir) {
    let upstream = init_repository(&repository_dir, "upstream");
    let downstream = init_repository(&repository_dir, "downstream");
    add_origin(&downstream, "upstream");

    commit_file(&upstream, "shared.txt", "shared", "shared");
    run_gitlet_command(&downstream, &["pull", "origin", "master"])
        .assert()
        .success();

    commit_file(&upstream, "up.txt", "up", "upstream work");
    commit_file(&downstream, "down.txt", "down", "downstream work");

    run_gitlet_command(&downstream, &["pull", "origin", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&downstream.join("shared.txt")), "shared");
    assert_eq!(read_file(&downstream.join("up.txt")), "up");
    assert_eq!(read_file(&downstream.join("down.txt")), "down");
    run_gitlet_command(&downstream, &["log"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Merged origin/master into master.\n"));
}
