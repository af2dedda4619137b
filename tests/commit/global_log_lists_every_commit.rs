use crate::common::command::{
    branch_commit_id, commit_file, gitlet_checkout_branch, init_repository_dir, run_gitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn global_log_lists_every_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_gitlet_command(dir.path(), &["branch", "side"]).assert().success();
    gitlet_checkout_branch(dir.path(), "side").assert().success();
    commit_file(dir.path(), "side.txt", "side", "on side");
    gitlet_checkout_branch(dir.path(), "master").assert().success();

    // the side commit is not on master's history, but global-log sees it
    let side = branch_commit_id(dir.path(), "side");
    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(side.as_str()).not());
    run_gitlet_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}\n", side)))
        .stdout(predicate::str::contains("\non side\n"))
        .stdout(predicate::str::contains("\nfirst\n"))
        .stdout(predicate::str::contains("\ninitial commit\n"));

    Ok(())
}
