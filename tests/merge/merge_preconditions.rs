use crate::common::command::{
    branch_commit_id, commit_file, gitlet_add, gitlet_checkout_branch, gitlet_merge,
    init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_with_staged_changes_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("c.txt"), "staged".to_string()));
    gitlet_add(dir.path(), "c.txt").assert().success();

    gitlet_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");
}

#[rstest]
fn merge_with_staged_removal_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    gitlet_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");
}

#[rstest]
fn merge_unknown_branch_is_refused(init_repository_dir: TempDir) {
    gitlet_merge(init_repository_dir.path(), "nowhere")
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn merge_current_branch_is_refused(init_repository_dir: TempDir) {
    gitlet_merge(init_repository_dir.path(), "master")
        .assert()
        .success()
        .stdout("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merge_refuses_to_overwrite_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_file(dir.path(), "a.txt", "master side", "master side");
    gitlet_checkout_branch(dir.path(), "other")
        .assert()
        .success();
    commit_file(dir.path(), "u.txt", "from other", "other side");
    gitlet_checkout_branch(dir.path(), "master")
        .assert()
        .success();
    let master = branch_commit_id(dir.path(), "master");

    write_file(FileSpec::new(dir.path().join("u.txt"), "mine".to_string()));

    gitlet_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(branch_commit_id(dir.path(), "master"), master);
    assert_eq!(read_file(&dir.path().join("u.txt")), "mine");
}
